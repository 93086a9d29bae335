mod layout;

pub use layout::OverlayLayout;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// What a pointer-down inside the full-screen overlay landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitRegion {
    /// Overlay area around the photo; the only region that dismisses.
    Backdrop,
    Image,
    Filmstrip,
    Control,
}

/// Capability that classifies overlay points.
pub trait HitTest {
    fn hit_test(&self, point: Point) -> HitRegion;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DismissTrigger {
    PointerDown(Point),
    EscapeKey,
    CloseControl,
}

#[derive(Debug, Clone)]
pub struct DismissalHandler<T: HitTest> {
    hit_test: T,
}

impl<T: HitTest> DismissalHandler<T> {
    pub fn new(hit_test: T) -> Self {
        Self { hit_test }
    }

    pub fn hit_test(&self) -> &T {
        &self.hit_test
    }

    pub fn hit_test_mut(&mut self) -> &mut T {
        &mut self.hit_test
    }

    pub fn classify(&self, point: Point) -> HitRegion {
        self.hit_test.hit_test(point)
    }

    pub fn should_dismiss(&self, trigger: DismissTrigger) -> bool {
        match trigger {
            DismissTrigger::EscapeKey | DismissTrigger::CloseControl => true,
            DismissTrigger::PointerDown(point) => {
                if !point.is_finite() {
                    tracing::warn!(?point, "dropping pointer-down with non-finite position");
                    return false;
                }
                let region = self.classify(point);
                tracing::debug!(?point, ?region, "overlay pointer down");
                region == HitRegion::Backdrop
            }
        }
    }
}
