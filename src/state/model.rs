use serde::Serialize;

use crate::geometry::{PanBounds, PanOffset};
use crate::input::NavDirection;

/// Committed interpretation of the gesture in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureLock {
    #[default]
    None,
    Navigating,
    Panning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerState {
    #[default]
    Closed,
    OpenIdle,
    OpenGesturing(GestureLock),
}

/// Zoom scale plus pan offset. A scale of exactly 1 always carries a zero pan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    scale: f64,
    pan: PanOffset,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        pan: PanOffset::ZERO,
    };

    pub const fn scale(&self) -> f64 {
        self.scale
    }

    pub const fn pan(&self) -> PanOffset {
        self.pan
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn is_zoomed(&self) -> bool {
        self.scale > 1.0
    }

    /// Scales below 1 and non-finite scales collapse to the identity.
    pub fn with_scale(self, scale: f64) -> Self {
        if !scale.is_finite() || scale <= 1.0 {
            return Self::IDENTITY;
        }
        Self {
            scale,
            pan: self.pan,
        }
    }

    /// Panning an unzoomed photo has no effect.
    pub fn with_pan(self, pan: PanOffset, bounds: PanBounds) -> Self {
        if !self.is_zoomed() {
            return self;
        }
        Self {
            scale: self.scale,
            pan: pan.clamped(bounds),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct ActiveGesture {
    pub(super) lock: GestureLock,
    /// Pan offset when the gesture began; moves are relative to it.
    pub(super) pan_origin: PanOffset,
    pub(super) pending: Option<NavDirection>,
    /// Set once the lock has been released mid-gesture; the rest of the
    /// touch may pan again but never navigates.
    pub(super) navigation_blocked: bool,
}

impl ActiveGesture {
    pub(super) fn starting_at(pan_origin: PanOffset) -> Self {
        Self {
            lock: GestureLock::None,
            pan_origin,
            pending: None,
            navigation_blocked: false,
        }
    }

    pub(super) fn release_lock(&mut self) {
        self.lock = GestureLock::None;
        self.pan_origin = PanOffset::ZERO;
        self.pending = None;
        self.navigation_blocked = true;
    }
}

/// Everything the viewer knows about what is on screen.
///
/// Fields are private so that only the state machine can move the session
/// between states; the closed session never carries an index or a zoom.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewerSession {
    current_index: Option<usize>,
    transform: Transform,
    gesture: Option<ActiveGesture>,
}

impl ViewerSession {
    pub fn is_open(&self) -> bool {
        self.current_index.is_some()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn zoom_scale(&self) -> f64 {
        self.transform.scale()
    }

    pub fn pan_offset(&self) -> PanOffset {
        self.transform.pan()
    }

    pub fn gesture_lock(&self) -> GestureLock {
        self.gesture
            .map(|gesture| gesture.lock)
            .unwrap_or_default()
    }

    pub fn is_gesturing(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn state(&self) -> ViewerState {
        match (self.current_index, self.gesture) {
            (None, _) => ViewerState::Closed,
            (Some(_), None) => ViewerState::OpenIdle,
            (Some(_), Some(gesture)) => ViewerState::OpenGesturing(gesture.lock),
        }
    }

    pub(super) fn open_at(&mut self, index: usize) {
        *self = Self {
            current_index: Some(index),
            ..Self::default()
        };
    }

    pub(super) fn close(&mut self) {
        *self = Self::default();
    }

    /// Moves to another photo; a newly shown photo always starts unzoomed.
    pub(super) fn show_index(&mut self, index: usize) {
        if self.current_index.is_none() {
            return;
        }
        self.current_index = Some(index);
        self.transform = Transform::IDENTITY;
    }

    pub(super) fn set_transform(&mut self, transform: Transform) {
        if self.current_index.is_none() {
            return;
        }
        self.transform = transform;
    }

    pub(super) fn begin_gesture(&mut self) -> &mut ActiveGesture {
        let pan_origin = self.transform.pan();
        self.gesture
            .get_or_insert_with(|| ActiveGesture::starting_at(pan_origin))
    }

    pub(super) fn end_gesture(&mut self) -> Option<ActiveGesture> {
        self.gesture.take()
    }
}
