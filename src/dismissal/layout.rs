use super::{HitRegion, HitTest};
use crate::config::FilmstripConfig;
use crate::geometry::{Point, Rect};

const WRAPPER_WIDTH_RATIO: f64 = 0.98;
const WRAPPER_HEIGHT_RATIO: f64 = 0.97;
const CONTENT_WIDTH_RATIO: f64 = 0.8;
const CONTENT_HEIGHT_RATIO: f64 = 0.6;
const CONTENT_CENTER_Y_RATIO: f64 = 0.3;
const FILMSTRIP_CENTER_Y_RATIO: f64 = 0.7;
const CLOSE_CONTROL_SIZE: f64 = 40.0;
const CLOSE_CONTROL_INSET: f64 = 12.0;

/// Overlay geometry for a given client size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLayout {
    pub wrapper: Rect,
    pub content: Rect,
    pub filmstrip: Rect,
    pub close_control: Rect,
}

impl OverlayLayout {
    pub fn compute(client_width: f64, client_height: f64, filmstrip: &FilmstripConfig) -> Self {
        let wrapper_width = client_width * WRAPPER_WIDTH_RATIO;
        let wrapper_height = client_height * WRAPPER_HEIGHT_RATIO;
        let wrapper = Rect::new(
            (client_width - wrapper_width) / 2.0,
            0.0,
            wrapper_width,
            wrapper_height,
        );

        let at = |ratio_y: f64| {
            Point::new(
                wrapper.x + wrapper.width / 2.0,
                wrapper.y + wrapper.height * ratio_y,
            )
        };
        let content = Rect::centered_at(
            at(CONTENT_CENTER_Y_RATIO),
            wrapper.width * CONTENT_WIDTH_RATIO,
            wrapper.height * CONTENT_HEIGHT_RATIO,
        );
        let filmstrip = Rect::centered_at(
            at(FILMSTRIP_CENTER_Y_RATIO),
            client_width * filmstrip.width_ratio,
            filmstrip.height,
        );
        let close_control = Rect::new(
            wrapper.x + wrapper.width - CLOSE_CONTROL_INSET - CLOSE_CONTROL_SIZE,
            wrapper.y + CLOSE_CONTROL_INSET,
            CLOSE_CONTROL_SIZE,
            CLOSE_CONTROL_SIZE,
        );

        Self {
            wrapper,
            content,
            filmstrip,
            close_control,
        }
    }
}

impl HitTest for OverlayLayout {
    fn hit_test(&self, point: Point) -> HitRegion {
        if self.close_control.contains(point) {
            HitRegion::Control
        } else if self.filmstrip.contains(point) {
            HitRegion::Filmstrip
        } else if self.content.contains(point) {
            HitRegion::Image
        } else {
            HitRegion::Backdrop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> OverlayLayout {
        OverlayLayout::compute(1000.0, 800.0, &FilmstripConfig::default())
    }

    #[test]
    fn compute_places_content_above_filmstrip() {
        let layout = layout();

        assert_eq!(layout.wrapper, Rect::new(10.0, 0.0, 980.0, 776.0));
        assert_eq!(layout.content.width, 784.0);
        assert!(layout.content.y + layout.content.height <= layout.filmstrip.y);
        assert_eq!(layout.filmstrip.width, 600.0);
        assert_eq!(layout.filmstrip.height, 75.0);
    }

    #[test]
    fn hit_test_classifies_regions() {
        let layout = layout();

        assert_eq!(layout.hit_test(Point::new(500.0, 232.8)), HitRegion::Image);
        assert_eq!(layout.hit_test(Point::new(500.0, 543.2)), HitRegion::Filmstrip);
        assert_eq!(layout.hit_test(Point::new(960.0, 30.0)), HitRegion::Control);
        assert_eq!(layout.hit_test(Point::new(30.0, 700.0)), HitRegion::Backdrop);
        assert_eq!(layout.hit_test(Point::new(500.0, 790.0)), HitRegion::Backdrop);
    }
}
