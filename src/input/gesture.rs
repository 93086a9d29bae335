use serde::{Deserialize, Serialize};

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    Drag,
    Pinch,
}

/// Raw gesture input after the host has translated pointer/touch/wheel events.
///
/// `Move::movement` is the running displacement since the gesture started,
/// not a per-event delta. `Pinch::offset` is the running pinch distance;
/// it is optional because some touch backends report pinch frames without
/// a distance, which are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureInput {
    Start { kind: GestureKind },
    Move { movement: Point },
    Pinch { offset: Option<f64> },
    End,
    Wheel { delta: Point },
}

/// Step through the catalog. Positive motion (drag left, wheel down/right)
/// advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavDirection {
    Retreat,
    Advance,
}

impl NavDirection {
    /// Dragging the photo left pulls the next one in.
    pub fn from_drag_dx(dx: f64) -> Self {
        if dx < 0.0 {
            Self::Advance
        } else {
            Self::Retreat
        }
    }

    /// Wheel down or right advances; the larger axis wins.
    pub fn from_wheel(delta: Point) -> Option<Self> {
        let dominant = if delta.y.abs() >= delta.x.abs() {
            delta.y
        } else {
            delta.x
        };
        if dominant > 0.0 {
            Some(Self::Advance)
        } else if dominant < 0.0 {
            Some(Self::Retreat)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragIntent {
    /// Below the threshold on both axes.
    Ambiguous,
    Horizontal(NavDirection),
    Vertical,
}

pub fn classify_drag(movement: Point, axis_threshold: f64) -> DragIntent {
    let (abs_x, abs_y) = (movement.x.abs(), movement.y.abs());
    if abs_x.max(abs_y) < axis_threshold || (abs_x == 0.0 && abs_y == 0.0) {
        return DragIntent::Ambiguous;
    }
    if abs_x > abs_y {
        DragIntent::Horizontal(NavDirection::from_drag_dx(movement.x))
    } else {
        DragIntent::Vertical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_drag_requires_threshold_on_dominant_axis() {
        assert_eq!(classify_drag(Point::new(9.0, 2.0), 10.0), DragIntent::Ambiguous);
        assert_eq!(
            classify_drag(Point::new(-12.0, 3.0), 10.0),
            DragIntent::Horizontal(NavDirection::Advance)
        );
        assert_eq!(
            classify_drag(Point::new(12.0, 3.0), 10.0),
            DragIntent::Horizontal(NavDirection::Retreat)
        );
        assert_eq!(classify_drag(Point::new(5.0, 30.0), 10.0), DragIntent::Vertical);
    }

    #[test]
    fn classify_drag_with_zero_threshold_ignores_zero_motion() {
        assert_eq!(classify_drag(Point::new(0.0, 0.0), 0.0), DragIntent::Ambiguous);
    }

    #[test]
    fn wheel_direction_follows_dominant_axis() {
        assert_eq!(
            NavDirection::from_wheel(Point::new(0.0, 4.0)),
            Some(NavDirection::Advance)
        );
        assert_eq!(
            NavDirection::from_wheel(Point::new(0.0, -4.0)),
            Some(NavDirection::Retreat)
        );
        assert_eq!(
            NavDirection::from_wheel(Point::new(8.0, -1.0)),
            Some(NavDirection::Advance)
        );
        assert_eq!(NavDirection::from_wheel(Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn gesture_input_deserializes_from_tagged_json() {
        let input: GestureInput =
            serde_json::from_str(r#"{ "type": "pinch", "offset": null }"#).expect("pinch frame");
        assert_eq!(input, GestureInput::Pinch { offset: None });

        let input: GestureInput =
            serde_json::from_str(r#"{ "type": "move", "movement": { "x": 30.0, "y": 10.0 } }"#)
                .expect("move frame");
        assert_eq!(
            input,
            GestureInput::Move {
                movement: Point::new(30.0, 10.0)
            }
        );
    }
}
