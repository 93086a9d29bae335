use serde::Serialize;

use super::model::{Transform, ViewerState};
use crate::input::{GestureInput, NavDirection};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerEvent {
    /// Grid tile activated.
    Open { index: usize },
    /// Filmstrip tile clicked.
    Select { index: usize },
    /// Arrow key.
    Navigate(NavDirection),
    Gesture(GestureInput),
    Dismiss,
}

/// Output of a transition, consumed by the host glue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum ViewerEffect {
    Opened { index: usize },
    IndexChanged { index: usize },
    TransformChanged { transform: Transform },
    Closed,
}

impl ViewerEffect {
    /// Index the filmstrip should bring into view, if any.
    pub fn shown_index(&self) -> Option<usize> {
        match self {
            Self::Opened { index } | Self::IndexChanged { index } => Some(*index),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateTransition {
    pub from: ViewerState,
    pub event: ViewerEvent,
    pub to: ViewerState,
}

impl StateTransition {
    pub const fn new(from: ViewerState, event: ViewerEvent, to: ViewerState) -> Self {
        Self { from, event, to }
    }
}
