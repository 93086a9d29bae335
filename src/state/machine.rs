use std::collections::VecDeque;

use super::error::{StateError, StateResult};
use super::event::{StateTransition, ViewerEffect, ViewerEvent};
use super::model::{GestureLock, Transform, ViewerSession, ViewerState};
use crate::config::GestureConfig;
use crate::geometry::Point;
use crate::input::{classify_drag, DragIntent, GestureInput, NavDirection};

const TRANSITION_HISTORY_LIMIT: usize = 128;

/// Lightbox interaction core: photo index, zoom/pan and gesture lock.
///
/// Every entry point is a synchronous transition on `&mut self` that returns
/// the effects the host has to apply. Nothing here touches a rendering
/// surface, so the whole machine can be driven from tests.
#[derive(Debug)]
pub struct StateMachine {
    session: ViewerSession,
    photo_count: usize,
    config: GestureConfig,
    transition_history: VecDeque<StateTransition>,
}

impl StateMachine {
    pub fn new(photo_count: usize, config: GestureConfig) -> Self {
        Self {
            session: ViewerSession::default(),
            photo_count,
            config,
            transition_history: VecDeque::with_capacity(TRANSITION_HISTORY_LIMIT),
        }
    }

    pub fn session(&self) -> &ViewerSession {
        &self.session
    }

    pub fn state(&self) -> ViewerState {
        self.session.state()
    }

    pub fn photo_count(&self) -> usize {
        self.photo_count
    }

    /// Phase changes, oldest first, capped to the most recent entries.
    pub fn history(&self) -> &VecDeque<StateTransition> {
        &self.transition_history
    }

    pub fn transition(&mut self, event: ViewerEvent) -> StateResult<Vec<ViewerEffect>> {
        match event {
            ViewerEvent::Open { index } => self.open(index),
            ViewerEvent::Select { index } => self.select(index),
            ViewerEvent::Navigate(direction) => Ok(self.navigate(direction)),
            ViewerEvent::Gesture(input) => Ok(self.gesture(input)),
            ViewerEvent::Dismiss => Ok(self.dismiss()),
        }
    }

    pub fn open(&mut self, index: usize) -> StateResult<Vec<ViewerEffect>> {
        self.observe(ViewerEvent::Open { index }, |machine| {
            machine.apply_open(index)
        })
    }

    pub fn select(&mut self, index: usize) -> StateResult<Vec<ViewerEffect>> {
        self.observe(ViewerEvent::Select { index }, |machine| {
            machine.apply_select(index)
        })
    }

    pub fn navigate(&mut self, direction: NavDirection) -> Vec<ViewerEffect> {
        self.observe(ViewerEvent::Navigate(direction), |machine| {
            machine.apply_navigate(direction)
        })
    }

    pub fn gesture(&mut self, input: GestureInput) -> Vec<ViewerEffect> {
        self.observe(ViewerEvent::Gesture(input), |machine| {
            machine.apply_gesture(input)
        })
    }

    pub fn dismiss(&mut self) -> Vec<ViewerEffect> {
        self.observe(ViewerEvent::Dismiss, Self::apply_dismiss)
    }

    fn observe<T>(&mut self, event: ViewerEvent, apply: impl FnOnce(&mut Self) -> T) -> T {
        let from = self.session.state();
        tracing::debug!(from = ?from, event = ?event, "viewer event");
        let output = apply(self);
        let to = self.session.state();
        if from != to {
            self.record(StateTransition::new(from, event, to));
        }
        output
    }

    fn record(&mut self, transition: StateTransition) {
        if self.transition_history.len() == TRANSITION_HISTORY_LIMIT {
            self.transition_history.pop_front();
        }
        self.transition_history.push_back(transition);
    }

    fn check_index(&self, index: usize) -> StateResult<()> {
        if self.photo_count == 0 {
            tracing::warn!(index, "viewer index requested on an empty catalog");
            return Err(StateError::EmptyCatalog);
        }
        if index >= self.photo_count {
            tracing::warn!(index, len = self.photo_count, "viewer index out of range");
            return Err(StateError::InvalidIndex {
                index,
                len: self.photo_count,
            });
        }
        Ok(())
    }

    fn apply_open(&mut self, index: usize) -> StateResult<Vec<ViewerEffect>> {
        self.check_index(index)?;
        let before = self.session.transform();
        self.session.open_at(index);

        let mut effects = vec![ViewerEffect::Opened { index }];
        if !before.is_identity() {
            effects.push(ViewerEffect::TransformChanged {
                transform: Transform::IDENTITY,
            });
        }
        Ok(effects)
    }

    fn apply_select(&mut self, index: usize) -> StateResult<Vec<ViewerEffect>> {
        let Some(current) = self.session.current_index() else {
            tracing::warn!(index, "filmstrip selection while viewer is closed");
            return Err(StateError::ViewerClosed { index });
        };
        self.check_index(index)?;
        if index == current {
            return Ok(Vec::new());
        }

        let before = self.session.transform();
        self.session.end_gesture();
        self.session.show_index(index);

        let mut effects = vec![ViewerEffect::IndexChanged { index }];
        if !before.is_identity() {
            effects.push(ViewerEffect::TransformChanged {
                transform: Transform::IDENTITY,
            });
        }
        Ok(effects)
    }

    fn apply_navigate(&mut self, direction: NavDirection) -> Vec<ViewerEffect> {
        let Some(current) = self.session.current_index() else {
            tracing::debug!(?direction, "navigation ignored while closed");
            return Vec::new();
        };
        if self.session.transform().is_zoomed() {
            tracing::debug!(?direction, "navigation ignored while zoomed");
            return Vec::new();
        }
        self.step(current, direction)
    }

    fn step(&mut self, current: usize, direction: NavDirection) -> Vec<ViewerEffect> {
        let last = self.photo_count.saturating_sub(1);
        let next = match direction {
            NavDirection::Retreat => current.saturating_sub(1),
            NavDirection::Advance => current.saturating_add(1).min(last),
        };
        if next == current {
            tracing::debug!(current, ?direction, "navigation clamped at catalog edge");
            return Vec::new();
        }
        self.session.show_index(next);
        vec![ViewerEffect::IndexChanged { index: next }]
    }

    fn apply_gesture(&mut self, input: GestureInput) -> Vec<ViewerEffect> {
        if !self.session.is_open() {
            tracing::debug!(?input, "gesture ignored while closed");
            return Vec::new();
        }
        match input {
            GestureInput::Start { kind } => {
                if self.session.is_gesturing() {
                    tracing::debug!(?kind, "gesture already in flight");
                } else {
                    self.session.begin_gesture();
                }
                Vec::new()
            }
            GestureInput::Move { movement } => self.apply_drag(movement),
            GestureInput::Pinch { offset } => self.apply_pinch(offset),
            GestureInput::End => self.finish_gesture(),
            GestureInput::Wheel { delta } => self.apply_wheel(delta),
        }
    }

    fn apply_drag(&mut self, movement: Point) -> Vec<ViewerEffect> {
        if !movement.is_finite() {
            tracing::warn!(?movement, "dropping drag frame with non-finite movement");
            return Vec::new();
        }
        let before = self.session.transform();
        let threshold = self.config.axis_threshold;
        let bounds = self.config.pan_bounds;

        let gesture = self.session.begin_gesture();
        match gesture.lock {
            GestureLock::None if before.is_zoomed() => {
                if movement == Point::default() {
                    return Vec::new();
                }
                tracing::debug!(?movement, "gesture locked to panning");
                gesture.lock = GestureLock::Panning;
            }
            GestureLock::None if gesture.navigation_blocked => {
                tracing::debug!(?movement, "navigation blocked for the rest of this gesture");
                return Vec::new();
            }
            GestureLock::None => {
                if let DragIntent::Horizontal(direction) = classify_drag(movement, threshold) {
                    tracing::debug!(?movement, ?direction, "gesture locked to navigating");
                    gesture.lock = GestureLock::Navigating;
                    gesture.pending = Some(direction);
                }
                return Vec::new();
            }
            GestureLock::Navigating => {
                // The swipe direction is whatever the drag says at release.
                gesture.pending = match classify_drag(movement, threshold) {
                    DragIntent::Horizontal(direction) => Some(direction),
                    DragIntent::Ambiguous | DragIntent::Vertical => None,
                };
                return Vec::new();
            }
            GestureLock::Panning => {}
        }

        let target = gesture.pan_origin.translated(movement.x, movement.y);
        self.update_transform(before, before.with_pan(target, bounds))
    }

    fn apply_pinch(&mut self, offset: Option<f64>) -> Vec<ViewerEffect> {
        let Some(offset) = offset.filter(|offset| offset.is_finite()) else {
            tracing::warn!(?offset, "dropping malformed pinch frame");
            return Vec::new();
        };
        let before = self.session.transform();
        let after = before.with_scale(1.0 + offset / self.config.pinch_sensitivity);

        let gesture = self.session.begin_gesture();
        if before.is_zoomed() && !after.is_zoomed() {
            tracing::debug!(lock = ?gesture.lock, "zoom returned to 1; releasing gesture lock");
            gesture.release_lock();
        }
        self.update_transform(before, after)
    }

    fn apply_wheel(&mut self, delta: Point) -> Vec<ViewerEffect> {
        if !delta.is_finite() {
            tracing::warn!(?delta, "dropping wheel frame with non-finite delta");
            return Vec::new();
        }
        if self.session.transform().is_zoomed() {
            tracing::debug!(?delta, "wheel ignored while zoomed");
            return Vec::new();
        }
        let (Some(current), Some(direction)) =
            (self.session.current_index(), NavDirection::from_wheel(delta))
        else {
            return Vec::new();
        };
        self.step(current, direction)
    }

    fn finish_gesture(&mut self) -> Vec<ViewerEffect> {
        let Some(gesture) = self.session.end_gesture() else {
            tracing::debug!("gesture end without an active gesture");
            return Vec::new();
        };
        let Some(current) = self.session.current_index() else {
            return Vec::new();
        };
        match (gesture.lock, gesture.pending) {
            (GestureLock::Navigating, Some(direction))
                if !self.session.transform().is_zoomed() =>
            {
                self.step(current, direction)
            }
            _ => Vec::new(),
        }
    }

    fn apply_dismiss(&mut self) -> Vec<ViewerEffect> {
        if !self.session.is_open() {
            tracing::debug!("dismiss ignored while closed");
            return Vec::new();
        }
        self.session.close();
        vec![ViewerEffect::Closed]
    }

    fn update_transform(&mut self, before: Transform, after: Transform) -> Vec<ViewerEffect> {
        if before == after {
            return Vec::new();
        }
        self.session.set_transform(after);
        vec![ViewerEffect::TransformChanged { transform: after }]
    }
}

impl std::fmt::Display for StateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ViewerState::{:?}", self.session.state())
    }
}
