mod strip;

pub use strip::VirtualStrip;

use serde::Serialize;

use crate::state::{StateMachine, StateResult, ViewerEffect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollAlign {
    /// Scroll as little as possible.
    #[default]
    Auto,
    Start,
    Center,
    End,
}

/// Scrollable-list capability that can bring an item into view.
pub trait ScrollIntoView {
    fn scroll_to_item(&mut self, index: usize, align: ScrollAlign);
}

/// Keeps the filmstrip centered on the photo being viewed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilmstripSync {
    last_synced: Option<usize>,
}

impl FilmstripSync {
    pub const fn new() -> Self {
        Self { last_synced: None }
    }

    pub fn last_synced(&self) -> Option<usize> {
        self.last_synced
    }

    /// Scrolls `current_index` to the strip center. A closed viewer has
    /// nothing to show, so `None` only forgets the last position.
    pub fn sync(&mut self, current_index: Option<usize>, list: &mut dyn ScrollIntoView) {
        let Some(index) = current_index else {
            self.last_synced = None;
            return;
        };
        tracing::debug!(index, "filmstrip scroll into view");
        list.scroll_to_item(index, ScrollAlign::Center);
        self.last_synced = Some(index);
    }

    /// Scrolls for every effect that changed the shown photo.
    pub fn apply_effects(&mut self, effects: &[ViewerEffect], list: &mut dyn ScrollIntoView) {
        for effect in effects {
            match effect {
                ViewerEffect::Closed => self.sync(None, list),
                other => {
                    if let Some(index) = other.shown_index() {
                        self.sync(Some(index), list);
                    }
                }
            }
        }
    }

    /// A tile click is unambiguous and bypasses gesture interpretation. The
    /// scroll follows from the returned effects.
    pub fn on_tile_click(
        &self,
        index: usize,
        machine: &mut StateMachine,
    ) -> StateResult<Vec<ViewerEffect>> {
        tracing::debug!(index, "filmstrip tile clicked");
        machine.select(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GestureConfig;

    #[derive(Default)]
    struct RecordingList {
        requests: Vec<(usize, ScrollAlign)>,
    }

    impl ScrollIntoView for RecordingList {
        fn scroll_to_item(&mut self, index: usize, align: ScrollAlign) {
            self.requests.push((index, align));
        }
    }

    #[test]
    fn tile_click_selects_and_centers_the_tile() {
        let mut machine = StateMachine::new(10, GestureConfig::default());
        let mut list = RecordingList::default();
        let mut filmstrip = FilmstripSync::new();

        let effects = machine.open(5).expect("open");
        filmstrip.apply_effects(&effects, &mut list);

        let effects = filmstrip
            .on_tile_click(1, &mut machine)
            .expect("tile click should select");
        filmstrip.apply_effects(&effects, &mut list);

        assert_eq!(machine.session().current_index(), Some(1));
        assert_eq!(
            list.requests,
            vec![(5, ScrollAlign::Center), (1, ScrollAlign::Center)]
        );
        assert_eq!(filmstrip.last_synced(), Some(1));
    }

    #[test]
    fn sync_scrolls_first_photo_too() {
        let mut list = RecordingList::default();
        let mut filmstrip = FilmstripSync::new();

        filmstrip.sync(Some(0), &mut list);

        assert_eq!(list.requests, vec![(0, ScrollAlign::Center)]);
    }

    #[test]
    fn sync_without_index_does_not_scroll() {
        let mut list = RecordingList::default();
        let mut filmstrip = FilmstripSync::new();
        filmstrip.sync(Some(3), &mut list);

        filmstrip.sync(None, &mut list);

        assert_eq!(list.requests.len(), 1);
        assert_eq!(filmstrip.last_synced(), None);
    }

    #[test]
    fn tile_click_out_of_range_keeps_current_photo() {
        let mut machine = StateMachine::new(4, GestureConfig::default());
        let filmstrip = FilmstripSync::new();
        machine.open(2).expect("open");

        assert!(filmstrip.on_tile_click(7, &mut machine).is_err());
        assert_eq!(machine.session().current_index(), Some(2));
    }

    #[test]
    fn transform_only_effects_do_not_scroll() {
        let mut list = RecordingList::default();
        let mut filmstrip = FilmstripSync::new();

        filmstrip.apply_effects(
            &[ViewerEffect::TransformChanged {
                transform: crate::state::Transform::IDENTITY,
            }],
            &mut list,
        );

        assert!(list.requests.is_empty());
    }
}
