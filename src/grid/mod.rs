use serde::Serialize;

use crate::catalog::Catalog;
use crate::config::GridConfig;
use crate::state::{StateMachine, StateResult, ViewerEffect};

/// One clickable thumbnail in the gallery grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridTile<'a> {
    pub index: usize,
    pub id: u64,
    pub source_url: &'a str,
}

pub struct GridPresenter<'a> {
    catalog: &'a Catalog,
    config: GridConfig,
}

impl<'a> GridPresenter<'a> {
    pub fn new(catalog: &'a Catalog, config: GridConfig) -> Self {
        Self { catalog, config }
    }

    /// Activation targets in catalog order.
    pub fn tiles(&self) -> impl Iterator<Item = GridTile<'a>> + 'a {
        let catalog = self.catalog;
        catalog
            .iter()
            .enumerate()
            .map(|(index, photo)| GridTile {
                index,
                id: photo.id,
                source_url: photo.source_url.as_str(),
            })
    }

    /// Opens the viewer at the activated tile.
    pub fn activate(
        &self,
        index: usize,
        machine: &mut StateMachine,
    ) -> StateResult<Vec<ViewerEffect>> {
        let id = self.catalog.get(index).map(|photo| photo.id);
        tracing::debug!(index, ?id, "grid tile activated");
        machine.open(index)
    }

    /// `repeat(auto-fit, minmax(min_tile_width, 1fr))` with the configured gap.
    pub fn column_count(&self, container_width: f64) -> usize {
        grid_column_count(container_width, &self.config)
    }
}

pub fn grid_column_count(container_width: f64, config: &GridConfig) -> usize {
    if !(container_width > 0.0) || !(config.min_tile_width > 0.0) {
        return 1;
    }
    let track = config.min_tile_width + config.gap.max(0.0);
    let columns = ((container_width + config.gap.max(0.0)) / track).floor() as usize;
    columns.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PhotoRecord;
    use crate::config::GestureConfig;
    use crate::state::StateError;

    #[test]
    fn tiles_follow_catalog_order() {
        let catalog = Catalog::new(vec![
            PhotoRecord::new(7, "seven"),
            PhotoRecord::new(3, "three"),
            PhotoRecord::new(9, "nine"),
        ])
        .expect("catalog");
        let presenter = GridPresenter::new(&catalog, GridConfig::default());

        let tiles: Vec<GridTile<'_>> = presenter.tiles().collect();

        assert_eq!(tiles.len(), 3);
        assert_eq!(
            tiles[1],
            GridTile {
                index: 1,
                id: 3,
                source_url: "three"
            }
        );
        assert_eq!(
            tiles.iter().map(|tile| tile.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn empty_catalog_renders_no_tiles_and_rejects_activation() {
        let catalog = Catalog::default();
        let presenter = GridPresenter::new(&catalog, GridConfig::default());
        let mut machine = StateMachine::new(catalog.len(), GestureConfig::default());

        assert_eq!(presenter.tiles().count(), 0);
        assert_eq!(
            presenter.activate(0, &mut machine),
            Err(StateError::EmptyCatalog)
        );
        assert!(!machine.session().is_open());
    }

    #[test]
    fn activate_opens_viewer_at_tile_index() {
        let catalog = Catalog::mock(5);
        let presenter = GridPresenter::new(&catalog, GridConfig::default());
        let mut machine = StateMachine::new(catalog.len(), GestureConfig::default());

        let effects = presenter.activate(4, &mut machine).expect("activate");

        assert_eq!(effects, vec![ViewerEffect::Opened { index: 4 }]);
        assert_eq!(machine.session().current_index(), Some(4));
    }

    #[test]
    fn column_count_fits_minimum_tile_width_with_gaps() {
        let config = GridConfig::default();
        assert_eq!(grid_column_count(1200.0, &config), 4);
        assert_eq!(grid_column_count(1048.0, &config), 4);
        assert_eq!(grid_column_count(1047.0, &config), 3);
        assert_eq!(grid_column_count(200.0, &config), 1);
        assert_eq!(grid_column_count(0.0, &config), 1);
    }
}
