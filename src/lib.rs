pub mod app;
pub mod catalog;
pub mod config;
pub mod dismissal;
pub mod driver;
pub mod error;
pub mod filmstrip;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod logging;
pub mod state;
pub use error::{AppError, AppResult};

use crate::app::Lightbox;
use crate::catalog::Catalog;
use crate::driver::{DriverOptions, JsonLinesHost};

/// Entrypoint used by the `lightbox` binary: replays an input script against
/// a mock gallery and prints every host request as JSON.
pub fn run(options: DriverOptions) -> anyhow::Result<()> {
    logging::init();
    tracing::info!("starting lightbox");

    let config = match options.config_path.as_deref() {
        Some(path) => config::load_viewer_config_from(path),
        None => config::load_viewer_config(),
    };
    let events = driver::read_script(options.script_path.as_deref())?;

    let catalog = Catalog::mock(config.demo_catalog_size);
    let host = JsonLinesHost::new(std::io::stdout().lock());
    let mut lightbox = Lightbox::for_client(
        catalog,
        config,
        host,
        options.client_width,
        options.client_height,
    );
    let summary = driver::replay(&mut lightbox, events);

    tracing::info!(
        dispatched = summary.dispatched,
        rejected = summary.rejected,
        final_state = %lightbox.machine(),
        "replay complete"
    );
    Ok(())
}
