use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

use crate::app::{HostRuntime, InputEvent, Lightbox, RenderFrame};
use crate::dismissal::HitTest;
use crate::filmstrip::ScrollIntoView;

pub const DEFAULT_CLIENT_WIDTH: f64 = 1280.0;
pub const DEFAULT_CLIENT_HEIGHT: f64 = 800.0;

#[derive(Debug, Clone)]
pub struct DriverOptions {
    pub config_path: Option<PathBuf>,
    /// JSON array of input events; stdin when absent.
    pub script_path: Option<PathBuf>,
    pub client_width: f64,
    pub client_height: f64,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            script_path: None,
            client_width: DEFAULT_CLIENT_WIDTH,
            client_height: DEFAULT_CLIENT_HEIGHT,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "output", rename_all = "snake_case")]
enum HostOutput<'a> {
    Render { frame: Option<&'a RenderFrame> },
    ScrollLock { locked: bool },
    Error { message: &'a str },
}

/// Headless host that prints every request as one JSON line.
pub struct JsonLinesHost<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesHost<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn report_error(&mut self, message: &str) {
        self.emit(&HostOutput::Error { message });
    }

    fn emit(&mut self, output: &HostOutput<'_>) {
        let written = serde_json::to_writer(&mut self.out, output)
            .map_err(io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(err) = written {
            tracing::warn!(?err, "failed to write host output");
        }
    }
}

impl<W: Write> HostRuntime for JsonLinesHost<W> {
    fn render(&mut self, frame: Option<&RenderFrame>) {
        self.emit(&HostOutput::Render { frame });
    }

    fn set_scroll_lock(&mut self, locked: bool) {
        self.emit(&HostOutput::ScrollLock { locked });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaySummary {
    pub dispatched: usize,
    pub rejected: usize,
}

/// Feeds a recorded event script through the lightbox. Rejected events are
/// reported to the host and do not stop the replay.
pub fn replay<W, L, T>(
    lightbox: &mut Lightbox<JsonLinesHost<W>, L, T>,
    events: impl IntoIterator<Item = InputEvent>,
) -> ReplaySummary
where
    W: Write,
    L: ScrollIntoView,
    T: HitTest,
{
    let mut summary = ReplaySummary::default();
    for event in events {
        summary.dispatched += 1;
        if let Err(err) = lightbox.dispatch(event) {
            tracing::warn!(%err, "rejected input event");
            lightbox.host_mut().report_error(&err.to_string());
            summary.rejected += 1;
        }
    }
    summary
}

pub fn read_script(path: Option<&Path>) -> anyhow::Result<Vec<InputEvent>> {
    let contents = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input script {}", path.display()))?,
        None => {
            let mut contents = String::new();
            io::stdin()
                .read_to_string(&mut contents)
                .context("failed to read input script from stdin")?;
            contents
        }
    };
    parse_script(&contents)
}

pub fn parse_script(contents: &str) -> anyhow::Result<Vec<InputEvent>> {
    serde_json::from_str(contents).context("input script is not a JSON array of events")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::ViewerConfig;

    fn output_lines(lightbox: Lightbox<JsonLinesHost<Vec<u8>>>) -> Vec<serde_json::Value> {
        let bytes = lightbox.into_host().into_inner();
        String::from_utf8(bytes)
            .expect("utf8 output")
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect()
    }

    #[test]
    fn replay_prints_frames_and_reports_rejections() {
        let events = parse_script(
            r#"[
                { "event": "tile_activated", "index": 9 },
                { "event": "tile_activated", "index": 1 },
                { "event": "key", "key": "ArrowRight" },
                { "event": "key", "key": "Escape" }
            ]"#,
        )
        .expect("script");
        let mut lightbox = Lightbox::for_client(
            Catalog::mock(3),
            ViewerConfig::default(),
            JsonLinesHost::new(Vec::new()),
            DEFAULT_CLIENT_WIDTH,
            DEFAULT_CLIENT_HEIGHT,
        );

        let summary = replay(&mut lightbox, events);

        assert_eq!(
            summary,
            ReplaySummary {
                dispatched: 4,
                rejected: 1
            }
        );
        let lines = output_lines(lightbox);
        let kinds: Vec<&str> = lines
            .iter()
            .map(|line| line["output"].as_str().unwrap_or_default())
            .collect();
        assert_eq!(
            kinds,
            vec![
                "error",
                "scroll_lock",
                "render",
                "render",
                "scroll_lock",
                "render"
            ]
        );
        assert_eq!(lines[3]["frame"]["index"], 2);
        assert_eq!(lines[3]["frame"]["fade_from"], 1);
        assert_eq!(
            lines[3]["frame"]["photo"]["source_url"],
            "https://picsum.photos/600/400?random=2"
        );
        assert!(lines[5]["frame"].is_null());
    }

    #[test]
    fn parse_script_rejects_unknown_events() {
        assert!(parse_script(r#"[{ "event": "teleport" }]"#).is_err());
    }
}
