use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, PhotoRecord};
use crate::config::ViewerConfig;
use crate::dismissal::{DismissTrigger, DismissalHandler, HitRegion, HitTest, OverlayLayout};
use crate::error::AppResult;
use crate::filmstrip::{FilmstripSync, ScrollIntoView, VirtualStrip};
use crate::geometry::{PanOffset, Point};
use crate::grid::GridPresenter;
use crate::input::{
    resolve_shortcut, GestureInput, GestureKind, NavDirection, ShortcutAction, ShortcutKey,
};
use crate::state::{StateMachine, ViewerEffect, ViewerSession};

/// What the host should draw for the open viewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub index: usize,
    pub photo: PhotoRecord,
    pub scale: f64,
    pub pan: PanOffset,
    /// Photo that was on screen before this one; the host cross-fades from it.
    pub fade_from: Option<usize>,
}

/// Effects the lightbox asks of the surrounding UI runtime.
pub trait HostRuntime {
    /// `None` clears the overlay.
    fn render(&mut self, frame: Option<&RenderFrame>);
    /// Locks document scrolling behind the overlay.
    fn set_scroll_lock(&mut self, locked: bool);
}

/// Raw UI input as delivered by the host runtime.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InputEvent {
    TileActivated { index: usize },
    PointerDown { x: f64, y: f64 },
    PinchStart,
    /// Running drag displacement since the pointer went down.
    Move { x: f64, y: f64 },
    Pinch { offset: Option<f64> },
    GestureEnd,
    Wheel { dx: f64, dy: f64 },
    /// DOM `KeyboardEvent.key` value.
    Key { key: String },
    FilmstripClick { index: usize },
    CloseControl,
}

pub struct Lightbox<H, L = VirtualStrip, T = OverlayLayout>
where
    H: HostRuntime,
    L: ScrollIntoView,
    T: HitTest,
{
    catalog: Catalog,
    config: ViewerConfig,
    machine: StateMachine,
    filmstrip: FilmstripSync,
    dismissal: DismissalHandler<T>,
    strip: L,
    host: H,
    /// A pointer went down on the photo or a pinch started; only then do
    /// moves and gesture ends reach the state machine.
    gesture_armed: bool,
}

impl<H: HostRuntime> Lightbox<H> {
    /// Lightbox with the built-in strip model and overlay layout.
    pub fn for_client(
        catalog: Catalog,
        config: ViewerConfig,
        host: H,
        client_width: f64,
        client_height: f64,
    ) -> Self {
        let strip = VirtualStrip::for_client(catalog.len(), &config.filmstrip, client_width);
        let layout = OverlayLayout::compute(client_width, client_height, &config.filmstrip);
        Self::new(catalog, config, host, strip, layout)
    }

    pub fn resize(&mut self, client_width: f64, client_height: f64) {
        let filmstrip = self.config.filmstrip;
        self.strip
            .set_viewport_width(filmstrip.width_ratio * client_width);
        *self.dismissal.hit_test_mut() =
            OverlayLayout::compute(client_width, client_height, &filmstrip);
        self.filmstrip
            .sync(self.machine.session().current_index(), &mut self.strip);
    }
}

impl<H, L, T> Lightbox<H, L, T>
where
    H: HostRuntime,
    L: ScrollIntoView,
    T: HitTest,
{
    pub fn new(catalog: Catalog, config: ViewerConfig, host: H, strip: L, hit_test: T) -> Self {
        let machine = StateMachine::new(catalog.len(), config.gesture);
        Self {
            catalog,
            config,
            machine,
            filmstrip: FilmstripSync::new(),
            dismissal: DismissalHandler::new(hit_test),
            strip,
            host,
            gesture_armed: false,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self) -> &ViewerSession {
        self.machine.session()
    }

    pub fn machine(&self) -> &StateMachine {
        &self.machine
    }

    pub fn grid(&self) -> GridPresenter<'_> {
        GridPresenter::new(&self.catalog, self.config.grid)
    }

    pub fn strip(&self) -> &L {
        &self.strip
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn frame(&self) -> Option<RenderFrame> {
        self.render_frame(None)
    }

    /// Feeds one input event through the viewer. Invalid indices come back as
    /// errors; everything else degrades to "no visual change".
    pub fn dispatch(&mut self, event: InputEvent) -> AppResult<Vec<ViewerEffect>> {
        let was_open = self.machine.session().is_open();
        let previous_index = self.machine.session().current_index();

        let effects = match event {
            InputEvent::TileActivated { index } => {
                GridPresenter::new(&self.catalog, self.config.grid)
                    .activate(index, &mut self.machine)?
            }
            InputEvent::FilmstripClick { index } => {
                self.gesture_armed = false;
                self.filmstrip.on_tile_click(index, &mut self.machine)?
            }
            InputEvent::PointerDown { x, y } => self.pointer_down(Point::new(x, y)),
            InputEvent::PinchStart => self.pinch(GestureInput::Start {
                kind: GestureKind::Pinch,
            }),
            InputEvent::Move { x, y } => {
                if !self.gesture_armed {
                    tracing::debug!(x, y, "move without a pointer down on the photo");
                    return Ok(Vec::new());
                }
                self.machine.gesture(GestureInput::Move {
                    movement: Point::new(x, y),
                })
            }
            InputEvent::Pinch { offset } => self.pinch(GestureInput::Pinch { offset }),
            InputEvent::GestureEnd => {
                if !std::mem::take(&mut self.gesture_armed) {
                    return Ok(Vec::new());
                }
                self.machine.gesture(GestureInput::End)
            }
            InputEvent::Wheel { dx, dy } => self.machine.gesture(GestureInput::Wheel {
                delta: Point::new(dx, dy),
            }),
            InputEvent::Key { key } => self.key(&key),
            InputEvent::CloseControl => self.dismiss(DismissTrigger::CloseControl),
        };

        self.apply(&effects, was_open, previous_index);
        Ok(effects)
    }

    fn pointer_down(&mut self, point: Point) -> Vec<ViewerEffect> {
        self.gesture_armed = false;
        if !self.machine.session().is_open() {
            return Vec::new();
        }
        if self.dismissal.should_dismiss(DismissTrigger::PointerDown(point)) {
            return self.machine.dismiss();
        }
        match self.dismissal.classify(point) {
            HitRegion::Image => {
                self.gesture_armed = true;
                self.machine.gesture(GestureInput::Start {
                    kind: GestureKind::Drag,
                })
            }
            HitRegion::Backdrop | HitRegion::Filmstrip | HitRegion::Control => Vec::new(),
        }
    }

    fn pinch(&mut self, input: GestureInput) -> Vec<ViewerEffect> {
        if self.machine.session().is_open() {
            self.gesture_armed = true;
        }
        self.machine.gesture(input)
    }

    fn key(&mut self, key: &str) -> Vec<ViewerEffect> {
        let Some(key) = ShortcutKey::from_dom_key(key) else {
            return Vec::new();
        };
        match resolve_shortcut(key, self.machine.session().is_open()) {
            Some(ShortcutAction::ViewerRetreat) => self.machine.navigate(NavDirection::Retreat),
            Some(ShortcutAction::ViewerAdvance) => self.machine.navigate(NavDirection::Advance),
            Some(ShortcutAction::ViewerDismiss) => self.dismiss(DismissTrigger::EscapeKey),
            None => Vec::new(),
        }
    }

    fn dismiss(&mut self, trigger: DismissTrigger) -> Vec<ViewerEffect> {
        if self.dismissal.should_dismiss(trigger) {
            self.machine.dismiss()
        } else {
            Vec::new()
        }
    }

    fn apply(&mut self, effects: &[ViewerEffect], was_open: bool, previous_index: Option<usize>) {
        if effects.is_empty() {
            return;
        }
        self.filmstrip.apply_effects(effects, &mut self.strip);

        let is_open = self.machine.session().is_open();
        if !is_open {
            self.gesture_armed = false;
        }
        if is_open != was_open {
            tracing::debug!(locked = is_open, "document scroll lock");
            self.host.set_scroll_lock(is_open);
        }

        let fade_from = match (previous_index, self.machine.session().current_index()) {
            (Some(previous), Some(current)) if previous != current => Some(previous),
            _ => None,
        };
        let frame = self.render_frame(fade_from);
        self.host.render(frame.as_ref());
    }

    fn render_frame(&self, fade_from: Option<usize>) -> Option<RenderFrame> {
        let session = self.machine.session();
        let index = session.current_index()?;
        let photo = self.catalog.get(index)?.clone();
        Some(RenderFrame {
            index,
            photo,
            scale: session.zoom_scale(),
            pan: session.pan_offset(),
            fade_from,
        })
    }
}
