//! The floating cursor readout panel and its probe state machine

use std::sync::Arc;

use parking_lot::Mutex;
use pv_core::events::events::{ProbeClosed, ProbeMoved, ProbeOpened};
use pv_core::{EventBus, LocationFormatter, ReadoutSample, ScreenPoint, ViewSurface, WorldLocation};
use tracing::{debug, trace};
use uuid::Uuid;

use super::{compute_readout, Readout};
use crate::config::OverlayConfig;
use crate::dispatch::UiDispatcher;
use crate::placement::{place_panel, Size};

/// Whether the readout panel currently exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Closed,
    Open,
}

/// The floating panel while it exists
#[derive(Debug, Clone, Default)]
pub struct PanelWindow {
    readout: Readout,
    position: Option<ScreenPoint>,
    size: Size,
    raise_requested: bool,
    updates: usize,
}

impl PanelWindow {
    pub fn readout(&self) -> &Readout {
        &self.readout
    }

    /// Top-left corner on screen; `None` until the first update lands
    pub fn position(&self) -> Option<ScreenPoint> {
        self.position
    }

    /// Last measured size
    pub fn size(&self) -> Size {
        self.size
    }

    /// Number of content updates applied
    pub fn updates(&self) -> usize {
        self.updates
    }

    /// Consume a pending raise-to-front request
    pub(crate) fn take_raise(&mut self) -> bool {
        std::mem::take(&mut self.raise_requested)
    }
}

/// Panel storage shared with tasks queued on the UI thread
pub(crate) struct PanelSlot {
    pub(crate) window: Option<PanelWindow>,
    /// Last measured panel width; `None` until laid out
    pub(crate) panel_width: Option<f32>,
    pub(crate) screen: Size,
}

#[derive(Default)]
struct ProbeState {
    last_location: Option<WorldLocation>,
    samples: Vec<ReadoutSample>,
}

/// Tracks a pointer-driven probe over a view and shows what each layer
/// reports there in a small floating panel.
///
/// The panel is opened by a press (or drag), refreshed by every further
/// drag and closed on release. Content is computed on the calling thread;
/// every change to the panel itself is queued onto the UI thread.
pub struct ReadoutOverlay {
    id: Uuid,
    surface: Arc<dyn ViewSurface>,
    formatter: Arc<dyn LocationFormatter>,
    config: OverlayConfig,
    dispatcher: Option<UiDispatcher>,
    slot: Arc<Mutex<PanelSlot>>,
    probe: Mutex<ProbeState>,
    events: Option<EventBus>,
}

impl ReadoutOverlay {
    /// Create an overlay whose panel updates go through `dispatcher`
    pub fn new(surface: Arc<dyn ViewSurface>, dispatcher: UiDispatcher, config: OverlayConfig) -> Self {
        Self::build(surface, Some(dispatcher), config)
    }

    /// Create an overlay that never shows a panel and only computes
    /// readouts (for flythroughs and other embedded read-outs)
    pub fn embedded(surface: Arc<dyn ViewSurface>, config: OverlayConfig) -> Self {
        Self::build(surface, None, config)
    }

    fn build(surface: Arc<dyn ViewSurface>, dispatcher: Option<UiDispatcher>, config: OverlayConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            surface,
            formatter: Arc::new(config.formatter()),
            config,
            dispatcher,
            slot: Arc::new(Mutex::new(PanelSlot {
                window: None,
                panel_width: None,
                screen: Size::new(f32::INFINITY, f32::INFINITY),
            })),
            probe: Mutex::new(ProbeState::default()),
            events: None,
        }
    }

    /// Use a custom location formatter for the header
    pub fn with_formatter(mut self, formatter: Arc<dyn LocationFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Publish probe events on `bus`
    pub fn with_events(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn surface(&self) -> &Arc<dyn ViewSurface> {
        &self.surface
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn state(&self) -> OverlayState {
        if self.slot.lock().window.is_some() {
            OverlayState::Open
        } else {
            OverlayState::Closed
        }
    }

    /// The current probe location, if the last press landed on the view
    pub fn last_location(&self) -> Option<WorldLocation> {
        self.probe.lock().last_location
    }

    /// Samples gathered by the last refresh
    pub fn last_samples(&self) -> Vec<ReadoutSample> {
        self.probe.lock().samples.clone()
    }

    /// Snapshot of the panel, if open
    pub fn panel(&self) -> Option<PanelWindow> {
        self.slot.lock().window.clone()
    }

    /// Pointer pressed or dragged at view-relative screen coordinates.
    ///
    /// A position off the view clears the probe location without touching
    /// the open panel, which keeps its last readout until the pointer is
    /// back over the view.
    pub fn handle_press(&self, screen_x: f32, screen_y: f32) {
        if self.dispatcher.is_some() {
            let opened = {
                let mut slot = self.slot.lock();
                if slot.window.is_none() {
                    slot.window = Some(PanelWindow::default());
                    true
                } else {
                    false
                }
            };
            if opened {
                debug!(view = self.surface.name(), "opening readout panel");
                self.publish(ProbeOpened {
                    view_name: self.surface.name().to_string(),
                });
            }
        }

        let location = match self.surface.screen_to_world(screen_x, screen_y) {
            Ok(location) => Some(location),
            Err(e) => {
                debug!(error = %e, "probe is off the view");
                None
            }
        };
        self.probe.lock().last_location = location;

        if let Some(location) = location {
            self.publish(ProbeMoved {
                view_name: self.surface.name().to_string(),
                location,
            });
        }

        self.refresh();
    }

    /// Pointer released: close the panel. Does nothing when already closed.
    pub fn handle_release(&self) {
        let closed = {
            let mut slot = self.slot.lock();
            let closed = slot.window.take().is_some();
            if closed {
                slot.panel_width = None;
            }
            closed
        };

        if closed {
            debug!(view = self.surface.name(), "closing readout panel");
            self.publish(ProbeClosed {
                view_name: self.surface.name().to_string(),
            });
        }
    }

    /// Recompute the readout and queue a panel update on the UI thread.
    ///
    /// Safe to call from any thread. Does nothing without a probe location
    /// or an open panel; a queued update that finds the panel closed is
    /// dropped.
    pub fn refresh(&self) {
        let Some(dispatcher) = &self.dispatcher else {
            return;
        };
        let Some(location) = self.probe.lock().last_location else {
            return;
        };
        if self.slot.lock().window.is_none() {
            return;
        }

        let mut samples = Vec::new();
        let readout = self.readout_for(&location, self.config.include_displays, &mut samples);
        self.probe.lock().samples = samples;

        let slot = Arc::downgrade(&self.slot);
        let surface = self.surface.clone();
        let margin = self.config.margin;
        dispatcher.dispatch(move || {
            let Some(slot) = slot.upgrade() else {
                return;
            };
            let mut guard = slot.lock();
            let slot = &mut *guard;
            let Some(window) = slot.window.as_mut() else {
                trace!("readout panel closed before update");
                return;
            };
            window.readout = readout;
            window.position = Some(place_panel(&surface.screen_bounds(), window.size, slot.screen, margin));
            window.raise_requested = true;
            window.updates += 1;
        });
    }

    /// Readout text for an arbitrary location
    pub fn compute_readout(
        &self,
        location: Option<&WorldLocation>,
        include_displays: bool,
        include_altitude: bool,
        samples: &mut Vec<ReadoutSample>,
    ) -> Readout {
        compute_readout(
            self.surface.as_ref(),
            self.formatter.as_ref(),
            location,
            include_displays,
            include_altitude,
            samples,
        )
    }

    /// Readout for `location` using the configured altitude setting
    pub fn readout_for(&self, location: &WorldLocation, include_displays: bool, samples: &mut Vec<ReadoutSample>) -> Readout {
        self.compute_readout(Some(location), include_displays, self.config.include_altitude, samples)
    }

    /// Record the screen size; called by the renderer every frame
    pub fn set_screen_size(&self, screen: Size) {
        self.slot.lock().screen = screen;
    }

    /// Record the measured panel size and re-place the panel when its
    /// width or height changed. UI thread only.
    pub fn panel_measured(&self, size: Size) {
        let mut guard = self.slot.lock();
        let slot = &mut *guard;
        let Some(window) = slot.window.as_mut() else {
            return;
        };
        if slot.panel_width == Some(size.width) && window.size == size {
            return;
        }

        slot.panel_width = Some(size.width);
        window.size = size;
        if window.position.is_some() {
            window.position = Some(place_panel(&self.surface.screen_bounds(), size, slot.screen, self.config.margin));
        }
    }

    /// Run `f` against the open panel. UI thread only.
    pub(crate) fn with_panel<R>(&self, f: impl FnOnce(&mut PanelWindow) -> R) -> Option<R> {
        self.slot.lock().window.as_mut().map(f)
    }

    fn publish<E: pv_core::events::Event>(&self, event: E) {
        if let Some(bus) = &self.events {
            bus.publish(event);
        }
    }
}
