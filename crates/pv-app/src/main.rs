//! Main application entry point

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use anyhow::Result;
use eframe::egui::{self, Context};
use parking_lot::Mutex;
use pv_core::{AnimationClock, AnimationState, AnimationSubscriber, EventBus, ViewSurface};
use pv_core::events::{events::ProbeMoved, handler_from_fn};
use pv_ui::{
    ui_channel, ComponentGroup, ComponentHolder, DisplayHolder, GroupLayout, OverlayConfig, ReadoutOverlay, Theme,
    UiQueue, ViewHolder,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod demo;

use demo::{demo_times, GlobeSurface, TemperatureLayer, TerrainLayer, WindLayer};

/// Frame step interval while the animation plays
const STEP_INTERVAL: Duration = Duration::from_millis(500);

/// Refreshes open readouts whenever the animation steps
struct ReadoutRefresher {
    overlays: Mutex<Vec<Weak<ReadoutOverlay>>>,
}

impl AnimationSubscriber for ReadoutRefresher {
    fn on_frame_change(&self, state: &AnimationState) {
        debug!(frame = state.frame, "refreshing readouts");
        let mut overlays = self.overlays.lock();
        overlays.retain(|weak| weak.strong_count() > 0);
        for overlay in overlays.iter().filter_map(Weak::upgrade) {
            overlay.refresh();
        }
    }
}

/// Main application state
struct ProbeViewerApp {
    /// Views and display controls
    group: ComponentGroup,

    /// UI-thread end of the readout task queue
    queue: UiQueue,

    clock: Arc<AnimationClock>,

    playing: Arc<AtomicBool>,

    /// Keeps the refresher subscribed for the app's lifetime
    _refresher: Arc<ReadoutRefresher>,
}

impl ProbeViewerApp {
    fn new(cc: &eframe::CreationContext<'_>, config: OverlayConfig) -> Self {
        pv_ui::apply_theme(
            &cc.egui_ctx,
            &Theme {
                readout_font_size: config.font_size,
                ..Theme::default()
            },
        );

        let (dispatcher, queue) = ui_channel();
        let dispatcher = dispatcher.with_repaint(cc.egui_ctx.clone());

        let events = EventBus::new();
        events.subscribe::<ProbeMoved>(handler_from_fn(|event| {
            if let Some(moved) = event.as_any().downcast_ref::<ProbeMoved>() {
                debug!(
                    view = %moved.view_name,
                    lat = moved.location.latitude,
                    lon = moved.location.longitude,
                    "probe moved"
                );
            }
        }));

        let clock = Arc::new(AnimationClock::new(demo_times()));
        clock.set_looping(true);

        let globe = Arc::new(GlobeSurface::new("Globe", clock.clone()));
        globe.add_layer(Arc::new(TemperatureLayer));
        globe.add_layer(Arc::new(WindLayer));
        globe.add_layer(Arc::new(TerrainLayer));

        let overlay = ReadoutOverlay::new(globe.clone(), dispatcher, config).with_events(events.clone());
        let view = ViewHolder::new(overlay).with_painter(demo_painter);

        let refresher = Arc::new(ReadoutRefresher {
            overlays: Mutex::new(vec![Arc::downgrade(view.overlay())]),
        });
        clock.add_subscriber(refresher.clone());

        let mut displays = ComponentGroup::new("Displays").with_layout(GroupLayout::VSplit);
        for layer in globe.active_layers() {
            let globe = globe.clone();
            let holder = DisplayHolder::new(layer).on_remove(move |name| globe.remove_layer(name));
            if let Err(e) = displays.add(Box::new(holder)) {
                warn!(error = %e, "adding display");
            }
        }

        let mut group = ComponentGroup::new("Main").with_events(events);
        for holder in [Box::new(view) as Box<dyn ComponentHolder>, Box::new(displays)] {
            if let Err(e) = group.add(holder) {
                warn!(error = %e, "adding component");
            }
        }

        let playing = Arc::new(AtomicBool::new(false));
        spawn_stepper(Arc::downgrade(&clock), playing.clone());

        Self {
            group,
            queue,
            clock,
            playing,
            _refresher: refresher,
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let playing = self.playing.load(Ordering::Relaxed);
            if ui.button(if playing { "Pause" } else { "Play" }).clicked() {
                self.playing.store(!playing, Ordering::Relaxed);
            }
            if ui.button("<").clicked() {
                let _ = self.clock.previous();
            }
            if ui.button(">").clicked() {
                let _ = self.clock.next();
            }

            let current = self.clock.current();
            ui.label(format!(
                "Frame {}/{}  t+{:02}h",
                current.frame + 1,
                self.clock.frame_count(),
                (current.time / 3600.0) as u32
            ));

            ui.separator();
            let mut layout = self.group.layout();
            egui::ComboBox::from_label("Layout")
                .selected_text(format!("{:?}", layout))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut layout, GroupLayout::Tabs, "Tabs");
                    ui.selectable_value(&mut layout, GroupLayout::HSplit, "HSplit");
                    ui.selectable_value(&mut layout, GroupLayout::VSplit, "VSplit");
                    ui.selectable_value(&mut layout, GroupLayout::Grid { columns: 2 }, "Grid");
                });
            if layout != self.group.layout() {
                self.group.set_layout(layout);
            }
        });
    }
}

impl eframe::App for ProbeViewerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        // Readout updates queued by pointer handlers and the stepper thread
        self.queue.drain();

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Space) {
                self.playing.fetch_xor(true, Ordering::Relaxed);
            }
            if i.key_pressed(egui::Key::ArrowLeft) {
                let _ = self.clock.previous();
            }
            if i.key_pressed(egui::Key::ArrowRight) {
                let _ = self.clock.next();
            }
        });

        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.controls(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.group.make_contents(ui));

        if self.playing.load(Ordering::Relaxed) {
            ctx.request_repaint_after(STEP_INTERVAL);
        }
    }
}

/// Step the clock from a background thread while playing. The thread ends
/// once the clock is dropped.
fn spawn_stepper(clock: Weak<AnimationClock>, playing: Arc<AtomicBool>) {
    std::thread::spawn(move || loop {
        std::thread::sleep(STEP_INTERVAL);
        let Some(clock) = clock.upgrade() else {
            break;
        };
        if playing.load(Ordering::Relaxed) {
            let _ = clock.next();
        }
    });
}

/// Graticule every 30 degrees
fn demo_painter(painter: &egui::Painter, rect: egui::Rect) {
    let stroke = egui::Stroke::new(0.5, egui::Color32::from_gray(70));
    for i in 1..12 {
        let x = rect.left() + rect.width() * i as f32 / 12.0;
        painter.line_segment([egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())], stroke);
    }
    for i in 1..6 {
        let y = rect.top() + rect.height() * i as f32 / 6.0;
        painter.line_segment([egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)], stroke);
    }
}

/// Overlay settings from the file named by the first argument or
/// `PROBEVIEW_CONFIG`, falling back to defaults
fn load_config() -> OverlayConfig {
    let path = std::env::args().nth(1).or_else(|| std::env::var("PROBEVIEW_CONFIG").ok());
    match path {
        Some(path) => match OverlayConfig::load(&path) {
            Ok(config) => {
                info!(%path, "loaded overlay configuration");
                config
            }
            Err(e) => {
                warn!(%path, error = %e, "using default overlay configuration");
                OverlayConfig::default()
            }
        },
        None => OverlayConfig::default(),
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting probe viewer");
    let config = load_config();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([640.0, 480.0]),
        default_theme: eframe::Theme::Dark,
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        "Probe Viewer",
        options,
        Box::new(move |cc| Box::new(ProbeViewerApp::new(cc, config))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
