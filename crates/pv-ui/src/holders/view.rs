use std::sync::Arc;

use egui::{pos2, Align2, FontId, Painter, Pos2, Rect, Sense, Stroke, Ui};
use pv_core::{ScreenPoint, ViewBounds};
use tracing::debug;
use uuid::Uuid;

use super::{categories, ComponentHolder};
use crate::panel::ReadoutPanel;
use crate::readout::ReadoutOverlay;
use crate::theme;

/// Paints a view's contents into its rect
pub type ViewPainter = Box<dyn Fn(&Painter, Rect)>;

/// Holds a probe-able view and its cursor readout overlay
pub struct ViewHolder {
    id: Uuid,
    name: String,
    overlay: Arc<ReadoutOverlay>,
    painter: Option<ViewPainter>,
    /// View-relative pointer position while the probe button is held
    probe_at: Option<Pos2>,
    removed: bool,
}

impl ViewHolder {
    pub fn new(overlay: ReadoutOverlay) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: overlay.surface().name().to_string(),
            overlay: Arc::new(overlay),
            painter: None,
            probe_at: None,
            removed: false,
        }
    }

    pub fn with_painter(mut self, painter: impl Fn(&Painter, Rect) + 'static) -> Self {
        self.painter = Some(Box::new(painter));
        self
    }

    /// Shared handle to the overlay, e.g. for a background refresher
    pub fn overlay(&self) -> &Arc<ReadoutOverlay> {
        &self.overlay
    }

    /// Feed the pointer state for this frame: `Some` with the view-relative
    /// position while the probe button is held, `None` otherwise.
    pub fn pointer_update(&mut self, pointer: Option<Pos2>) {
        match (pointer, self.probe_at) {
            (Some(pos), last) if last != Some(pos) => {
                self.overlay.handle_press(pos.x, pos.y);
                self.probe_at = Some(pos);
            }
            (None, Some(_)) => {
                self.overlay.handle_release();
                self.probe_at = None;
            }
            _ => {}
        }
    }

    fn paint_probe(&self, painter: &Painter, rect: Rect) {
        let Some(at) = self.probe_at else {
            return;
        };
        let center = rect.min + at.to_vec2();
        let stroke = Stroke::new(1.0, theme::probe_color());
        painter.line_segment([pos2(center.x - 6.0, center.y), pos2(center.x + 6.0, center.y)], stroke);
        painter.line_segment([pos2(center.x, center.y - 6.0), pos2(center.x, center.y + 6.0)], stroke);
    }
}

impl ComponentHolder for ViewHolder {
    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> &str {
        categories::VIEWS
    }

    fn type_name(&self) -> &str {
        "View"
    }

    fn do_remove(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;
        self.probe_at = None;
        self.overlay.handle_release();
        debug!(view = %self.name, "removing view");
    }

    fn make_contents(&mut self, ui: &mut Ui) {
        // Inside scroll areas the available size is unbounded
        let size = ui.available_size().min(ui.clip_rect().size());
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
        self.overlay.surface().set_screen_bounds(ViewBounds {
            origin: ScreenPoint::new(rect.min.x, rect.min.y),
            width: rect.width(),
            height: rect.height(),
        });

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, theme::view_background());
        if let Some(paint) = &self.painter {
            paint(&painter, rect);
        }
        painter.text(
            rect.left_top() + egui::vec2(6.0, 4.0),
            Align2::LEFT_TOP,
            &self.name,
            FontId::proportional(12.0),
            theme::accent_color(),
        );

        let pointer = if response.is_pointer_button_down_on() {
            response.interact_pointer_pos().map(|pos| pos - rect.min.to_vec2())
        } else {
            None
        };
        self.pointer_update(pointer);
        self.paint_probe(&painter, rect);

        ReadoutPanel::show(ui.ctx(), &self.overlay);
    }
}
