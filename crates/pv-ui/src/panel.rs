//! egui rendering of the floating readout panel

use egui::{pos2, Area, Context, Grid, Id, Order, RichText, Ui};

use crate::placement::Size;
use crate::readout::{Readout, ReadoutOverlay};
use crate::theme;

/// Draws a [`ReadoutOverlay`]'s panel as a foreground area
pub struct ReadoutPanel;

impl ReadoutPanel {
    /// Draw the panel if it is open and has been placed.
    ///
    /// Call once per frame on the UI thread, after draining the UI queue.
    /// The measured size is fed back to the overlay so the next placement
    /// uses the real panel bounds.
    pub fn show(ctx: &Context, overlay: &ReadoutOverlay) {
        let screen = ctx.screen_rect();
        overlay.set_screen_size(Size::new(screen.width(), screen.height()));

        let Some((readout, position, raise)) =
            overlay.with_panel(|window| (window.readout().clone(), window.position(), window.take_raise()))
        else {
            return;
        };
        let Some(position) = position else {
            return;
        };

        let id = Id::new(("readout_panel", overlay.id()));
        let font_size = overlay.config().font_size;
        let response = Area::new(id)
            .order(Order::Foreground)
            .fixed_pos(pos2(position.x, position.y))
            .interactable(false)
            .show(ctx, |ui| {
                theme::readout_frame(ui.style()).show(ui, |ui| {
                    readout_contents(ui, id, &readout, font_size);
                });
            })
            .response;

        if raise {
            ctx.move_to_top(response.layer_id);
        }

        let size = response.rect.size();
        overlay.panel_measured(Size::new(size.x, size.y));
    }
}

fn readout_contents(ui: &mut Ui, id: Id, readout: &Readout, font_size: f32) {
    if readout.is_empty() {
        ui.label(RichText::new(" ").monospace().size(font_size));
        return;
    }

    ui.label(RichText::new(&readout.header).monospace().size(font_size));
    if readout.separator {
        ui.separator();
    }

    Grid::new(id.with("rows"))
        .num_columns(2)
        .spacing([12.0, 2.0])
        .show(ui, |ui| {
            for row in &readout.table.rows {
                ui.label(RichText::new(format!("{}:", row.label)).monospace().size(font_size));
                ui.label(RichText::new(&row.value).monospace().size(font_size));
                ui.end_row();
            }
        });
}
