use egui::{Color32, Context, FontFamily, FontId, Frame, Margin, Rounding, Stroke, Style, TextStyle, Visuals};
use std::collections::BTreeMap;

/// Theme configuration
pub struct Theme {
    pub name: String,
    pub dark_mode: bool,
    /// Size of the monospace font used by readouts
    pub readout_font_size: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Probe Dark".to_string(),
            dark_mode: true,
            readout_font_size: 12.0,
        }
    }
}

/// Apply the application theme
pub fn apply_theme(ctx: &Context, theme: &Theme) {
    let mut style = Style::default();
    let mut visuals = if theme.dark_mode { Visuals::dark() } else { Visuals::light() };

    let panel_bg = Color32::from_rgb(31, 31, 31);
    let widget_bg = Color32::from_rgb(40, 40, 40);
    let text_color = Color32::from_rgb(220, 220, 220);

    if theme.dark_mode {
        visuals.window_fill = panel_bg;
        visuals.panel_fill = panel_bg;
        visuals.faint_bg_color = widget_bg;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text_color);
    }
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);
    visuals.selection.bg_fill = accent_color().linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent_color());
    visuals.popup_shadow.extrusion = 4.0;

    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);

    let mut font_sizes = BTreeMap::new();
    font_sizes.insert(TextStyle::Small, FontId::new(11.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Body, FontId::new(13.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Button, FontId::new(13.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Heading, FontId::new(18.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Monospace, FontId::new(theme.readout_font_size, FontFamily::Monospace));
    style.text_styles = font_sizes;

    ctx.set_style(style);
    ctx.set_visuals(visuals);
}

/// Frame drawn around the floating readout panel
pub fn readout_frame(style: &Style) -> Frame {
    Frame::popup(style)
        .fill(readout_background())
        .stroke(Stroke::new(1.0, accent_color()))
        .inner_margin(Margin::same(6.0))
}

/// Get the accent color for the theme
pub fn accent_color() -> Color32 {
    Color32::from_rgb(100, 150, 250)
}

/// Background of the readout panel; slightly translucent so the view shows through
pub fn readout_background() -> Color32 {
    Color32::from_rgba_unmultiplied(23, 23, 23, 235)
}

/// Background painted behind a view's contents
pub fn view_background() -> Color32 {
    Color32::from_rgb(12, 24, 40)
}

/// Color of the probe crosshair
pub fn probe_color() -> Color32 {
    Color32::from_rgb(250, 200, 60)
}
