use egui::{self, Color32, Context, FontId, Rounding, Stroke, TextStyle};
use egui::epaint::Margin;

/// Colors used by the shell. Button text colors double as the toolbar's
/// icon colors for the normal and toggled-on states.
#[derive(Clone)]
pub struct Palette {
    pub background: Color32,
    pub panel: Color32,
    pub toolbar: Color32,
    pub toolbar_highlight: Color32,
    pub toolbar_outline: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub button_text: Color32,
    pub button_text_active: Color32,
    pub accent: Color32,
    pub accent_soft: Color32,
    pub editor_surface: Color32,
    pub editor_outline: Color32,
}

impl Palette {
    pub fn new() -> Self {
        Self {
            background: Color32::from_rgb(30, 30, 30),
            panel: Color32::from_rgb(34, 34, 38),
            toolbar: Color32::from_rgb(36, 36, 42),
            toolbar_highlight: Color32::from_rgb(52, 52, 60),
            toolbar_outline: Color32::from_rgb(88, 88, 98),
            text_primary: Color32::from_rgb(232, 232, 240),
            text_muted: Color32::from_rgb(164, 164, 176),
            button_text: Color32::from_rgb(178, 178, 190),
            button_text_active: Color32::from_rgb(244, 240, 255),
            accent: Color32::from_rgb(138, 43, 226),
            accent_soft: Color32::from_rgb(112, 72, 196),
            editor_surface: Color32::from_rgb(40, 40, 46),
            editor_outline: Color32::from_rgb(64, 64, 76),
        }
    }

    /// Icon/caption color of a toolbar button for the given toggle state.
    pub fn button_icon_color(&self, active: bool) -> Color32 {
        if active {
            self.button_text_active
        } else {
            self.button_text
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide theme, constructed once at startup and passed by reference
/// to views. Applying it installs the shell's egui style.
pub struct Theme {
    palette: Palette,
}

impl Theme {
    pub fn init(ctx: &Context) -> Self {
        let palette = Palette::new();
        let mut style = (*ctx.style()).clone();
        let mut visuals = style.visuals.clone();
        visuals.dark_mode = true;
        visuals.override_text_color = Some(palette.text_primary);
        visuals.panel_fill = palette.background;
        visuals.window_fill = palette.panel;
        visuals.window_stroke = Stroke::new(1.0, palette.toolbar_outline);
        visuals.window_rounding = Rounding::same(10.0);
        visuals.widgets.noninteractive.bg_fill = palette.panel;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_muted);
        visuals.widgets.inactive.bg_fill = palette.toolbar_highlight;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, palette.text_primary);
        visuals.widgets.inactive.rounding = Rounding::same(6.0);
        visuals.widgets.hovered.bg_fill = palette.accent_soft.gamma_multiply(0.6);
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, palette.text_primary);
        visuals.widgets.hovered.rounding = Rounding::same(6.0);
        visuals.widgets.active.bg_fill = palette.accent.gamma_multiply(0.85);
        visuals.widgets.active.fg_stroke = Stroke::new(1.2, palette.text_primary);
        visuals.widgets.active.rounding = Rounding::same(6.0);
        visuals.selection.bg_fill = palette.accent_soft.gamma_multiply(0.85);
        visuals.selection.stroke = Stroke::new(1.0, palette.accent);
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 8.0);
        style.spacing.window_margin = Margin::same(10.0);
        style.text_styles = [
            (TextStyle::Heading, FontId::proportional(22.0)),
            (TextStyle::Body, FontId::proportional(15.0)),
            (TextStyle::Button, FontId::proportional(14.0)),
            (TextStyle::Small, FontId::proportional(12.0)),
            (TextStyle::Monospace, FontId::monospace(13.0)),
        ]
        .into();
        ctx.set_style(style);
        Self { palette }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_icon_color_follows_toggle_state() {
        let palette = Palette::new();
        assert_eq!(palette.button_icon_color(false), palette.button_text);
        assert_eq!(palette.button_icon_color(true), palette.button_text_active);
        assert_ne!(palette.button_text, palette.button_text_active);
    }
}
