use egui::{Align2, FontId, Rect, Response, Sense, Stroke, Vec2};

use crate::icons::{paint_icon, IconId};
use crate::theme::Palette;

/// Icon-with-caption toolbar button. Toggle buttons pass their current
/// flag state as `selected`; the pressed-state fill and icon color follow
/// it.
pub struct ToolbarButton<'a> {
    icon: IconId,
    label: &'a str,
    selected: bool,
    palette: &'a Palette,
    icon_size: f32,
}

impl<'a> ToolbarButton<'a> {
    pub fn new(icon: IconId, label: &'a str, palette: &'a Palette) -> Self {
        Self {
            icon,
            label,
            selected: false,
            palette,
            icon_size: 24.0,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn icon_size(mut self, size: f32) -> Self {
        self.icon_size = size.max(12.0);
        self
    }
}

impl egui::Widget for ToolbarButton<'_> {
    fn ui(self, ui: &mut egui::Ui) -> Response {
        let desired_size = Vec2::new(56.0, self.icon_size + 22.0);
        let (rect, response) = ui.allocate_exact_size(desired_size, Sense::click());

        let color = self.palette.button_icon_color(self.selected);
        let painter = ui.painter_at(rect.expand(2.0));

        if self.selected {
            painter.rect_filled(rect, 6.0, self.palette.toolbar_highlight);
            painter.rect_stroke(rect, 6.0, Stroke::new(1.0, self.palette.toolbar_outline));
        } else if response.hovered() {
            painter.rect_filled(rect, 6.0, self.palette.toolbar_highlight.gamma_multiply(0.6));
        }

        let icon_rect = Rect::from_center_size(
            rect.center_top() + Vec2::new(0.0, 4.0 + self.icon_size / 2.0),
            Vec2::splat(self.icon_size),
        );
        paint_icon(&painter, self.icon, icon_rect, color);

        painter.text(
            rect.center_bottom() - Vec2::new(0.0, 8.0),
            Align2::CENTER_CENTER,
            self.label,
            FontId::proportional(12.0),
            color,
        );

        response
    }
}
