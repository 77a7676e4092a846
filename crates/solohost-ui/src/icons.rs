use egui::{Color32, Painter, Pos2, Rect, Stroke};

/// Identifier of a toolbar icon glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconId {
    /// Folder glyph for the open-file action.
    Open,
    /// Pen glyph for the native editor toggle.
    Pen,
    /// Slider-bank glyph for the generic editor toggle.
    Sliders,
}

fn at(rect: Rect, x: f32, y: f32) -> Pos2 {
    Pos2::new(
        rect.min.x + rect.width() * x,
        rect.min.y + rect.height() * y,
    )
}

/// Paint an icon glyph into `rect` with the given foreground color.
pub fn paint_icon(painter: &Painter, icon: IconId, rect: Rect, color: Color32) {
    let stroke = Stroke::new((rect.width() / 12.0).max(1.5), color);
    match icon {
        IconId::Open => {
            // Folder: tab on top of the body outline.
            let body = [
                at(rect, 0.08, 0.30),
                at(rect, 0.92, 0.30),
                at(rect, 0.92, 0.85),
                at(rect, 0.08, 0.85),
                at(rect, 0.08, 0.30),
            ];
            painter.add(egui::Shape::line(body.to_vec(), stroke));
            painter.line_segment([at(rect, 0.08, 0.30), at(rect, 0.08, 0.15)], stroke);
            painter.line_segment([at(rect, 0.08, 0.15), at(rect, 0.42, 0.15)], stroke);
            painter.line_segment([at(rect, 0.42, 0.15), at(rect, 0.50, 0.30)], stroke);
        }
        IconId::Pen => {
            painter.line_segment([at(rect, 0.18, 0.82), at(rect, 0.78, 0.22)], stroke);
            painter.line_segment([at(rect, 0.78, 0.22), at(rect, 0.88, 0.32)], stroke);
            painter.line_segment([at(rect, 0.88, 0.32), at(rect, 0.28, 0.92)], stroke);
            painter.line_segment([at(rect, 0.28, 0.92), at(rect, 0.18, 0.82)], stroke);
            // Nib tip.
            painter.circle_filled(at(rect, 0.15, 0.88), stroke.width, color);
        }
        IconId::Sliders => {
            for (index, knob_y) in [0.30, 0.65, 0.45].into_iter().enumerate() {
                let x = 0.22 + index as f32 * 0.28;
                painter.line_segment([at(rect, x, 0.12), at(rect, x, 0.88)], stroke);
                painter.circle_filled(at(rect, x, knob_y), stroke.width * 1.8, color);
            }
        }
    }
}
