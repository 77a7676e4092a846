use egui::{Rect, Stroke, Ui};
use solohost_ui::{IconId, Palette, ToolbarButton};

use crate::layout::EditorFlags;

/// Fixed height of the toolbar band.
pub const TOOLBAR_HEIGHT: f32 = 60.0;

/// The toolbar's item set, declared statically. No optional items exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarItem {
    Open,
    ToggleNativeEditor,
    ToggleGenericEditor,
}

impl ToolbarItem {
    pub fn caption(self) -> &'static str {
        match self {
            ToolbarItem::Open => "Open",
            ToolbarItem::ToggleNativeEditor => "Editor",
            ToolbarItem::ToggleGenericEditor => "Generic",
        }
    }

    pub fn icon(self) -> IconId {
        match self {
            ToolbarItem::Open => IconId::Open,
            ToolbarItem::ToggleNativeEditor => IconId::Pen,
            ToolbarItem::ToggleGenericEditor => IconId::Sliders,
        }
    }

    /// The display flag a toggle item flips; `None` for plain actions.
    pub fn toggle_flag(self) -> Option<EditorFlags> {
        match self {
            ToolbarItem::Open => None,
            ToolbarItem::ToggleNativeEditor => Some(EditorFlags::NATIVE),
            ToolbarItem::ToggleGenericEditor => Some(EditorFlags::GENERIC),
        }
    }
}

/// Item factory. The full set and the default set are the same fixed
/// three items.
pub struct ToolbarFactory;

impl ToolbarFactory {
    pub fn all_items() -> &'static [ToolbarItem] {
        Self::default_items()
    }

    pub fn default_items() -> &'static [ToolbarItem] {
        &[
            ToolbarItem::Open,
            ToolbarItem::ToggleNativeEditor,
            ToolbarItem::ToggleGenericEditor,
        ]
    }
}

/// Result of a toolbar interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    OpenRequested,
    ToggleFlag(EditorFlags),
}

/// Draw the toolbar band and its buttons; report at most one action.
pub fn show(ui: &mut Ui, band: Rect, flags: EditorFlags, palette: &Palette) -> Option<ToolbarAction> {
    let painter = ui.painter_at(band);
    painter.rect_filled(band, 0.0, palette.toolbar);
    painter.line_segment(
        [band.left_bottom(), band.right_bottom()],
        Stroke::new(1.0, palette.toolbar_outline),
    );

    let mut action = None;
    let mut content = ui.child_ui(
        band.shrink2(egui::vec2(8.0, 6.0)),
        egui::Layout::left_to_right(egui::Align::Center),
    );
    for item in ToolbarFactory::default_items() {
        let selected = item
            .toggle_flag()
            .map(|flag| flags.contains(flag))
            .unwrap_or(false);
        let response = content.add(
            ToolbarButton::new(item.icon(), item.caption(), palette).selected(selected),
        );
        if response.clicked() {
            action = Some(match item.toggle_flag() {
                Some(flag) => ToolbarAction::ToggleFlag(flag),
                None => ToolbarAction::OpenRequested,
            });
        }
    }
    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_sets_are_identical_and_fixed() {
        assert_eq!(ToolbarFactory::all_items(), ToolbarFactory::default_items());
        assert_eq!(
            ToolbarFactory::default_items(),
            &[
                ToolbarItem::Open,
                ToolbarItem::ToggleNativeEditor,
                ToolbarItem::ToggleGenericEditor,
            ]
        );
    }

    #[test]
    fn toggle_items_map_to_their_flags() {
        assert_eq!(ToolbarItem::Open.toggle_flag(), None);
        assert_eq!(
            ToolbarItem::ToggleNativeEditor.toggle_flag(),
            Some(EditorFlags::NATIVE)
        );
        assert_eq!(
            ToolbarItem::ToggleGenericEditor.toggle_flag(),
            Some(EditorFlags::GENERIC)
        );
    }
}
