use egui::{
    Align2, Color32, Context, FontId, Id, Order, Pos2, Rect, RichText, Sense, Stroke, Ui, Vec2,
    ViewportCommand,
};
use solohost_plugin_host::{EditorEvent, EditorHandle, PluginInstance, PluginSlot};
use solohost_ui::{Palette, Theme};
use tracing::{debug, info};

use crate::layout::{compute_layout, ContentLayout, EditorFlags, LayoutInput};
use crate::toolbar::{self, ToolbarAction, TOOLBAR_HEIGHT};

const GENERIC_EDITOR_WIDTH: f32 = 420.0;
const GENERIC_HEADER_HEIGHT: f32 = 64.0;
const GENERIC_ROW_HEIGHT: f32 = 28.0;

/// The generic parameter-list editor view. Its size starts at the natural
/// size for its row count and is mutated when a layout pass forces the
/// height to match the native editor next to it.
pub(crate) struct GenericEditor {
    size: Vec2,
}

impl GenericEditor {
    pub(crate) fn new(rows: usize) -> Self {
        Self {
            size: Vec2::new(
                GENERIC_EDITOR_WIDTH,
                GENERIC_HEADER_HEIGHT + rows as f32 * GENERIC_ROW_HEIGHT,
            ),
        }
    }

    pub(crate) fn size(&self) -> Vec2 {
        self.size
    }
}

/// Main window state: toolbar, display flags, and the currently installed
/// editor views.
pub struct MainWindow {
    flags: EditorFlags,
    native_editor: Option<EditorHandle>,
    generic_editor: Option<GenericEditor>,
    open_notice: bool,
    last_content_size: Option<Vec2>,
}

impl MainWindow {
    pub fn new() -> Self {
        Self {
            flags: EditorFlags::NATIVE,
            native_editor: None,
            generic_editor: None,
            open_notice: false,
            last_content_size: None,
        }
    }

    /// Install editor views for a freshly created plugin instance.
    pub fn install_editor(&mut self, instance: &mut PluginInstance) {
        self.remove_editor_views();
        let handle = instance.create_editor_if_needed();
        self.native_editor = Some(handle);
        self.generic_editor = Some(GenericEditor::new(instance.parameters().len()));
        info!(plugin = instance.name(), "editor views installed");
    }

    /// Remove and release both editor views.
    pub fn uninstall_editor(&mut self) {
        self.remove_editor_views();
        debug!("editor views removed");
    }

    fn remove_editor_views(&mut self) {
        self.native_editor = None;
        self.generic_editor = None;
    }

    pub fn flags(&self) -> EditorFlags {
        self.flags
    }

    /// Update which editor views are requested visible. No-op when
    /// unchanged.
    pub fn set_show_editor_flags(&mut self, flags: EditorFlags) {
        if self.flags == flags {
            return;
        }
        debug!(?flags, "display flags changed");
        self.flags = flags;
    }

    fn toggle(&mut self, flag: EditorFlags) {
        self.set_show_editor_flags(self.flags ^ flag);
    }

    /// Inputs for a layout pass. A requested view that is absent shows up
    /// as `None` here and is ignored for the pass; the stored flags are
    /// not mutated.
    pub(crate) fn layout_input(&self) -> LayoutInput {
        LayoutInput {
            toolbar_height: TOOLBAR_HEIGHT,
            flags: self.flags,
            native_size: self.native_editor.as_ref().map(|handle| {
                let [w, h] = handle.size();
                Vec2::new(w as f32, h as f32)
            }),
            generic_size: self.generic_editor.as_ref().map(GenericEditor::size),
        }
    }

    /// Draw the window contents for this frame.
    pub fn show(&mut self, ctx: &Context, slot: &mut PluginSlot, theme: &Theme) {
        if let Some(instance) = slot.instance_mut() {
            instance.pump_editor();
        }

        // Geometry observer: a resized surface triggers a fresh layout
        // pass, a closed surface drops the view.
        let events = self
            .native_editor
            .as_ref()
            .map(|handle| handle.drain_events())
            .unwrap_or_default();
        for event in events {
            match event {
                EditorEvent::Resized { width, height } => {
                    debug!(width, height, "native editor resized");
                }
                EditorEvent::Closed => {
                    self.native_editor = None;
                    break;
                }
            }
        }

        let layout = compute_layout(&self.layout_input());
        self.apply_forced_generic_size(&layout);
        if layout.content_size.x > 0.0 && self.last_content_size != Some(layout.content_size) {
            ctx.send_viewport_cmd(ViewportCommand::InnerSize(layout.content_size));
            self.last_content_size = Some(layout.content_size);
        }

        let palette = theme.palette();
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(palette.background))
            .show(ctx, |ui| {
                let origin = ui.max_rect().min.to_vec2();

                // The toolbar band spans at least the window width so an
                // empty shell still shows its buttons.
                let toolbar_band = layout.toolbar.translate(origin);
                let band = Rect::from_min_size(
                    toolbar_band.min,
                    Vec2::new(
                        toolbar_band.width().max(ui.max_rect().width()),
                        toolbar_band.height(),
                    ),
                );
                if let Some(action) = toolbar::show(ui, band, self.flags, palette) {
                    match action {
                        ToolbarAction::OpenRequested => self.open_notice = true,
                        ToolbarAction::ToggleFlag(flag) => self.toggle(flag),
                    }
                }

                // Panel bands behind the editor views.
                for panel in [layout.native_panel, layout.generic_panel]
                    .into_iter()
                    .flatten()
                {
                    ui.painter()
                        .rect_filled(panel.translate(origin), 0.0, palette.panel);
                }

                if let (Some(view), Some(handle)) = (layout.native_view, &self.native_editor) {
                    draw_native_surface(
                        ui,
                        view.translate(origin),
                        handle,
                        slot.instance(),
                        palette,
                    );
                }

                if let Some(view) = layout.generic_view {
                    if let Some(instance) = slot.instance_mut() {
                        draw_generic_editor(ui, view.translate(origin), instance, palette);
                    }
                }
            });

        if self.open_notice {
            self.show_open_notice(ctx);
        }
    }

    fn apply_forced_generic_size(&mut self, layout: &ContentLayout) {
        if let (Some(generic), Some(size)) = (self.generic_editor.as_mut(), layout.generic_view_size)
        {
            generic.size = size;
        }
    }

    /// The open action is an intentional stub: its entire behavior is a
    /// blocking notice.
    fn show_open_notice(&mut self, ctx: &Context) {
        let screen = ctx.screen_rect();
        egui::Area::new(Id::new("open-notice-backdrop"))
            .order(Order::Middle)
            .fixed_pos(Pos2::ZERO)
            .show(ctx, |ui| {
                // Swallow clicks behind the notice.
                ui.allocate_rect(screen, Sense::click());
                ui.painter()
                    .rect_filled(screen, 0.0, Color32::from_black_alpha(120));
            });

        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("Not implemented yet");
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        self.open_notice = false;
                    }
                });
            });
    }
}

impl Default for MainWindow {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_native_surface(
    ui: &mut Ui,
    rect: Rect,
    handle: &EditorHandle,
    instance: Option<&PluginInstance>,
    palette: &Palette,
) {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, palette.editor_surface);
    painter.rect_stroke(rect, 4.0, Stroke::new(1.0, palette.editor_outline));

    if let Some(instance) = instance {
        painter.text(
            rect.center() - Vec2::new(0.0, 10.0),
            Align2::CENTER_CENTER,
            instance.name(),
            FontId::proportional(18.0),
            palette.text_primary,
        );
        let [w, h] = handle.size();
        painter.text(
            rect.center() + Vec2::new(0.0, 12.0),
            Align2::CENTER_CENTER,
            format!("{} surface, {}x{}", instance.format(), w, h),
            FontId::proportional(12.0),
            palette.text_muted,
        );
    }

    // Drag grip in the corner; the resize request round-trips through the
    // instance and comes back as a geometry event.
    let grip = Rect::from_min_size(rect.max - Vec2::new(14.0, 14.0), Vec2::new(12.0, 12.0));
    let response = ui.interact(grip, ui.id().with("native-editor-grip"), Sense::drag());
    for step in 0..3 {
        let offset = 4.0 * step as f32;
        painter.line_segment(
            [
                Pos2::new(grip.max.x - offset, grip.max.y),
                Pos2::new(grip.max.x, grip.max.y - offset),
            ],
            Stroke::new(1.0, palette.text_muted),
        );
    }
    if response.dragged() {
        let [w, h] = handle.size();
        let target = Vec2::new(w as f32, h as f32) + response.drag_delta();
        handle.request_resize(
            target.x.max(160.0).round() as u32,
            target.y.max(120.0).round() as u32,
        );
    }
}

fn draw_generic_editor(ui: &mut Ui, rect: Rect, instance: &mut PluginInstance, palette: &Palette) {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, palette.panel);
    painter.rect_stroke(rect, 4.0, Stroke::new(1.0, palette.editor_outline));

    let mut content = ui.child_ui(
        rect.shrink(10.0),
        egui::Layout::top_down(egui::Align::Min),
    );
    content.label(RichText::new(instance.name()).strong());
    content.label(
        RichText::new(format!("{} parameters", instance.parameters().len()))
            .color(palette.text_muted)
            .small(),
    );
    content.separator();
    egui::ScrollArea::vertical()
        .max_height((rect.height() - GENERIC_HEADER_HEIGHT).max(0.0))
        .show(&mut content, |ui| {
            for index in 0..instance.parameters().len() {
                let param = instance.parameters()[index].clone();
                let mut value = param.value;
                let slider = egui::Slider::new(&mut value, param.min..=param.max)
                    .text(param.name.clone());
                if ui.add(slider).changed() {
                    instance.set_parameter(index, value);
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_flags_request_the_native_editor() {
        let window = MainWindow::new();
        assert_eq!(window.flags(), EditorFlags::NATIVE);
    }

    #[test]
    fn toggling_flips_single_bits() {
        let mut window = MainWindow::new();
        window.toggle(EditorFlags::GENERIC);
        assert_eq!(window.flags(), EditorFlags::NATIVE | EditorFlags::GENERIC);
        window.toggle(EditorFlags::NATIVE);
        assert_eq!(window.flags(), EditorFlags::GENERIC);
    }

    #[test]
    fn setting_identical_flags_is_a_no_op() {
        let mut window = MainWindow::new();
        window.set_show_editor_flags(EditorFlags::NATIVE);
        assert_eq!(window.flags(), EditorFlags::NATIVE);
    }

    #[test]
    fn absent_views_are_ignored_by_layout_but_flags_are_kept() {
        let mut window = MainWindow::new();
        window.set_show_editor_flags(EditorFlags::NATIVE | EditorFlags::GENERIC);

        let layout = compute_layout(&window.layout_input());
        assert!(layout.native_panel.is_none());
        assert!(layout.generic_panel.is_none());
        // The stored mask is untouched.
        assert_eq!(window.flags(), EditorFlags::NATIVE | EditorFlags::GENERIC);
    }

    #[test]
    fn generic_editor_natural_size_grows_with_rows() {
        let small = GenericEditor::new(4);
        let large = GenericEditor::new(16);
        assert_eq!(small.size().x, large.size().x);
        assert!(small.size().y < large.size().y);
    }
}
