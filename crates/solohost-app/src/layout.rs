//! Content layout for the main window.
//!
//! The layout is a pure function of the display flags and the natural view
//! sizes, so it is computed fresh on every pass and never stored across
//! state changes.

use bitflags::bitflags;
use egui::{Pos2, Rect, Vec2};

bitflags! {
    /// Which editor views are requested visible. Both may be set; the
    /// views then sit side by side.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EditorFlags: u8 {
        const NATIVE = 1 << 0;
        const GENERIC = 1 << 1;
    }
}

/// Minimum size of a visible editor panel.
pub const MIN_PANEL_WIDTH: f32 = 640.0;
pub const MIN_PANEL_HEIGHT: f32 = 480.0;

/// Inputs to a layout pass. A `None` size means the view is absent, in
/// which case its flag is treated as unset for this pass only.
#[derive(Debug, Clone, Copy)]
pub struct LayoutInput {
    pub toolbar_height: f32,
    pub flags: EditorFlags,
    pub native_size: Option<Vec2>,
    pub generic_size: Option<Vec2>,
}

/// Computed rectangles, all relative to the window content origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentLayout {
    pub toolbar: Rect,
    /// Band reserved for the native editor, clamped to the panel minimum.
    pub native_panel: Option<Rect>,
    /// Band reserved for the generic editor, right of the native panel.
    pub generic_panel: Option<Rect>,
    /// Native view at its natural size, centre-positioned in its panel.
    pub native_view: Option<Rect>,
    /// Generic view, height-forced when shown next to the native view,
    /// centre-positioned in its panel.
    pub generic_view: Option<Rect>,
    /// Size the generic view must adopt (height equalization).
    pub generic_view_size: Option<Vec2>,
    /// Bounding box of every visible panel, including the toolbar band.
    pub content_size: Vec2,
}

pub fn compute_layout(input: &LayoutInput) -> ContentLayout {
    let mut flags = input.flags;
    if input.native_size.is_none() {
        flags.remove(EditorFlags::NATIVE);
    }
    if input.generic_size.is_none() {
        flags.remove(EditorFlags::GENERIC);
    }

    let mut toolbar_width = 0.0_f32;
    let top = input.toolbar_height;

    let mut native_panel = None;
    if flags.contains(EditorFlags::NATIVE) {
        let natural = input.native_size.unwrap_or(Vec2::ZERO);
        let panel = Rect::from_min_size(
            Pos2::new(0.0, top),
            Vec2::new(
                natural.x.max(MIN_PANEL_WIDTH),
                natural.y.max(MIN_PANEL_HEIGHT),
            ),
        );
        toolbar_width = panel.width();
        native_panel = Some(panel);
    }

    let mut generic_panel = None;
    let mut generic_view_size = None;
    if flags.contains(EditorFlags::GENERIC) {
        let natural = input.generic_size.unwrap_or(Vec2::ZERO);
        // Natural size next to the native editor, minimum-clamped alone.
        let size = if native_panel.is_some() {
            natural
        } else {
            Vec2::new(
                natural.x.max(MIN_PANEL_WIDTH),
                natural.y.max(MIN_PANEL_HEIGHT),
            )
        };
        let left = native_panel.map(|panel| panel.width()).unwrap_or(0.0);
        let panel = Rect::from_min_size(Pos2::new(left, top), size);
        toolbar_width = panel.width();
        generic_panel = Some(panel);
        // The view itself keeps its natural size unless the side-by-side
        // height equalization below forces it taller.
        generic_view_size = Some(natural);
    }

    if let (Some(native), Some(generic)) = (native_panel, generic_panel) {
        let height = native.height().max(generic.height());
        let native = Rect::from_min_size(native.min, Vec2::new(native.width(), height));
        let generic = Rect::from_min_size(generic.min, Vec2::new(generic.width(), height));
        generic_view_size = generic_view_size.map(|size| Vec2::new(size.x, height));
        toolbar_width = native.width() + generic.width();
        native_panel = Some(native);
        generic_panel = Some(generic);
    }

    let toolbar = Rect::from_min_size(Pos2::ZERO, Vec2::new(toolbar_width, input.toolbar_height));

    let native_view = native_panel.map(|panel| {
        Rect::from_center_size(panel.center(), input.native_size.unwrap_or(Vec2::ZERO))
    });
    let generic_view = generic_panel
        .zip(generic_view_size)
        .map(|(panel, size)| Rect::from_center_size(panel.center(), size));

    let mut total = toolbar;
    for panel in [native_panel, generic_panel].into_iter().flatten() {
        total = total.union(panel);
    }

    ContentLayout {
        toolbar,
        native_panel,
        generic_panel,
        native_view,
        generic_view,
        generic_view_size,
        content_size: total.size(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOOLBAR: f32 = 60.0;

    fn input(
        flags: EditorFlags,
        native: Option<(f32, f32)>,
        generic: Option<(f32, f32)>,
    ) -> LayoutInput {
        LayoutInput {
            toolbar_height: TOOLBAR,
            flags,
            native_size: native.map(|(w, h)| Vec2::new(w, h)),
            generic_size: generic.map(|(w, h)| Vec2::new(w, h)),
        }
    }

    #[test]
    fn side_by_side_panels_equalize_heights() {
        let layout = compute_layout(&input(
            EditorFlags::NATIVE | EditorFlags::GENERIC,
            Some((400.0, 300.0)),
            Some((500.0, 200.0)),
        ));

        let native = layout.native_panel.unwrap();
        assert_eq!(native.size(), Vec2::new(640.0, 480.0));
        assert_eq!(native.min, Pos2::new(0.0, TOOLBAR));

        let generic = layout.generic_panel.unwrap();
        assert_eq!(generic.size(), Vec2::new(500.0, 480.0));
        assert_eq!(generic.min, Pos2::new(640.0, TOOLBAR));

        assert_eq!(layout.generic_view_size, Some(Vec2::new(500.0, 480.0)));
        assert_eq!(layout.toolbar.width(), 1140.0);
        assert_eq!(layout.content_size, Vec2::new(1140.0, 480.0 + TOOLBAR));
    }

    #[test]
    fn lone_generic_panel_is_clamped_to_minimum() {
        let layout = compute_layout(&input(EditorFlags::GENERIC, None, Some((500.0, 200.0))));

        assert!(layout.native_panel.is_none());
        let generic = layout.generic_panel.unwrap();
        assert_eq!(generic.min, Pos2::new(0.0, TOOLBAR));
        assert_eq!(generic.size(), Vec2::new(640.0, 480.0));
        assert_eq!(layout.toolbar.width(), 640.0);

        // The view itself stays at its natural size, centered in the panel.
        let view = layout.generic_view.unwrap();
        assert_eq!(view.size(), Vec2::new(500.0, 200.0));
        assert_eq!(view.center(), generic.center());
    }

    #[test]
    fn flag_without_view_is_ignored_for_the_pass() {
        let layout = compute_layout(&input(
            EditorFlags::NATIVE | EditorFlags::GENERIC,
            None,
            Some((500.0, 200.0)),
        ));

        // The native flag is set but the view is absent, so the generic
        // panel takes the origin column and is minimum-clamped.
        assert!(layout.native_panel.is_none());
        assert_eq!(layout.generic_panel.unwrap().min, Pos2::new(0.0, TOOLBAR));
        assert_eq!(layout.generic_panel.unwrap().size(), Vec2::new(640.0, 480.0));
    }

    #[test]
    fn no_views_leaves_only_the_toolbar_band() {
        let layout = compute_layout(&input(EditorFlags::NATIVE, None, None));
        assert!(layout.native_panel.is_none());
        assert!(layout.generic_panel.is_none());
        assert_eq!(layout.content_size, Vec2::new(0.0, TOOLBAR));
    }

    #[test]
    fn views_are_centre_positioned_in_their_panels() {
        let layout = compute_layout(&input(
            EditorFlags::NATIVE,
            Some((400.0, 300.0)),
            Some((500.0, 200.0)),
        ));

        let panel = layout.native_panel.unwrap();
        let view = layout.native_view.unwrap();
        assert_eq!(view.center(), panel.center());
        assert_eq!(view.size(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn oversized_native_editor_expands_its_panel() {
        let layout = compute_layout(&input(EditorFlags::NATIVE, Some((900.0, 700.0)), None));
        let panel = layout.native_panel.unwrap();
        assert_eq!(panel.size(), Vec2::new(900.0, 700.0));
        assert_eq!(layout.content_size, Vec2::new(900.0, 700.0 + TOOLBAR));
    }
}
