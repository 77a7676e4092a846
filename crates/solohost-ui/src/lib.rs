pub mod icons;
pub mod theme;
pub mod widgets;

pub use icons::{paint_icon, IconId};
pub use theme::{Palette, Theme};
pub use widgets::ToolbarButton;
