use gpui::{App, Window};

use crate::{components::dialog, components::select, primitives::input, theme::ThemeExt};

/// Registers the key bindings the interactive components rely on.
/// Call once during app startup.
pub fn init(cx: &mut App) {
    input::init(cx);
    select::init(cx);
    dialog::init(cx);
}

/// Per-window setup: installs the theme's base rem size.
pub fn init_for_window(window: &mut Window, cx: &mut App) {
    window.set_rem_size(cx.get_theme().layout.text.base_size);
}
