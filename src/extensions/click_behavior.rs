use gpui::{App, Window};

/// Settings that control click event behavior.
///
/// By default click handlers call `cx.stop_propagation()` and
/// `window.prevent_default()`; this struct lets components opt out.
#[derive(Clone, Copy, Default)]
pub struct ClickBehavior {
    /// If true, `cx.stop_propagation()` will NOT be called.
    pub allow_propagation: bool,
    /// If true, `window.prevent_default()` will NOT be called.
    pub allow_default: bool,
}

impl ClickBehavior {
    pub fn apply(&self, window: &mut Window, cx: &mut App) {
        if !self.allow_default {
            window.prevent_default();
        }
        if !self.allow_propagation {
            cx.stop_propagation();
        }
    }
}

/// Components that let callers opt out of the automatic
/// `stop_propagation()` / `prevent_default()` calls.
pub trait ClickBehaviorExt: Sized {
    fn click_behavior_mut(&mut self) -> &mut ClickBehavior;

    /// Lets the click event bubble up to parent handlers.
    fn allow_click_propagation(mut self) -> Self {
        self.click_behavior_mut().allow_propagation = true;
        self
    }

    /// Keeps the system default behavior for the click event.
    fn allow_default_click_behavior(mut self) -> Self {
        self.click_behavior_mut().allow_default = true;
        self
    }
}
