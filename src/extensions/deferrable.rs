use gpui::{AnyElement, IntoElement, deferred};

/// Configuration for deferred rendering.
#[derive(Clone, Copy, Debug)]
pub struct DeferredConfig {
    /// Whether deferred rendering is enabled.
    pub enabled: bool,
    /// Paint priority; higher priorities paint later (more on top).
    pub priority: Option<usize>,
}

impl Default for DeferredConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            priority: None,
        }
    }
}

/// Components that can paint after their siblings: overlays,
/// dropdowns, and popups that must appear above other content.
pub trait Deferrable: Sized {
    /// Priority used when deferring is enabled without a custom one.
    const DEFAULT_PRIORITY: usize = 0;

    fn deferred_config(&self) -> &DeferredConfig;

    fn deferred_config_mut(&mut self) -> &mut DeferredConfig;

    fn deferred(mut self, enabled: bool) -> Self {
        self.deferred_config_mut().enabled = enabled;
        self
    }

    fn deferred_priority(mut self, priority: usize) -> Self {
        self.deferred_config_mut().priority = Some(priority);
        self
    }

    /// Wraps an element with deferred rendering per the configuration.
    fn apply_deferred(&self, element: impl IntoElement) -> AnyElement {
        let config = self.deferred_config();
        if config.enabled {
            let priority = config.priority.unwrap_or(Self::DEFAULT_PRIORITY);
            deferred(element).priority(priority).into_any_element()
        } else {
            element.into_any_element()
        }
    }
}
