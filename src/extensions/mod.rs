/// Controls how click events propagate and trigger default behaviors.
pub mod click_behavior;

/// Traits and types for attaching click event handlers to components.
pub mod clickable;

/// Support for deferred rendering of overlays and popups.
pub mod deferrable;

pub use click_behavior::*;
pub use clickable::*;
pub use deferrable::*;
