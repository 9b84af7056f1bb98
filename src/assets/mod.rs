mod assets;
pub use assets::*;
use cfg_if::cfg_if;

cfg_if!(
    if #[cfg(feature = "assets")] {
        mod embedded;
        pub use embedded::*;
    }
);

use enum_assoc::Assoc;
use gpui::SharedString;

/// Built-in icon identifiers mapping to bundled SVG assets. The files
/// themselves ship behind the `assets` feature; the identifiers are
/// always available so components can reference them.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn path(&self) -> SharedString)]
pub enum IconKind {
    /// Checkmark for confirmations and selections.
    #[assoc(path = "icons/checkmark.svg".into())]
    Checkmark,
    /// Downward chevron for dropdowns and expanders.
    #[assoc(path = "icons/chevron_down.svg".into())]
    ChevronDown,
    /// Close / dismiss cross.
    #[assoc(path = "icons/close.svg".into())]
    Close,
    /// Informational circle.
    #[assoc(path = "icons/info.svg".into())]
    Info,
    /// Success circle.
    #[assoc(path = "icons/circle_check.svg".into())]
    CircleCheck,
    /// Warning triangle.
    #[assoc(path = "icons/warning.svg".into())]
    Warning,
    /// Error circle.
    #[assoc(path = "icons/error.svg".into())]
    Error,
}

impl From<IconKind> for SharedString {
    fn from(kind: IconKind) -> Self {
        kind.path()
    }
}
