use gpui::App;

use crate::{ActiveVariantId, Theme, ThemeVariantKind};

/// Extension trait for accessing and switching the global theme.
pub trait ThemeExt {
    /// Installs a theme, replacing the current one.
    fn set_theme<T: AsRef<Theme>>(&mut self, theme: T);

    /// The installed theme. Panics if no theme was set; call
    /// [`set_theme`](Self::set_theme) during app startup.
    fn get_theme(&self) -> &Theme;

    /// Switches to the first variant of the given kind, if the theme
    /// ships one. Returns whether a variant was found.
    fn set_theme_variant(&mut self, kind: ThemeVariantKind) -> bool;
}

impl ThemeExt for App {
    fn set_theme<T: AsRef<Theme>>(&mut self, theme: T) {
        self.set_global::<Theme>(theme.as_ref().clone());
    }

    fn get_theme(&self) -> &Theme {
        self.global()
    }

    fn set_theme_variant(&mut self, kind: ThemeVariantKind) -> bool {
        let Some((index, _)) = self.get_theme().variants.of_kind(kind) else {
            return false;
        };

        self.set_global(ActiveVariantId(index));
        true
    }
}
