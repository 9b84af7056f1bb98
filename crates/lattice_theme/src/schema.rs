use std::{ops::Deref, sync::LazyLock};

use gpui::{AbsoluteLength, App, DefiniteLength, Global, Pixels, Rgba, SharedString};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::deserializers::{de_abs_length, de_def_length, de_font_stack, de_pixels, de_variants};

/// A complete set of design tokens: layout scales, typography, and one
/// or more color variants.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Theme {
    pub name: SharedString,
    pub layout: ThemeLayout,
    pub variants: ThemeVariants,
}

macro_rules! builtin_themes {
    ( $( [$path:literal, $name:ident] ),+ $(,)? ) => {
        $(
            pub const $name: LazyTheme =
                LazyTheme(LazyLock::new(|| Theme::from_json(include_str!($path)).unwrap()));
        )+
    };
}

/// A built-in theme parsed from its embedded JSON on first use.
pub struct LazyTheme(LazyLock<Theme>);

impl Deref for LazyTheme {
    type Target = Theme;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Theme> for LazyTheme {
    fn as_ref(&self) -> &Theme {
        &self.0
    }
}

impl Theme {
    builtin_themes!(["../themes/default.json", DEFAULT]);

    /// Parses a theme document.
    pub fn from_json<S: AsRef<str>>(json: S) -> Result<Theme, serde_json::Error> {
        serde_json::from_str(json.as_ref())
    }
}

impl Global for Theme {}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeLayout {
    pub text: ThemeText,
    pub corner_radii: ThemeScale,
    pub size: ThemeScale,
    pub padding: ThemeScale,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeText {
    /// Pixel value of 1rem; installed as the window's rem size.
    #[serde(deserialize_with = "de_pixels")]
    pub base_size: Pixels,
    pub default_font: ThemeFont,
    pub mono_font: ThemeFont,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeFont {
    #[serde(deserialize_with = "de_font_stack")]
    pub family: SmallVec<[SharedString; 1]>,
    #[serde(deserialize_with = "de_def_length")]
    pub line_height: DefiniteLength,
    pub sizes: ThemeTextSizes,
    pub weights: ThemeTextWeights,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeTextSizes {
    #[serde(deserialize_with = "de_abs_length")]
    pub heading_xl: AbsoluteLength,
    #[serde(deserialize_with = "de_abs_length")]
    pub heading_lg: AbsoluteLength,
    #[serde(deserialize_with = "de_abs_length")]
    pub heading_md: AbsoluteLength,
    #[serde(deserialize_with = "de_abs_length")]
    pub heading_sm: AbsoluteLength,
    #[serde(deserialize_with = "de_abs_length")]
    pub body: AbsoluteLength,
    #[serde(deserialize_with = "de_abs_length")]
    pub caption: AbsoluteLength,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeTextWeights {
    pub heading_xl: f32,
    pub heading_lg: f32,
    pub heading_md: f32,
    pub heading_sm: f32,
    pub body: f32,
    pub caption: f32,
}

/// A four-step pixel scale shared by sizes, padding, and corner radii.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeScale {
    #[serde(deserialize_with = "de_pixels")]
    pub xl: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub lg: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub md: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub sm: Pixels,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(transparent)]
pub struct ThemeVariants {
    #[serde(deserialize_with = "de_variants")]
    pub variants: SmallVec<[ThemeVariant; 2]>,
}

/// Index of the active variant within [`ThemeVariants`]. Defaults to
/// the first variant when never set.
#[derive(Default)]
pub struct ActiveVariantId(pub usize);

impl Global for ActiveVariantId {}

impl ThemeVariants {
    /// The variant selected by the global [`ActiveVariantId`], clamped
    /// to the available variants.
    pub fn active(&self, cx: &App) -> &ThemeVariant {
        let index = cx
            .try_global::<ActiveVariantId>()
            .map_or(0, |active| active.0);
        &self.variants[index.min(self.variants.len() - 1)]
    }

    /// The first variant of the given kind, if the theme ships one.
    pub fn of_kind(&self, kind: ThemeVariantKind) -> Option<(usize, &ThemeVariant)> {
        self.variants
            .iter()
            .enumerate()
            .find(|(_, variant)| variant.kind == kind)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeVariant {
    pub kind: ThemeVariantKind,
    pub colors: ThemeColors,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariantKind {
    Dark,
    Light,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeColors {
    pub background: ThemeBackgroundColors,
    pub accent: ThemeAccentColors,
    pub text: ThemeTextColors,
}

/// Surface colors ordered by elevation.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeBackgroundColors {
    pub primary: Rgba,
    pub secondary: Rgba,
    pub tertiary: Rgba,
    pub quaternary: Rgba,
    pub quinary: Rgba,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeAccentColors {
    pub primary: Rgba,
    pub constructive: Rgba,
    pub destructive: Rgba,
    pub warning: Rgba,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeTextColors {
    pub primary: Rgba,
    pub secondary: Rgba,
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use gpui::{TestAppContext, px};

    #[gpui::test]
    fn default_theme_parses(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let theme: &Theme = &Theme::DEFAULT;
            assert!(!theme.name.is_empty());
            assert_eq!(theme.variants.variants.len(), 2);
        });
    }

    #[gpui::test]
    fn default_theme_scales_are_ordered(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            for scale in [
                &Theme::DEFAULT.layout.size,
                &Theme::DEFAULT.layout.padding,
                &Theme::DEFAULT.layout.corner_radii,
            ] {
                assert!(scale.sm <= scale.md);
                assert!(scale.md <= scale.lg);
                assert!(scale.lg <= scale.xl);
                assert!(scale.sm >= px(0.));
            }
        });
    }

    #[gpui::test]
    fn active_variant_follows_the_global(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let theme = Theme::DEFAULT.clone();

            let first = theme.variants.active(cx).kind;
            cx.set_global(ActiveVariantId(1));
            let second = theme.variants.active(cx).kind;

            assert_ne!(first, second, "default theme ships dark and light");
        });
    }

    #[gpui::test]
    fn active_variant_index_is_clamped(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let theme = Theme::DEFAULT.clone();
            cx.set_global(ActiveVariantId(99));
            // Must not panic; falls back to the last variant.
            let _ = theme.variants.active(cx);
        });
    }

    #[gpui::test]
    fn variants_can_be_found_by_kind(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let theme = &Theme::DEFAULT;
            assert!(theme.variants.of_kind(ThemeVariantKind::Dark).is_some());
            assert!(theme.variants.of_kind(ThemeVariantKind::Light).is_some());
        });
    }

    #[gpui::test]
    fn themes_without_variants_are_rejected(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let mut value: serde_json::Value =
                serde_json::from_str(include_str!("../themes/default.json")).unwrap();
            value["variants"] = serde_json::json!([]);

            let result = Theme::from_json(value.to_string());
            assert!(result.is_err(), "empty variant lists must not parse");
        });
    }

    #[gpui::test]
    fn text_colors_are_opaque_in_both_variants(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            for variant in &Theme::DEFAULT.variants.variants {
                assert!(variant.colors.text.primary.a > 0.);
                assert!(variant.colors.text.secondary.a > 0.);
                assert!(variant.colors.accent.primary.a > 0.);
            }
        });
    }
}
