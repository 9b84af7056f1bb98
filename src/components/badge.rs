use gpui::{
    IntoElement, ParentElement, RenderOnce, Rgba, SharedString, Styled, div,
    prelude::FluentBuilder, px,
};

use crate::{
    primitives::min_w0_wrapper,
    theme::ThemeExt,
    utils::RgbaExt,
};

/// Visual treatments for a [`Badge`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BadgeVariant {
    /// Accent-tinted pill.
    #[default]
    Accent,
    Constructive,
    Destructive,
    Warning,
    /// Muted, layer-colored pill.
    Neutral,
    /// Transparent with a border.
    Outline,
}

/// A compact label chip for counts and statuses.
#[derive(IntoElement)]
pub struct Badge {
    text: SharedString,
    variant: BadgeVariant,
}

impl Badge {
    pub fn new(text: impl Into<SharedString>) -> Self {
        Self {
            text: text.into(),
            variant: BadgeVariant::default(),
        }
    }

    pub fn variant(mut self, variant: BadgeVariant) -> Self {
        self.variant = variant;
        self
    }
}

struct BadgeColors {
    bg: Rgba,
    text: Rgba,
    border: Option<Rgba>,
}

impl BadgeVariant {
    fn colors(self, cx: &gpui::App) -> BadgeColors {
        const TINT_ALPHA: f32 = 0.15;

        let colors = &cx.get_theme().variants.active(cx).colors;

        let tinted = |accent: Rgba| BadgeColors {
            bg: accent.alpha(TINT_ALPHA),
            text: accent,
            border: None,
        };

        match self {
            BadgeVariant::Accent => tinted(colors.accent.primary),
            BadgeVariant::Constructive => tinted(colors.accent.constructive),
            BadgeVariant::Destructive => tinted(colors.accent.destructive),
            BadgeVariant::Warning => tinted(colors.accent.warning),
            BadgeVariant::Neutral => BadgeColors {
                bg: colors.background.tertiary,
                text: colors.text.secondary,
                border: None,
            },
            BadgeVariant::Outline => BadgeColors {
                bg: colors.text.secondary.alpha(0.),
                text: colors.text.secondary,
                border: Some(colors.background.quaternary),
            },
        }
    }
}

impl RenderOnce for Badge {
    fn render(self, _window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let colors = self.variant.colors(cx);
        let caption_size = cx.get_theme().layout.text.default_font.sizes.caption;
        let horizontal_padding = cx.get_theme().layout.padding.md;
        let vertical_padding = cx.get_theme().layout.padding.sm;

        div()
            .flex()
            .items_center()
            .w_auto()
            .pl(horizontal_padding)
            .pr(horizontal_padding)
            .pt(vertical_padding)
            .pb(vertical_padding)
            .rounded(px(100.))
            .bg(colors.bg)
            .when_some(colors.border, |this, border| {
                this.border_1().border_color(border)
            })
            .child(
                min_w0_wrapper()
                    .text_size(caption_size)
                    .text_color(colors.text)
                    .text_ellipsis()
                    .child(self.text),
            )
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use gpui::TestAppContext;

    #[gpui::test]
    fn defaults_to_the_accent_variant(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let badge = Badge::new("3 new");
            assert_eq!(badge.variant, BadgeVariant::Accent);
            assert_eq!(badge.text, SharedString::from("3 new"));
        });
    }

    #[gpui::test]
    fn outline_is_the_only_bordered_variant(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            for variant in [
                BadgeVariant::Accent,
                BadgeVariant::Constructive,
                BadgeVariant::Destructive,
                BadgeVariant::Warning,
                BadgeVariant::Neutral,
            ] {
                assert!(variant.colors(cx).border.is_none(), "{variant:?}");
            }

            let outline = BadgeVariant::Outline.colors(cx);
            assert!(outline.border.is_some());
            assert_eq!(outline.bg.a, 0., "outline background is transparent");
        });
    }

    #[gpui::test]
    fn tinted_variants_use_translucent_backgrounds(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            let colors = BadgeVariant::Destructive.colors(cx);
            assert!(colors.bg.a > 0. && colors.bg.a < 1.);
            assert_eq!(colors.text.a, 1., "label text stays opaque");
        });
    }
}
