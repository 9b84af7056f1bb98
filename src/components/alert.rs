use gpui::{
    App, ClickEvent, ElementId, FontWeight, InteractiveElement, IntoElement, ParentElement,
    RenderOnce, Rgba, SharedString, Styled, Window, div, prelude::FluentBuilder, px,
};
use enum_assoc::Assoc;

use crate::{
    IconKind,
    components::{Button, ButtonVariant, Icon},
    primitives::min_w0_wrapper,
    theme::ThemeExt,
    utils::{ElementIdExt, RgbaExt},
};

/// Severity of an [`Alert`], selecting its accent color and icon.
#[derive(Assoc, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[func(pub fn icon(&self) -> IconKind)]
pub enum AlertSeverity {
    #[default]
    #[assoc(icon = IconKind::Info)]
    Info,
    #[assoc(icon = IconKind::CircleCheck)]
    Success,
    #[assoc(icon = IconKind::Warning)]
    Warning,
    #[assoc(icon = IconKind::Error)]
    Error,
}

impl AlertSeverity {
    fn accent(self, cx: &App) -> Rgba {
        let colors = &cx.get_theme().variants.active(cx).colors;
        match self {
            AlertSeverity::Info => colors.accent.primary,
            AlertSeverity::Success => colors.accent.constructive,
            AlertSeverity::Warning => colors.accent.warning,
            AlertSeverity::Error => colors.accent.destructive,
        }
    }
}

/// An inline status banner with a severity icon, message, and an
/// optional dismiss button.
#[derive(IntoElement)]
pub struct Alert {
    id: ElementId,
    severity: AlertSeverity,
    title: Option<SharedString>,
    message: SharedString,
    on_dismiss: Option<Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>>,
}

impl Alert {
    pub fn new(id: impl Into<ElementId>, message: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            severity: AlertSeverity::default(),
            title: None,
            message: message.into(),
            on_dismiss: None,
        }
    }

    pub fn severity(mut self, severity: AlertSeverity) -> Self {
        self.severity = severity;
        self
    }

    pub fn title(mut self, title: impl Into<SharedString>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Shows a dismiss button; the host removes the alert in response.
    pub fn on_dismiss(
        mut self,
        on_dismiss: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_dismiss = Some(Box::new(on_dismiss));
        self
    }
}

impl RenderOnce for Alert {
    fn render(self, _window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        const TINT_ALPHA: f32 = 0.12;
        const BORDER_ALPHA: f32 = 0.35;

        let accent = self.severity.accent(cx);
        let primary_text_color = cx.get_theme().variants.active(cx).colors.text.primary;
        let corner_radius = cx.get_theme().layout.corner_radii.md;
        let padding = cx.get_theme().layout.padding.lg;
        let gap = cx.get_theme().layout.padding.md;
        let body_size = cx.get_theme().layout.text.default_font.sizes.body;
        let body_weight = cx.get_theme().layout.text.default_font.weights.body;
        let title_weight = cx.get_theme().layout.text.default_font.weights.heading_sm;

        div()
            .id(self.id.clone())
            .flex()
            .items_start()
            .gap(gap)
            .p(padding)
            .rounded(corner_radius)
            .bg(accent.alpha(TINT_ALPHA))
            .border_1()
            .border_color(accent.alpha(BORDER_ALPHA))
            .child(
                Icon::new(self.severity.icon())
                    .size(px(16.))
                    .color(accent)
                    .flex_shrink_0()
                    .mt(px(2.)),
            )
            .child(
                div()
                    .flex()
                    .flex_col()
                    .flex_1()
                    .min_w_0()
                    .when_some(self.title, |this, title| {
                        this.child(
                            min_w0_wrapper()
                                .text_size(body_size)
                                .text_color(primary_text_color)
                                .font_weight(FontWeight(title_weight))
                                .child(title),
                        )
                    })
                    .child(
                        min_w0_wrapper()
                            .text_size(body_size)
                            .font_weight(FontWeight(body_weight))
                            .child(self.message),
                    ),
            )
            .when_some(self.on_dismiss, |this, on_dismiss| {
                this.child(
                    Button::new(self.id.with_suffix("dismiss"))
                        .variant(ButtonVariant::SecondaryGhost)
                        .icon(IconKind::Close)
                        .icon_size(px(12.))
                        .p(px(6.))
                        .on_click(move |event, window, cx| on_dismiss(event, window, cx)),
                )
            })
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use gpui::TestAppContext;

    #[gpui::test]
    fn defaults_to_info(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let alert = Alert::new("a", "saved");
            assert_eq!(alert.severity, AlertSeverity::Info);
            assert!(alert.title.is_none());
            assert!(alert.on_dismiss.is_none());
        });
    }

    #[gpui::test]
    fn severities_pick_distinct_icons(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let icons: Vec<_> = [
                AlertSeverity::Info,
                AlertSeverity::Success,
                AlertSeverity::Warning,
                AlertSeverity::Error,
            ]
            .iter()
            .map(|severity| severity.icon())
            .collect();

            for (index, icon) in icons.iter().enumerate() {
                assert!(
                    !icons[index + 1..].contains(icon),
                    "duplicate icon {icon:?}"
                );
            }
        });
    }

    #[gpui::test]
    fn severities_map_to_theme_accents(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            let colors = &cx.get_theme().variants.active(cx).colors.accent;
            assert_eq!(AlertSeverity::Error.accent(cx).r, colors.destructive.r);
            assert_eq!(AlertSeverity::Success.accent(cx).g, colors.constructive.g);
            assert_eq!(AlertSeverity::Warning.accent(cx).b, colors.warning.b);
        });
    }
}
