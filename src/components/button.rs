use std::time::Duration;

use gpui::{
    App, ClickEvent, CursorStyle, DefiniteLength, Edges, ElementId, InteractiveElement,
    IntoElement, JustifyContent, Length, ParentElement, RenderOnce, Rgba, SharedString,
    SizeRefinement, StatefulInteractiveElement, Styled, Window, div, ease_out_quint,
    prelude::FluentBuilder, px, relative,
};
use lattice_motion::{Lerp, TransitionExt};

use crate::{
    components::Icon,
    conditional_transition,
    extensions::{ClickBehavior, ClickBehaviorExt},
    primitives::{FocusRing, min_w0_wrapper},
    theme::ThemeExt,
    utils::{
        ElementIdExt, PixelsExt, PositionalChildren, PositionalParentElement, RgbaExt, rgb_a,
        disabled_transition,
    },
};

struct ButtonStyles {
    justify_content: JustifyContent,
    padding: Edges<Option<DefiniteLength>>,
    width: Length,
}

impl Default for ButtonStyles {
    fn default() -> Self {
        Self {
            justify_content: JustifyContent::Center,
            padding: Edges::default(),
            width: Length::Auto,
        }
    }
}

/// A themed push button with animated hover, press, and focus states.
#[derive(IntoElement)]
pub struct Button {
    id: ElementId,
    text: Option<SharedString>,
    icon: Option<SharedString>,
    icon_size: SizeRefinement<Length>,
    variant: ButtonVariantSource,
    disabled: bool,
    on_hover: Option<Box<dyn Fn(&bool, &mut Window, &mut App) + 'static>>,
    on_click: Option<Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>>,
    children: PositionalChildren,
    style: ButtonStyles,
    click_behavior: ClickBehavior,
}

impl Button {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            text: None,
            icon: None,
            icon_size: SizeRefinement {
                width: Some(px(0.).into()),
                height: Some(px(0.).into()),
            },
            variant: ButtonVariantSource::Named(ButtonVariant::Primary),
            disabled: false,
            on_hover: None,
            on_click: None,
            children: PositionalChildren::default(),
            style: ButtonStyles::default(),
            click_behavior: ClickBehavior::default(),
        }
    }

    pub fn text(mut self, text: impl Into<SharedString>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<SharedString>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn icon_size(mut self, icon_size: impl Into<Length>) -> Self {
        let icon_size = icon_size.into();
        self.icon_size = SizeRefinement {
            width: Some(icon_size),
            height: Some(icon_size),
        };
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_hover(mut self, on_hover: impl Fn(&bool, &mut Window, &mut App) + 'static) -> Self {
        self.on_hover = Some(Box::new(on_hover));
        self
    }

    pub fn on_click(
        mut self,
        on_click: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }

    // ButtonVariantSource is an internal wrapper accepting both the
    // named variants and a fully granular override.
    #[allow(private_bounds)]
    pub fn variant(mut self, variant: impl Into<ButtonVariantSource>) -> Self {
        self.variant = variant.into();
        self
    }

    pub fn justify_start(mut self) -> Self {
        self.style.justify_content = JustifyContent::Start;
        self
    }

    pub fn justify_end(mut self) -> Self {
        self.style.justify_content = JustifyContent::End;
        self
    }

    pub fn justify_center(mut self) -> Self {
        self.style.justify_content = JustifyContent::Center;
        self
    }

    pub fn justify_between(mut self) -> Self {
        self.style.justify_content = JustifyContent::SpaceBetween;
        self
    }

    pub fn p(mut self, padding: impl Into<DefiniteLength>) -> Self {
        self.style.padding = Edges::all(Some(padding.into()));
        self
    }

    pub fn pt(mut self, padding: impl Into<DefiniteLength>) -> Self {
        self.style.padding.top = Some(padding.into());
        self
    }

    pub fn pb(mut self, padding: impl Into<DefiniteLength>) -> Self {
        self.style.padding.bottom = Some(padding.into());
        self
    }

    pub fn pl(mut self, padding: impl Into<DefiniteLength>) -> Self {
        self.style.padding.left = Some(padding.into());
        self
    }

    pub fn pr(mut self, padding: impl Into<DefiniteLength>) -> Self {
        self.style.padding.right = Some(padding.into());
        self
    }

    pub fn w(mut self, width: impl Into<Length>) -> Self {
        self.style.width = width.into();
        self
    }

    pub fn w_full(mut self) -> Self {
        self.style.width = relative(1.).into();
        self
    }

    fn handle_on_click(
        window: &mut Window,
        cx: &mut App,
        event: &ClickEvent,
        on_click: Option<&Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>>,
    ) {
        if let Some(on_click) = on_click {
            (on_click)(event, window, cx)
        }
    }
}

impl RenderOnce for Button {
    fn render(self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let variant = self.variant.resolve(cx);
        let font_family = cx.get_theme().layout.text.default_font.family[0].clone();
        let line_height = cx.get_theme().layout.text.default_font.line_height;
        let text_size = cx.get_theme().layout.text.default_font.sizes.body;
        let corner_radius = cx.get_theme().layout.corner_radii.md;
        let horizontal_padding = cx.get_theme().layout.padding.lg;
        let vertical_padding =
            cx.get_theme()
                .layout
                .size
                .lg
                .padding_needed_for_height(window, text_size, line_height);
        let padding_override = self.style.padding;

        let is_hover_state =
            window.use_keyed_state(self.id.with_suffix("state:hover"), cx, |_window, _cx| false);
        let is_hover = *is_hover_state.read(cx);

        let is_click_down_state = window.use_keyed_state(
            self.id.with_suffix("state:click_down"),
            cx,
            |_window, _cx| false,
        );
        let is_click_down = *is_click_down_state.read(cx);

        let focus_handle = window
            .use_keyed_state(
                self.id.with_suffix("state:focus_handle"),
                cx,
                |_window, cx| cx.focus_handle().tab_stop(true),
            )
            .read(cx)
            .clone();
        let is_focus = focus_handle.is_focused(window);

        let is_disabled = self.disabled;
        let opacity_transition = disabled_transition(self.id.clone(), window, cx, is_disabled);

        if is_focus && is_disabled {
            window.blur();
        }

        let bg_transition = conditional_transition!(
            self.id.with_suffix("state:transition:bg_color"),
            window,
            cx,
            Duration::from_millis(250),
            {
                is_focus || is_click_down => variant.bg_focus_color,
                is_hover => variant.bg_hover_color,
                _ => variant.bg_color
            }
        )
        .with_easing(ease_out_quint());

        let text_transition = conditional_transition!(
            self.id.with_suffix("state:transition:text_color"),
            window,
            cx,
            Duration::from_millis(250),
            variant.text_color
        )
        .with_easing(ease_out_quint());

        // Subtle top-light emphasis border that brightens while active.
        let emphasis_transition = conditional_transition!(
            self.id.with_suffix("state:transition:emphasis"),
            window,
            cx,
            Duration::from_millis(250),
            {
                is_focus || is_click_down || is_hover => variant.emphasis_active_alpha,
                _ => variant.emphasis_alpha
            }
        )
        .with_easing(ease_out_quint());

        div()
            .id(self.id.clone())
            .cursor(if is_disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::PointingHand
            })
            .w(self.style.width)
            .h_auto()
            .pt(padding_override.top.unwrap_or(vertical_padding.into()))
            .pb(padding_override.bottom.unwrap_or(vertical_padding.into()))
            .pl(padding_override.left.unwrap_or(horizontal_padding.into()))
            .pr(padding_override.right.unwrap_or(horizontal_padding.into()))
            .gap(horizontal_padding)
            .flex()
            .flex_col()
            .rounded(corner_radius)
            .border_1()
            .with_transitions(
                (opacity_transition, bg_transition, emphasis_transition),
                |_cx, this, (opacity, bg_color, emphasis_alpha)| {
                    this.opacity(opacity)
                        .bg(bg_color)
                        .border_color(rgb_a(0xE8E4FF, emphasis_alpha))
                },
            )
            .child(
                FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle.clone())
                    .rounded(corner_radius),
            )
            .children(self.children.top)
            .child(
                div()
                    .w_full()
                    .flex()
                    .gap(horizontal_padding)
                    .map(|mut this| {
                        this.style().justify_content = Some(self.style.justify_content);
                        this
                    })
                    .items_center()
                    .children(self.children.left)
                    .with_transitions(text_transition, move |_cx, this, text_color| {
                        this.text_color(text_color)
                            .when_some(self.icon.as_ref(), |this, icon| {
                                this.child(Icon::new(icon.clone()).color(text_color).map(
                                    |mut this| {
                                        this.size = self.icon_size.clone();
                                        this
                                    },
                                ))
                            })
                    })
                    .when_some(self.text, |this, text| {
                        this.child(
                            min_w0_wrapper()
                                .font_family(font_family.clone())
                                .text_size(text_size)
                                .text_ellipsis()
                                .child(text),
                        )
                    })
                    .children(self.children.right),
            )
            .children(self.children.bottom)
            .when(!self.disabled, |this| {
                let is_hover_state_on_hover = is_hover_state.clone();
                let is_click_down_state_on_mouse_down = is_click_down_state.clone();
                let is_click_down_state_on_click = is_click_down_state.clone();
                let on_hover = self.on_hover;
                let click_behavior = self.click_behavior;

                this.on_hover(move |hover, window, cx| {
                    is_hover_state_on_hover.update(cx, |this, _cx| *this = *hover);
                    cx.notify(is_hover_state_on_hover.entity_id());

                    if let Some(on_hover) = &on_hover {
                        (on_hover)(hover, window, cx);
                    }
                })
                .on_mouse_down(gpui::MouseButton::Left, move |_, window, cx| {
                    // Prevents the focus ring from appearing on click.
                    window.prevent_default();

                    is_click_down_state_on_mouse_down.update(cx, |this, _cx| *this = true);
                    cx.notify(is_click_down_state_on_mouse_down.entity_id());
                })
                .on_click(move |event, window, cx| {
                    click_behavior.apply(window, cx);

                    if !is_focus {
                        // Only blur if something else may be focused.
                        window.blur();
                    }

                    is_click_down_state_on_click.update(cx, |this, _cx| *this = false);
                    cx.notify(is_click_down_state_on_click.entity_id());

                    Self::handle_on_click(window, cx, event, self.on_click.as_ref());
                })
                .on_mouse_up_out(gpui::MouseButton::Left, move |_event, _window, cx| {
                    // Clean up when the pointer clicks down, leaves the
                    // bounds, then releases.
                    is_hover_state.update(cx, |this, _cx| *this = false);
                    cx.notify(is_hover_state.entity_id());

                    is_click_down_state.update(cx, |this, _cx| *this = false);
                    cx.notify(is_click_down_state.entity_id());
                })
                .track_focus(&focus_handle)
            })
    }
}

impl PositionalParentElement for Button {
    fn children_mut(&mut self) -> &mut PositionalChildren {
        &mut self.children
    }
}

impl ClickBehaviorExt for Button {
    fn click_behavior_mut(&mut self) -> &mut ClickBehavior {
        &mut self.click_behavior
    }
}

/// A fully resolved button palette; use for one-off buttons that don't
/// fit the named variants.
#[derive(Clone)]
pub struct GranularButtonVariant {
    pub bg_color: Rgba,
    pub bg_hover_color: Rgba,
    pub bg_focus_color: Rgba,
    pub text_color: Rgba,
    pub emphasis_alpha: f32,
    pub emphasis_active_alpha: f32,
}

pub enum ButtonVariant {
    Primary,
    Secondary,
    SecondaryGhost,
    Constructive,
    ConstructiveGhost,
    Destructive,
    DestructiveGhost,
}

impl ButtonVariant {
    /// Resolves the named variant against the active theme variant.
    pub fn as_granular(&self, cx: &App) -> GranularButtonVariant {
        const HOVER_STRENGTH: f32 = 0.15;
        const FOCUS_STRENGTH: f32 = 0.35;

        const TINT_ALPHA: f32 = 0.1;

        let colors = &cx.get_theme().variants.active(cx).colors;
        let primary_background = colors.background.primary;

        fn tinted_variant(primary_background: &Rgba, main_color: &Rgba) -> GranularButtonVariant {
            GranularButtonVariant {
                bg_color: main_color.alpha(TINT_ALPHA),
                bg_hover_color: main_color
                    .lerp(primary_background, HOVER_STRENGTH)
                    .alpha(TINT_ALPHA),
                bg_focus_color: main_color
                    .lerp(primary_background, FOCUS_STRENGTH)
                    .alpha(TINT_ALPHA),
                text_color: *main_color,
                emphasis_alpha: 0.05,
                emphasis_active_alpha: 0.05,
            }
        }

        fn ghost_variant(primary_background: &Rgba, main_color: &Rgba) -> GranularButtonVariant {
            GranularButtonVariant {
                bg_color: main_color.alpha(0.),
                bg_hover_color: main_color.alpha(TINT_ALPHA),
                bg_focus_color: main_color
                    .lerp(primary_background, HOVER_STRENGTH)
                    .alpha(TINT_ALPHA),
                text_color: *main_color,
                emphasis_alpha: 0.,
                emphasis_active_alpha: 0.05,
            }
        }

        match self {
            ButtonVariant::Primary => GranularButtonVariant {
                bg_color: colors.accent.primary,
                bg_hover_color: colors
                    .accent
                    .primary
                    .lerp(&primary_background, HOVER_STRENGTH),
                bg_focus_color: colors
                    .accent
                    .primary
                    .lerp(&primary_background, FOCUS_STRENGTH),
                text_color: colors.text.primary,
                emphasis_alpha: 0.15,
                emphasis_active_alpha: 0.15,
            },

            ButtonVariant::Secondary => {
                tinted_variant(&primary_background, &colors.text.secondary)
            }

            ButtonVariant::SecondaryGhost => {
                ghost_variant(&primary_background, &colors.text.secondary)
            }

            ButtonVariant::Constructive => {
                tinted_variant(&primary_background, &colors.accent.constructive)
            }

            ButtonVariant::ConstructiveGhost => {
                ghost_variant(&primary_background, &colors.accent.constructive)
            }

            ButtonVariant::Destructive => {
                tinted_variant(&primary_background, &colors.accent.destructive)
            }

            ButtonVariant::DestructiveGhost => {
                ghost_variant(&primary_background, &colors.accent.destructive)
            }
        }
    }
}

enum ButtonVariantSource {
    Named(ButtonVariant),
    Granular(GranularButtonVariant),
}

impl ButtonVariantSource {
    fn resolve(self, cx: &App) -> GranularButtonVariant {
        match self {
            ButtonVariantSource::Named(named) => named.as_granular(cx),
            ButtonVariantSource::Granular(granular) => granular,
        }
    }
}

impl From<ButtonVariant> for ButtonVariantSource {
    fn from(value: ButtonVariant) -> Self {
        ButtonVariantSource::Named(value)
    }
}

impl From<GranularButtonVariant> for ButtonVariantSource {
    fn from(value: GranularButtonVariant) -> Self {
        ButtonVariantSource::Granular(value)
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use gpui::{AppContext, TestAppContext, VisualTestContext};

    #[gpui::test]
    fn builder_state(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let button = Button::new("save")
                .text("Save")
                .icon("icons/checkmark.svg")
                .disabled(true)
                .w_full();

            assert_eq!(button.text.as_deref(), Some("Save"));
            assert!(button.icon.is_some());
            assert!(button.disabled);
        });
    }

    #[gpui::test]
    fn ghost_variants_start_transparent(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            for variant in [
                ButtonVariant::SecondaryGhost,
                ButtonVariant::ConstructiveGhost,
                ButtonVariant::DestructiveGhost,
            ] {
                let granular = variant.as_granular(cx);
                assert_eq!(granular.bg_color.a, 0., "ghost backgrounds are clear");
                assert!(granular.bg_hover_color.a > 0., "hover reveals a tint");
            }
        });
    }

    #[gpui::test]
    fn primary_variant_uses_the_accent(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            let granular = ButtonVariant::Primary.as_granular(cx);
            let accent = cx.get_theme().variants.active(cx).colors.accent.primary;
            assert_eq!(granular.bg_color.r, accent.r);
            assert_eq!(granular.bg_color.a, accent.a);
        });
    }

    #[gpui::test]
    fn granular_override_is_used_verbatim(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            let custom = GranularButtonVariant {
                bg_color: crate::utils::rgb_a(0x123456, 1.),
                bg_hover_color: crate::utils::rgb_a(0x123456, 0.9),
                bg_focus_color: crate::utils::rgb_a(0x123456, 0.8),
                text_color: crate::utils::rgb_a(0xFFFFFF, 1.),
                emphasis_alpha: 0.2,
                emphasis_active_alpha: 0.3,
            };

            let button = Button::new("custom").variant(custom.clone());
            let resolved = button.variant.resolve(cx);
            assert_eq!(resolved.bg_color.b, custom.bg_color.b);
            assert_eq!(resolved.emphasis_alpha, custom.emphasis_alpha);
        });
    }

    #[gpui::test]
    fn renders_in_a_window(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|_cx| ButtonTestView)
            })
            .unwrap()
        });

        let _cx = VisualTestContext::from_window(window.into(), cx);
    }

    struct ButtonTestView;

    impl gpui::Render for ButtonTestView {
        fn render(
            &mut self,
            _window: &mut gpui::Window,
            _cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div().size_full().child(
                Button::new("test-button")
                    .text("Click me")
                    .variant(ButtonVariant::Primary)
                    .on_click(|_event, _window, _cx| {}),
            )
        }
    }
}
