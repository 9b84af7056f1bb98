use std::time::Duration;

use gpui::{
    ElementId, Entity, FontWeight, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    SharedString, StatefulInteractiveElement, Styled, Window, div, ease_out_quint,
    prelude::FluentBuilder,
};
use lattice_motion::{Lerp, TransitionExt};

use crate::{
    conditional_transition,
    primitives::{FocusRing, Input, InputState, min_w0_wrapper},
    theme::{ThemeExt, ThemeLayerKind},
    utils::{ElementIdExt, PixelsExt, disabled_transition},
};

/// A styled single-line text field: label, themed surface, animated
/// border, and optional masked entry. Editing state lives in the
/// caller-owned [`InputState`] entity.
#[derive(IntoElement)]
pub struct TextField {
    id: ElementId,
    state: Entity<InputState>,
    label: Option<SharedString>,
    placeholder: SharedString,
    layer: ThemeLayerKind,
    masked: bool,
    disabled: bool,
}

impl TextField {
    pub fn new(id: impl Into<ElementId>, state: Entity<InputState>) -> Self {
        Self {
            id: id.into(),
            state,
            label: None,
            placeholder: SharedString::new_static(""),
            layer: ThemeLayerKind::Tertiary,
            masked: false,
            disabled: false,
        }
    }

    pub fn label(mut self, label: impl Into<SharedString>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<SharedString>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }

    /// Replaces displayed characters with bullets.
    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl RenderOnce for TextField {
    fn render(self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let background_color = self.layer.resolve(cx);
        let border_color = self.layer.next().resolve(cx);
        let primary_accent_color = cx.get_theme().variants.active(cx).colors.accent.primary;
        let primary_text_color = cx.get_theme().variants.active(cx).colors.text.primary;
        let border_hover_color = border_color.lerp(&primary_text_color, 0.07);
        let corner_radius = cx.get_theme().layout.corner_radii.md;
        let horizontal_padding = cx.get_theme().layout.padding.lg;
        let caption_size = cx.get_theme().layout.text.default_font.sizes.caption;
        let caption_weight = cx.get_theme().layout.text.default_font.weights.caption;
        let text_size = cx.get_theme().layout.text.default_font.sizes.body;
        let line_height = cx.get_theme().layout.text.default_font.line_height;
        let vertical_padding =
            cx.get_theme()
                .layout
                .size
                .lg
                .padding_needed_for_height(window, text_size, line_height);
        let gap = cx.get_theme().layout.padding.sm;

        let focus_handle = self.state.read(cx).focus_handle.clone();
        let is_focus = focus_handle.is_focused(window);
        let is_disabled = self.disabled;

        let is_hover_state =
            window.use_keyed_state(self.id.with_suffix("state:hover"), cx, |_window, _cx| false);
        let is_hover = *is_hover_state.read(cx);

        let opacity_transition = disabled_transition(self.id.clone(), window, cx, is_disabled);

        if is_focus && is_disabled {
            window.blur();
        }

        let border_transition = conditional_transition!(
            self.id.with_suffix("state:transition:border_color"),
            window,
            cx,
            Duration::from_millis(365),
            {
                is_focus => primary_accent_color,
                is_hover => border_hover_color,
                _ => border_color
            }
        )
        .with_easing(ease_out_quint());

        div()
            .id(self.id.clone())
            .flex()
            .flex_col()
            .gap(gap)
            .w_full()
            .opacity(opacity_transition.evaluate(window, cx))
            .when_some(self.label, |this, label| {
                this.child(
                    min_w0_wrapper()
                        .text_size(caption_size)
                        .font_weight(FontWeight(caption_weight))
                        .child(label),
                )
            })
            .child(
                div()
                    .id(self.id.with_suffix("surface"))
                    .w_full()
                    .pt(vertical_padding)
                    .pb(vertical_padding)
                    .pl(horizontal_padding)
                    .pr(horizontal_padding)
                    .rounded(corner_radius)
                    .bg(background_color)
                    .border_1()
                    .with_transitions(border_transition, |_cx, this, color| {
                        this.border_color(color)
                    })
                    .child(
                        FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle.clone())
                            .rounded(corner_radius),
                    )
                    .child(
                        Input::new(self.id.with_suffix("input"), self.state)
                            .placeholder(self.placeholder)
                            .disabled(is_disabled)
                            .when(self.masked, |this| {
                                this.transform_text(|_char| '\u{2022}')
                            }),
                    )
                    .when(!is_disabled, |this| {
                        let is_hover_state = is_hover_state.clone();

                        this.on_hover(move |hover, _window, cx| {
                            is_hover_state.update(cx, |this, _cx| *this = *hover);
                            cx.notify(is_hover_state.entity_id());
                        })
                    }),
            )
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use gpui::{AppContext, TestAppContext, VisualTestContext};

    #[gpui::test]
    fn builder_state(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let state = cx.new(|cx| InputState::new(cx));
            let field = TextField::new("email", state)
                .label("Email")
                .placeholder("you@example.com")
                .masked(true)
                .disabled(true);

            assert_eq!(field.label.as_deref(), Some("Email"));
            assert_eq!(field.placeholder, SharedString::from("you@example.com"));
            assert!(field.masked);
            assert!(field.disabled);
        });
    }

    #[gpui::test]
    fn state_round_trips_text(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let state = cx.new(|cx| InputState::new(cx).initial_value("seed"));
            assert_eq!(state.read(cx).value(), "seed");
        });
    }

    #[gpui::test]
    fn renders_in_a_window(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            crate::init(cx);

            cx.open_window(Default::default(), |_window, cx| {
                let state = cx.new(|cx| InputState::new(cx));
                cx.new(|_cx| TextFieldTestView { state })
            })
            .unwrap()
        });

        let _cx = VisualTestContext::from_window(window.into(), cx);
    }

    struct TextFieldTestView {
        state: gpui::Entity<InputState>,
    }

    impl gpui::Render for TextFieldTestView {
        fn render(
            &mut self,
            _window: &mut gpui::Window,
            _cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div().size_full().child(
                TextField::new("test-field", self.state.clone())
                    .label("Name")
                    .placeholder("Ada"),
            )
        }
    }
}
