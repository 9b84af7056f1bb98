use std::time::Duration;

use gpui::{
    CursorStyle, ElementId, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    StatefulInteractiveElement, Styled, div, ease_out_quint, prelude::FluentBuilder, px,
};
use lattice_motion::{Lerp, TransitionExt};

use crate::{
    conditional_transition,
    extensions::{ClickHandlers, Clickable},
    primitives::FocusRing,
    theme::{ThemeExt, ThemeLayerKind},
    utils::{ElementIdExt, checked_transition, disabled_transition},
};

/// Linearly remaps `value` from one range to another.
pub fn remap(value: f32, from_min: f32, from_max: f32, to_min: f32, to_max: f32) -> f32 {
    (value - from_min) / (from_max - from_min) * (to_max - to_min) + to_min
}

/// A toggle switch with a sliding knob.
#[derive(IntoElement)]
pub struct Switch {
    id: ElementId,
    layer: ThemeLayerKind,
    checked: bool,
    disabled: bool,
    click_handlers: ClickHandlers,
}

impl Switch {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            layer: ThemeLayerKind::Tertiary,
            checked: false,
            disabled: false,
            click_handlers: ClickHandlers::new(),
        }
    }

    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl Clickable for Switch {
    fn click_handlers_mut(&mut self) -> &mut ClickHandlers {
        &mut self.click_handlers
    }
}

impl RenderOnce for Switch {
    fn render(self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        // The knob widens slightly while focused or pressed.
        const KNOB_FOCUS_MULT: f32 = 1.25;

        let knob_size = cx.get_theme().layout.size.md;
        let padding = cx.get_theme().layout.padding.md;
        let width = (knob_size * 2) + (padding * 2);
        let height = knob_size + (padding * 2);
        let (start_offset, end_offset) = (
            padding.to_f64() as f32,
            (width - knob_size - padding).to_f64() as f32,
        );
        let primary_accent_color = cx.get_theme().variants.active(cx).colors.accent.primary;
        let primary_text_color = cx.get_theme().variants.active(cx).colors.text.primary;
        let background_color = self.layer.resolve(cx);
        let border_color = self.layer.next().resolve(cx);
        let border_hover_color = border_color.lerp(&primary_text_color, 0.07);
        let border_click_down_color = border_color.lerp(&primary_text_color, 0.16);

        let checked_transition = checked_transition(
            self.id.clone(),
            window,
            cx,
            Duration::from_millis(200),
            self.checked,
        );

        let is_disabled = self.disabled;

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
                is_click_down => border_click_down_color,
                is_hover => border_hover_color,
                _ => border_color
            }
        )
        .with_easing(ease_out_quint());

        let knob_width_transition = conditional_transition!(
            self.id.with_suffix("state:transition:knob_width"),
            window,
            cx,
            Duration::from_millis(185),
            {
                is_focus | is_click_down => px((knob_size.to_f64() as f32 * KNOB_FOCUS_MULT).floor()),
                _ => knob_size
            }
        )
        .with_easing(ease_out_quint());

        let checked_delta = checked_transition.evaluate(window, cx);
        let knob_width = knob_width_transition.evaluate(window, cx);

        let track_color = background_color.lerp(&primary_accent_color, checked_delta);
        let offset = remap(checked_delta, 0., 1., start_offset, end_offset);
        let width_diff = (knob_width - knob_size) * checked_delta;

        div()
            .id(self.id.clone())
            .cursor(if is_disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::PointingHand
            })
            .w(width)
            .min_w(width)
            .h(height)
            .min_h(height)
            .rounded(px(100.))
            .border_1()
            .bg(track_color)
            .opacity(opacity_transition.evaluate(window, cx))
            .with_transitions(border_transition, |_cx, this, border_color| {
                this.border_color(border_color)
            })
            .child(
                FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle.clone())
                    .rounded(px(100.)),
            )
            .child(
                div()
                    .absolute()
                    .w(knob_width)
                    .h(knob_size)
                    .top(padding)
                    .left(px(offset) - width_diff)
                    .bg(primary_text_color)
                    .rounded(px(100.)),
            )
            .when(!is_disabled, |this| {
                let is_hover_state_on_hover = is_hover_state.clone();
                let is_click_down_state_on_mouse_down = is_click_down_state.clone();
                let is_click_down_state_on_click = is_click_down_state.clone();

                this.on_hover(move |hover, _window, cx| {
                    is_hover_state_on_hover.update(cx, |this, _cx| *this = *hover);
                    cx.notify(is_hover_state_on_hover.entity_id());
                })
                .on_mouse_down(gpui::MouseButton::Left, move |_, window, cx| {
                    // Prevents the focus ring from appearing on click.
                    window.prevent_default();

                    is_click_down_state_on_mouse_down.update(cx, |this, _cx| *this = true);
                    cx.notify(is_click_down_state_on_mouse_down.entity_id());
                })
                .map(|mut this| {
                    if let Some((button, handler)) = self.click_handlers.on_mouse_down {
                        if button != gpui::MouseButton::Left {
                            this = this.on_mouse_down(button, move |event, window, cx| {
                                window.prevent_default();
                                cx.stop_propagation();
                                (handler)(event, window, cx);
                            });
                        }
                    }

                    if let Some((button, handler)) = self.click_handlers.on_mouse_up {
                        this = this.on_mouse_up(button, move |event, window, cx| {
                            window.prevent_default();
                            cx.stop_propagation();
                            (handler)(event, window, cx);
                        });
                    }

                    if let Some(handler) = self.click_handlers.on_any_mouse_down {
                        this = this.on_any_mouse_down(move |event, window, cx| {
                            window.prevent_default();
                            cx.stop_propagation();
                            (handler)(event, window, cx);
                        });
                    }

                    if let Some(handler) = self.click_handlers.on_any_mouse_up {
                        this.interactivity()
                            .on_any_mouse_up(move |event, window, cx| {
                                window.prevent_default();
                                cx.stop_propagation();
                                (handler)(event, window, cx);
                            });
                    }

                    let on_click = self.click_handlers.on_click;
                    this.on_click(move |event, window, cx| {
                        window.prevent_default();
                        cx.stop_propagation();

                        if !is_focus {
                            // Only blur if something else may be focused.
                            window.blur();
                        }

                        is_click_down_state_on_click.update(cx, |this, _cx| *this = false);
                        cx.notify(is_click_down_state_on_click.entity_id());

                        if let Some(on_click) = &on_click {
                            (on_click)(event, window, cx);
                        }
                    })
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
