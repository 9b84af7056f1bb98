//! A generic dropdown select. State lives in a shared
//! [`SelectState`]; the trigger and the deferred menu both read it, so
//! a select can be driven from anywhere that can reach the state.

mod item;
pub use item::*;

mod menu;
pub use menu::*;

mod state;
pub use state::*;

use std::sync::Arc;
use std::time::Duration;

use gpui::{
    CursorStyle, ElementId, InteractiveElement, IntoElement, ParentElement, Radians, RenderOnce,
    SharedString, StatefulInteractiveElement, Styled, div, ease_out_quint, prelude::FluentBuilder,
    px,
};
use lattice_motion::{Lerp, TransitionExt};

use crate::{
    IconKind, conditional_transition,
    components::Icon,
    primitives::{FocusRing, min_w0_wrapper},
    theme::{ThemeExt, ThemeLayerKind},
    utils::{ElementIdExt, PixelsExt, disabled_transition},
};

/// The select trigger: shows the current selection, toggles the menu.
#[derive(IntoElement)]
pub struct Select<V: 'static, I: SelectItem<Value = V> + 'static> {
    id: ElementId,
    state: Arc<SelectState<V, I>>,
    layer: ThemeLayerKind,
    placeholder: SharedString,
    disabled: bool,
}

impl<V: 'static, I: SelectItem<Value = V> + 'static> Select<V, I> {
    pub fn new(id: impl Into<ElementId>, state: impl Into<Arc<SelectState<V, I>>>) -> Self {
        Self {
            id: id.into(),
            state: state.into(),
            layer: ThemeLayerKind::Tertiary,
            placeholder: "Select...".into(),
            disabled: false,
        }
    }

    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<SharedString>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl<V: 'static, I: SelectItem<Value = V> + 'static> RenderOnce for Select<V, I> {
    fn render(self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let background_color = self.layer.resolve(cx);
        let border_color = self.layer.next().resolve(cx);
        let primary_accent_color = cx.get_theme().variants.active(cx).colors.accent.primary;
        let primary_text_color = cx.get_theme().variants.active(cx).colors.text.primary;
        let border_hover_color = border_color.lerp(&primary_text_color, 0.07);
        let corner_radius = cx.get_theme().layout.corner_radii.md;
        let horizontal_padding = cx.get_theme().layout.padding.lg;
        let gap = cx.get_theme().layout.padding.sm;
        let text_size = cx.get_theme().layout.text.default_font.sizes.body;
        let line_height = cx.get_theme().layout.text.default_font.line_height;
        let trigger_height = cx.get_theme().layout.size.lg;
        let vertical_padding =
            trigger_height.padding_needed_for_height(window, text_size, line_height);

        let is_disabled = self.disabled;
        let is_open = self.state.is_open(cx);
        let open_delta = self
            .state
            .menu_open_transition
            .evaluate(window, cx)
            .value();
        let selected = self.state.selected_name(cx);

        let focus_handle = window
            .use_keyed_state(
                self.id.with_suffix("state:focus_handle"),
                cx,
                |_window, cx| cx.focus_handle().tab_stop(true),
            )
            .read(cx)
            .clone();
        let is_focus = focus_handle.is_focused(window);

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
                is_focus || is_open => primary_accent_color,
                is_hover => border_hover_color,
                _ => border_color
            }
        )
        .with_easing(ease_out_quint());

        let state_for_click = self.state.clone();

        div()
            .id(self.id.clone())
            .w_full()
            .opacity(opacity_transition.evaluate(window, cx))
            .child(
                div()
                    .id(self.id.with_suffix("trigger"))
                    .cursor(if is_disabled {
                        CursorStyle::OperationNotAllowed
                    } else {
                        CursorStyle::PointingHand
                    })
                    .w_full()
                    .flex()
                    .items_center()
                    .justify_between()
                    .gap(gap)
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
                        min_w0_wrapper()
                            .text_size(text_size)
                            .when(selected.is_some(), |this| {
                                this.text_color(primary_text_color)
                            })
                            .text_ellipsis()
                            .child(selected.unwrap_or(self.placeholder)),
                    )
                    .child(
                        Icon::new(IconKind::ChevronDown)
                            .size(px(12.))
                            .rotate(Radians(open_delta * std::f32::consts::PI))
                            .flex_shrink_0(),
                    )
                    .when(!is_disabled, |this| {
                        let is_hover_state = is_hover_state.clone();

                        this.on_hover(move |hover, _window, cx| {
                            is_hover_state.update(cx, |this, _cx| *this = *hover);
                            cx.notify(is_hover_state.entity_id());
                        })
                        .on_click(move |_event, window, cx| {
                            window.prevent_default();
                            cx.stop_propagation();

                            state_for_click.toggle(cx);
                            window.focus(&focus_handle);
                        })
                    }),
            )
            // The menu overlays content below the trigger; it stays
            // mounted during the close animation.
            .when(open_delta > 0., |this| {
                this.child(
                    div()
                        .absolute()
                        .left(px(0.))
                        .right(px(0.))
                        .top(trigger_height + px(4.))
                        .child(SelectMenu::new(
                            self.id.with_suffix("menu"),
                            self.state.clone(),
                        )),
                )
            })
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use gpui::{AppContext, TestAppContext, VisualTestContext, Window};

    fn fruit_state(cx: &mut gpui::App) -> SelectState<SharedString, TextItem> {
        let mut items = SelectItems::new();
        items.push_item(cx, "Apple");
        items.push_item(cx, "Banana");
        items.push_item(cx, "Cherry");
        SelectState::from_cx(cx, items)
    }

    #[gpui::test]
    fn items_keep_insertion_order(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let state = fruit_state(cx);
            let items = state.items.read(cx);

            let names: Vec<_> = items.iter().map(|(name, _)| name.to_string()).collect();
            assert_eq!(names, ["Apple", "Banana", "Cherry"]);
            assert_eq!(items.get_index_of(&"Banana".into()), Some(1));
        });
    }

    #[gpui::test]
    fn duplicate_names_replace_existing_entries(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let mut items: SelectItems<SharedString, TextItem> = SelectItems::new();
            items.push_item(cx, "One");
            items.push_item(cx, "One");
            assert_eq!(items.len(), 1);
        });
    }

    #[gpui::test]
    fn open_state_follows_the_transition_goal(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let state = fruit_state(cx);
            assert!(!state.is_open(cx));

            state.set_open(cx, true);
            assert!(state.is_open(cx));

            state.toggle(cx);
            assert!(!state.is_open(cx));
        });
    }

    #[gpui::test]
    fn opening_highlights_the_selection(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let state = fruit_state(cx);

            state.selected_item.update(cx, |selected, _cx| {
                *selected = Some("Banana".into());
            });

            state.set_open(cx, true);
            assert_eq!(state.highlighted_name(cx), Some("Banana".into()));
        });
    }

    #[gpui::test]
    fn highlight_moves_and_clamps(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let state = fruit_state(cx);

            // With no highlight, moving down starts at the top.
            state.move_highlight_down(cx);
            assert_eq!(state.highlighted_name(cx), Some("Apple".into()));

            state.move_highlight_down(cx);
            state.move_highlight_down(cx);
            assert_eq!(state.highlighted_name(cx), Some("Cherry".into()));

            // Clamped at the last item.
            state.move_highlight_down(cx);
            assert_eq!(state.highlighted_name(cx), Some("Cherry".into()));

            state.move_highlight_up(cx);
            assert_eq!(state.highlighted_name(cx), Some("Banana".into()));
        });
    }

    #[gpui::test]
    fn selecting_unknown_names_fails(cx: &mut TestAppContext) {
        let (_window, mut cx_handle) = open_test_window(cx);

        cx_handle.update(|window, cx| {
            let state = Arc::new(fruit_state(cx));

            assert_eq!(
                state.select(&"Durian".into(), window, cx),
                Err(SelectItemError::InvalidName)
            );
            assert!(state.select(&"Apple".into(), window, cx).is_ok());
            assert_eq!(state.selected_name(cx), Some("Apple".into()));
        });
    }

    #[gpui::test]
    fn confirm_selects_the_highlight_and_closes(cx: &mut TestAppContext) {
        let (_window, mut cx_handle) = open_test_window(cx);

        cx_handle.update(|window, cx| {
            let state = Arc::new(fruit_state(cx));
            state.set_open(cx, true);
            state.move_highlight_down(cx);

            state.confirm_highlight(window, cx);

            assert_eq!(state.selected_name(cx), Some("Apple".into()));
            assert!(!state.is_open(cx));
        });
    }

    #[gpui::test]
    fn change_callback_receives_the_value(cx: &mut TestAppContext) {
        use std::cell::RefCell;
        use std::rc::Rc;

        let (_window, mut cx_handle) = open_test_window(cx);

        cx_handle.update(|window, cx| {
            let seen: Rc<RefCell<Vec<String>>> = Rc::default();
            let seen_in_callback = seen.clone();

            let mut items: SelectItems<SharedString, TextItem> = SelectItems::new();
            items.push_item(cx, "Alpha");
            items.push_item(cx, "Beta");

            let state = Arc::new(SelectState::from_cx(cx, items).on_change(
                move |value, _window, _cx| {
                    seen_in_callback.borrow_mut().push(value.to_string());
                },
            ));

            state.select(&"Beta".into(), window, cx).unwrap();
            assert_eq!(seen.borrow().as_slice(), ["Beta"]);
        });
    }

    #[gpui::test]
    fn renders_in_a_window(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            crate::init(cx);

            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|_cx| SelectTestView)
            })
            .unwrap()
        });

        let _cx = VisualTestContext::from_window(window.into(), cx);
    }

    fn open_test_window(
        cx: &mut TestAppContext,
    ) -> (gpui::WindowHandle<SelectTestView>, VisualTestContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|_cx| SelectTestView)
            })
            .unwrap()
        });

        let cx = VisualTestContext::from_window(window.into(), cx);
        (window, cx)
    }

    struct SelectTestView;

    impl gpui::Render for SelectTestView {
        fn render(
            &mut self,
            window: &mut Window,
            cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            let state = SelectState::<SharedString, TextItem>::from_window(
                "test-select-state",
                window,
                cx,
                |_window, cx| {
                    let mut items = SelectItems::new();
                    items.push_item(cx, "First");
                    items.push_item(cx, "Second");
                    items
                },
            );

            div()
                .size_full()
                .child(Select::new("test-select", state).placeholder("Pick one"))
        }
    }
}
