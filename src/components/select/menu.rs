use std::sync::Arc;

use gpui::{
    ElementId, InteractiveElement, ParentElement, SharedString, Styled, div, prelude::*, px,
};

use crate::{
    ElementIdExt,
    components::select::{
        Confirm, Dismiss, KEY_CONTEXT, MoveDown, MoveUp, SelectItem, SelectState,
    },
    extensions::{Deferrable, DeferredConfig},
    primitives::min_w0_wrapper,
    theme::{ThemeExt, ThemeLayerKind},
    utils::RgbaExt,
};

/// The dropdown list of a select. Rendered by [`super::Select`] as a
/// deferred overlay so it paints above surrounding content.
#[derive(IntoElement)]
pub struct SelectMenu<V: 'static, I: SelectItem<Value = V> + 'static> {
    id: ElementId,
    layer: ThemeLayerKind,
    state: Arc<SelectState<V, I>>,
    deferred_config: DeferredConfig,
}

impl<V: 'static, I: SelectItem<Value = V> + 'static> SelectMenu<V, I> {
    pub fn new(id: impl Into<ElementId>, state: Arc<SelectState<V, I>>) -> Self {
        Self {
            id: id.into(),
            layer: ThemeLayerKind::Tertiary,
            state,
            deferred_config: DeferredConfig::default(),
        }
    }

    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }
}

impl<V: 'static, I: SelectItem<Value = V> + 'static> Deferrable for SelectMenu<V, I> {
    const DEFAULT_PRIORITY: usize = 1;

    fn deferred_config(&self) -> &DeferredConfig {
        &self.deferred_config
    }

    fn deferred_config_mut(&mut self) -> &mut DeferredConfig {
        &mut self.deferred_config
    }
}

impl<V: 'static, I: SelectItem<Value = V> + 'static> RenderOnce for SelectMenu<V, I> {
    fn render(self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let background_color = self.layer.resolve(cx);
        let border_color = self.layer.next().resolve(cx);
        let primary_accent_color = cx.get_theme().variants.active(cx).colors.accent.primary;
        let primary_text_color = cx.get_theme().variants.active(cx).colors.text.primary;
        let corner_radius = cx.get_theme().layout.corner_radii.md;
        let item_radius = cx.get_theme().layout.corner_radii.sm;
        let padding = cx.get_theme().layout.padding.md;
        let text_size = cx.get_theme().layout.text.default_font.sizes.body;

        let open_delta = self
            .state
            .menu_open_transition
            .evaluate(window, cx)
            .value();

        let selected = self.state.selected_name(cx);
        let highlighted = self.state.highlighted_name(cx);

        let items: Vec<SharedString> = self
            .state
            .items
            .read(cx)
            .iter()
            .map(|(name, _entry)| name.clone())
            .collect();

        let state_for_up = self.state.clone();
        let state_for_down = self.state.clone();
        let state_for_confirm = self.state.clone();
        let state_for_dismiss = self.state.clone();

        let menu = div()
            .id(self.id.clone())
            .key_context(KEY_CONTEXT)
            .on_action(move |_: &MoveUp, _window, cx| {
                state_for_up.move_highlight_up(cx);
            })
            .on_action(move |_: &MoveDown, _window, cx| {
                state_for_down.move_highlight_down(cx);
            })
            .on_action(move |_: &Confirm, window, cx| {
                state_for_confirm.confirm_highlight(window, cx);
                window.blur();
            })
            .on_action(move |_: &Dismiss, _window, cx| {
                state_for_dismiss.set_open(cx, false);
            })
            .w_full()
            .flex()
            .flex_col()
            .gap(px(2.))
            .p(padding)
            .rounded(corner_radius)
            .bg(background_color)
            .border_1()
            .border_color(border_color)
            .opacity(open_delta)
            .children(items.into_iter().enumerate().map(|(index, name)| {
                let is_selected = selected.as_ref() == Some(&name);
                let is_highlighted = highlighted.as_ref() == Some(&name);
                let state_for_click = self.state.clone();
                let state_for_hover = self.state.clone();
                let click_name = name.clone();
                let hover_name = name.clone();

                div()
                    .id(self.id.with_suffix(format!("item-{index}")))
                    .w_full()
                    .p(padding)
                    .rounded(item_radius)
                    .when(is_highlighted, |this| {
                        this.bg(primary_accent_color.alpha(0.15))
                    })
                    .when(is_selected, |this| {
                        this.bg(primary_accent_color.alpha(0.25))
                    })
                    .child(
                        min_w0_wrapper()
                            .text_size(text_size)
                            .when(is_selected || is_highlighted, |this| {
                                this.text_color(primary_text_color)
                            })
                            .text_ellipsis()
                            .child(name),
                    )
                    .on_hover(move |hover, _window, cx| {
                        if *hover {
                            state_for_hover.highlighted_item.update(cx, |this, cx| {
                                if this.as_ref() != Some(&hover_name) {
                                    *this = Some(hover_name.clone());
                                    cx.notify();
                                }
                            });
                        }
                    })
                    .on_click(move |_event, window, cx| {
                        window.prevent_default();
                        cx.stop_propagation();

                        let _ = state_for_click.select(&click_name, window, cx);
                        state_for_click.set_open(cx, false);
                    })
            }));

        self.apply_deferred(menu)
    }
}
