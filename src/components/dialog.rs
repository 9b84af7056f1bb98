use std::time::Duration;

use gpui::{
    AnyElement, App, ClickEvent, ElementId, FontWeight, IntoElement, KeyBinding, ParentElement,
    Pixels, RenderOnce, SharedString, Styled, Window, actions, div, ease_out_quint,
    prelude::FluentBuilder, px,
};
use gpui::{InteractiveElement, StatefulInteractiveElement};
use lattice_motion::TransitionExt;
use smallvec::SmallVec;

use crate::{
    conditional_transition,
    extensions::{Deferrable, DeferredConfig},
    primitives::min_w0_wrapper,
    theme::{ThemeExt, ThemeLayerKind},
    utils::{ElementIdExt, rgb_a},
};

actions!(dialog, [Dismiss]);

/// Key context for an open dialog.
pub const KEY_CONTEXT: &str = "Dialog";

/// Registers the dialog's escape binding. Called by [`crate::init`].
pub fn init(cx: &mut App) {
    cx.bind_keys([KeyBinding::new("escape", Dismiss, Some(KEY_CONTEXT))]);
}

/// A modal dialog: dimmed backdrop, centered panel, title and action
/// row. Controlled by the `open` prop; dismissal (backdrop click or
/// escape) is reported through `on_dismiss`, and the host flips the
/// prop. The overlay paints deferred so it covers surrounding content;
/// it spans the nearest sized ancestor, normally the window root.
#[derive(IntoElement)]
pub struct Dialog {
    id: ElementId,
    open: bool,
    title: Option<SharedString>,
    layer: ThemeLayerKind,
    width: Pixels,
    children: SmallVec<[AnyElement; 2]>,
    actions: SmallVec<[AnyElement; 2]>,
    on_dismiss: Option<Box<dyn Fn(&mut Window, &mut App) + 'static>>,
    deferred_config: DeferredConfig,
}

impl Dialog {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            open: false,
            title: None,
            layer: ThemeLayerKind::Secondary,
            width: px(440.),
            children: SmallVec::new(),
            actions: SmallVec::new(),
            on_dismiss: None,
            deferred_config: DeferredConfig::default(),
        }
    }

    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    pub fn title(mut self, title: impl Into<SharedString>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }

    pub fn width(mut self, width: impl Into<Pixels>) -> Self {
        self.width = width.into();
        self
    }

    /// Appends an element to the action row, e.g. confirm buttons.
    pub fn action(mut self, element: impl IntoElement) -> Self {
        self.actions.push(element.into_any_element());
        self
    }

    pub fn on_dismiss(mut self, on_dismiss: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.on_dismiss = Some(Box::new(on_dismiss));
        self
    }
}

impl ParentElement for Dialog {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl Deferrable for Dialog {
    // Above select menus.
    const DEFAULT_PRIORITY: usize = 2;

    fn deferred_config(&self) -> &DeferredConfig {
        &self.deferred_config
    }

    fn deferred_config_mut(&mut self) -> &mut DeferredConfig {
        &mut self.deferred_config
    }
}

impl RenderOnce for Dialog {
    fn render(self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let is_open = self.open;

        let open_transition = conditional_transition!(
            self.id.with_suffix("state:transition:open"),
            window,
            cx,
            Duration::from_millis(225),
            {
                is_open => 1f32,
                _ => 0.
            }
        )
        .with_easing(ease_out_quint());

        let open_delta = open_transition.evaluate(window, cx);

        // Fully closed and settled: mount nothing.
        if !is_open && open_delta == 0. {
            return div().into_any_element();
        }

        let background_color = self.layer.resolve(cx);
        let border_color = self.layer.next().resolve(cx);
        let corner_radius = cx.get_theme().layout.corner_radii.lg;
        let padding = cx.get_theme().layout.padding.xl;
        let gap = cx.get_theme().layout.padding.lg;
        let title_size = cx.get_theme().layout.text.default_font.sizes.heading_md;
        let title_weight = cx.get_theme().layout.text.default_font.weights.heading_md;
        let primary_text_color = cx.get_theme().variants.active(cx).colors.text.primary;

        // The panel settles downward into place as it fades in.
        let panel_offset = px(12. * (1. - open_delta));

        let on_dismiss_for_backdrop = self.on_dismiss;

        let overlay = div()
            .id(self.id.clone())
            .key_context(KEY_CONTEXT)
            .absolute()
            .top_0()
            .left_0()
            .size_full()
            .flex()
            .items_center()
            .justify_center()
            .bg(rgb_a(0x000000, 0.55 * open_delta))
            .opacity(open_delta)
            .map(|mut this| {
                if let Some(on_dismiss) = on_dismiss_for_backdrop {
                    let dismiss_for_click = std::rc::Rc::new(on_dismiss);
                    let dismiss_for_escape = dismiss_for_click.clone();

                    this = this
                        .on_click(move |_event: &ClickEvent, window, cx| {
                            window.prevent_default();
                            cx.stop_propagation();
                            dismiss_for_click(window, cx);
                        })
                        .on_action(move |_: &Dismiss, window, cx| {
                            dismiss_for_escape(window, cx);
                        });
                }
                this
            })
            .child(
                div()
                    .id(self.id.with_suffix("panel"))
                    .w(self.width)
                    .max_w(px(560.))
                    .mt(panel_offset)
                    .flex()
                    .flex_col()
                    .gap(gap)
                    .p(padding)
                    .rounded(corner_radius)
                    .bg(background_color)
                    .border_1()
                    .border_color(border_color)
                    // Clicks inside the panel are not dismissals.
                    .on_click(|_event, _window, cx| {
                        cx.stop_propagation();
                    })
                    .when_some(self.title, |this, title| {
                        this.child(
                            min_w0_wrapper()
                                .text_size(title_size)
                                .text_color(primary_text_color)
                                .font_weight(FontWeight(title_weight))
                                .text_ellipsis()
                                .child(title),
                        )
                    })
                    .children(self.children)
                    .when(!self.actions.is_empty(), |this| {
                        this.child(
                            div()
                                .flex()
                                .items_center()
                                .justify_end()
                                .gap(gap)
                                .children(self.actions),
                        )
                    }),
            );

        let config = self.deferred_config;
        if config.enabled {
            gpui::deferred(overlay)
                .priority(config.priority.unwrap_or(Self::DEFAULT_PRIORITY))
                .into_any_element()
        } else {
            overlay.into_any_element()
        }
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::components::{Button, ButtonVariant};
    use crate::theme::Theme;
    use gpui::{AppContext, TestAppContext, VisualTestContext};

    #[gpui::test]
    fn builder_state(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let dialog = Dialog::new("confirm")
                .open(true)
                .title("Delete item?")
                .width(px(360.))
                .action(div().child("cancel"))
                .action(div().child("delete"));

            assert!(dialog.open);
            assert_eq!(dialog.title.as_deref(), Some("Delete item?"));
            assert_eq!(dialog.width, px(360.));
            assert_eq!(dialog.actions.len(), 2);
        });
    }

    #[gpui::test]
    fn starts_closed_without_callbacks(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let dialog = Dialog::new("d");
            assert!(!dialog.open);
            assert!(dialog.on_dismiss.is_none());
        });
    }

    #[gpui::test]
    fn renders_open_in_a_window(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            crate::init(cx);

            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|_cx| DialogTestView { open: true })
            })
            .unwrap()
        });

        let _cx = VisualTestContext::from_window(window.into(), cx);
    }

    struct DialogTestView {
        open: bool,
    }

    impl gpui::Render for DialogTestView {
        fn render(
            &mut self,
            _window: &mut gpui::Window,
            cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div().size_full().child(
                Dialog::new("test-dialog")
                    .open(self.open)
                    .title("Session expired")
                    .child(div().child("Sign in again to continue."))
                    .action(
                        Button::new("dialog-ok")
                            .text("OK")
                            .variant(ButtonVariant::Primary),
                    )
                    .on_dismiss({
                        let view = cx.entity();
                        move |_window, cx| {
                            view.update(cx, |view, cx| {
                                view.open = false;
                                cx.notify();
                            });
                        }
                    }),
            )
        }
    }
}
