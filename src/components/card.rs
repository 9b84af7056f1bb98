use gpui::{
    AnyElement, ElementId, FontWeight, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    SharedString, Styled, div, prelude::FluentBuilder,
};
use smallvec::SmallVec;

use crate::{
    primitives::min_w0_wrapper,
    theme::{ThemeExt, ThemeLayerKind},
};

/// A layered surface grouping related content, with optional title,
/// subtitle, and footer rows.
#[derive(IntoElement)]
pub struct Card {
    id: ElementId,
    layer: ThemeLayerKind,
    title: Option<SharedString>,
    subtitle: Option<SharedString>,
    bordered: bool,
    children: SmallVec<[AnyElement; 2]>,
    footer: SmallVec<[AnyElement; 1]>,
}

impl Card {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            layer: ThemeLayerKind::Secondary,
            title: None,
            subtitle: None,
            bordered: true,
            children: SmallVec::new(),
            footer: SmallVec::new(),
        }
    }

    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }

    pub fn title(mut self, title: impl Into<SharedString>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<SharedString>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn borderless(mut self) -> Self {
        self.bordered = false;
        self
    }

    /// Appends an element to the footer row.
    pub fn footer(mut self, element: impl IntoElement) -> Self {
        self.footer.push(element.into_any_element());
        self
    }
}

impl ParentElement for Card {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl RenderOnce for Card {
    fn render(self, _window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let background_color = self.layer.resolve(cx);
        let border_color = self.layer.next().resolve(cx);
        let corner_radius = cx.get_theme().layout.corner_radii.lg;
        let padding = cx.get_theme().layout.padding.xl;
        let gap = cx.get_theme().layout.padding.md;
        let title_size = cx.get_theme().layout.text.default_font.sizes.heading_sm;
        let title_weight = cx.get_theme().layout.text.default_font.weights.heading_sm;
        let caption_size = cx.get_theme().layout.text.default_font.sizes.caption;
        let primary_text_color = cx.get_theme().variants.active(cx).colors.text.primary;
        let has_header = self.title.is_some() || self.subtitle.is_some();

        div()
            .id(self.id)
            .flex()
            .flex_col()
            .gap(gap)
            .p(padding)
            .rounded(corner_radius)
            .bg(background_color)
            .when(self.bordered, |this| {
                this.border_1().border_color(border_color)
            })
            .when(has_header, |this| {
                this.child(
                    div()
                        .flex()
                        .flex_col()
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
                        .when_some(self.subtitle, |this, subtitle| {
                            this.child(
                                min_w0_wrapper()
                                    .text_size(caption_size)
                                    .text_ellipsis()
                                    .child(subtitle),
                            )
                        }),
                )
            })
            .children(self.children)
            .when(!self.footer.is_empty(), |this| {
                this.child(
                    div()
                        .flex()
                        .items_center()
                        .justify_end()
                        .gap(gap)
                        .children(self.footer),
                )
            })
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
            let card = Card::new("profile")
                .title("Profile")
                .subtitle("Your public details")
                .layer(ThemeLayerKind::Tertiary)
                .borderless();

            assert_eq!(card.title.as_deref(), Some("Profile"));
            assert_eq!(card.subtitle.as_deref(), Some("Your public details"));
            assert!(!card.bordered);
            assert!(matches!(card.layer, ThemeLayerKind::Tertiary));
        });
    }

    #[gpui::test]
    fn collects_children_and_footer(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let card = Card::new("c")
                .child(div().child("body"))
                .footer(div().child("ok"));

            assert_eq!(card.children.len(), 1);
            assert_eq!(card.footer.len(), 1);
        });
    }

    #[gpui::test]
    fn renders_in_a_window(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            cx.open_window(Default::default(), |_window, cx| cx.new(|_cx| CardTestView))
                .unwrap()
        });

        let _cx = VisualTestContext::from_window(window.into(), cx);
    }

    struct CardTestView;

    impl gpui::Render for CardTestView {
        fn render(
            &mut self,
            _window: &mut gpui::Window,
            _cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div().size_full().child(
                Card::new("test-card")
                    .title("Title")
                    .child(div().child("content")),
            )
        }
    }
}
