use gpui::{
    Edges, Hsla, IntoElement, Length, Radians, RenderOnce, SharedString, SizeRefinement, Styled,
    Transformation, prelude::FluentBuilder, px, relative, svg,
};

use crate::theme::ThemeExt;

/// Flex layout overrides for an [`Icon`].
#[derive(Clone, Default)]
pub struct IconStyle {
    pub flex_grow: Option<f32>,
    pub flex_shrink: Option<f32>,
    pub flex_basis: Option<Length>,
}

/// An SVG icon with configurable size, color, rotation, and margins.
/// Defaults to the theme's primary text color.
#[derive(IntoElement)]
pub struct Icon {
    path: SharedString,
    pub(crate) size: SizeRefinement<Length>,
    rotate: Radians,
    color: Option<Hsla>,
    style: IconStyle,
    margin: Edges<Option<Length>>,
}

impl Icon {
    /// Creates an icon from an SVG asset path (see [`crate::IconKind`]
    /// for the bundled set).
    pub fn new(path: impl Into<SharedString>) -> Self {
        Self {
            path: path.into(),
            size: SizeRefinement::default(),
            rotate: Radians(0.),
            color: None,
            style: IconStyle::default(),
            margin: Edges::default(),
        }
    }

    /// Sets uniform width and height.
    pub fn size(mut self, size: impl Into<Length>) -> Self {
        let size = size.into();
        self.size = SizeRefinement {
            width: Some(size),
            height: Some(size),
        };
        self
    }

    /// Overrides the theme text color.
    pub fn color(mut self, color: impl Into<Hsla>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn rotate(mut self, rotate: impl Into<Radians>) -> Self {
        self.rotate = rotate.into();
        self
    }

    pub fn m(mut self, margin: impl Into<Length>) -> Self {
        self.margin = Edges::all(Some(margin.into()));
        self
    }

    pub fn mt(mut self, margin: impl Into<Length>) -> Self {
        self.margin.top = Some(margin.into());
        self
    }

    pub fn mb(mut self, margin: impl Into<Length>) -> Self {
        self.margin.bottom = Some(margin.into());
        self
    }

    pub fn ml(mut self, margin: impl Into<Length>) -> Self {
        self.margin.left = Some(margin.into());
        self
    }

    pub fn mr(mut self, margin: impl Into<Length>) -> Self {
        self.margin.right = Some(margin.into());
        self
    }

    /// Lets the icon grow and shrink, ignoring its initial size.
    pub fn flex_1(mut self) -> Self {
        self.style.flex_grow = Some(1.);
        self.style.flex_shrink = Some(1.);
        self.style.flex_basis = Some(relative(0.).into());
        self
    }

    /// Prevents the icon from growing or shrinking.
    pub fn flex_none(mut self) -> Self {
        self.style.flex_grow = Some(0.);
        self.style.flex_shrink = Some(0.);
        self
    }

    pub fn flex_shrink_0(mut self) -> Self {
        self.style.flex_shrink = Some(0.);
        self
    }

    pub fn style(mut self, style: IconStyle) -> Self {
        self.style = style;
        self
    }
}

impl RenderOnce for Icon {
    fn render(self, _window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let primary_text_color = cx.get_theme().variants.active(cx).colors.text.primary;
        let width = self.size.width.unwrap_or(px(14.).into());
        let height = self.size.height.unwrap_or(px(14.).into());

        svg()
            .path(self.path)
            .text_color(primary_text_color)
            .w(width)
            .min_w(width)
            .h(height)
            .min_h(height)
            .when_some(self.margin.top, |this, value| this.mt(value))
            .when_some(self.margin.bottom, |this, value| this.mb(value))
            .when_some(self.margin.left, |this, value| this.ml(value))
            .when_some(self.margin.right, |this, value| this.mr(value))
            .with_transformation(Transformation::rotate(self.rotate))
            .when_some(self.color, |this, color| this.text_color(color))
            .when_some(self.style.flex_grow, |mut this, value| {
                this.style().flex_grow = Some(value);
                this
            })
            .when_some(self.style.flex_shrink, |mut this, value| {
                this.style().flex_shrink = Some(value);
                this
            })
            .when_some(self.style.flex_basis, |this, value| this.flex_basis(value))
    }
}
