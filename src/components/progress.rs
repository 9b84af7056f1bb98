use std::time::Duration;

use gpui::{
    ElementId, InteractiveElement, IntoElement, Length, ParentElement, RenderOnce, Rgba, Styled,
    div, ease_out_quint, prelude::FluentBuilder, px, relative,
};
use lattice_motion::TransitionExt;

use crate::{
    conditional_transition,
    theme::{ThemeExt, ThemeLayerKind},
    utils::ElementIdExt,
};

/// A determinate progress bar. The fraction is clamped to `0..=1`;
/// non-finite values collapse to zero. Changes animate toward the new
/// fill width.
#[derive(IntoElement)]
pub struct ProgressBar {
    id: ElementId,
    fraction: f32,
    layer: ThemeLayerKind,
    width: Length,
    fill_color: Option<Rgba>,
}

impl ProgressBar {
    pub fn new(id: impl Into<ElementId>, fraction: f32) -> Self {
        Self {
            id: id.into(),
            fraction: if fraction.is_finite() {
                fraction.clamp(0., 1.)
            } else {
                0.
            },
            layer: ThemeLayerKind::Tertiary,
            width: relative(1.).into(),
            fill_color: None,
        }
    }

    /// Convenience for APIs reporting percentages.
    pub fn from_percent(id: impl Into<ElementId>, percent: f32) -> Self {
        Self::new(id, percent / 100.)
    }

    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }

    pub fn w(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    /// Overrides the accent fill color.
    pub fn fill_color(mut self, color: impl Into<Rgba>) -> Self {
        self.fill_color = Some(color.into());
        self
    }

    /// The clamped fraction this bar displays.
    pub fn fraction(&self) -> f32 {
        self.fraction
    }
}

impl RenderOnce for ProgressBar {
    fn render(self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let track_color = self.layer.resolve(cx);
        let border_color = self.layer.next().resolve(cx);
        let fill_color = self
            .fill_color
            .unwrap_or(cx.get_theme().variants.active(cx).colors.accent.primary);
        let height = cx.get_theme().layout.padding.md;
        let fraction = self.fraction;

        let fill_transition = conditional_transition!(
            self.id.with_suffix("state:transition:fraction"),
            window,
            cx,
            Duration::from_millis(250),
            fraction
        )
        .with_easing(ease_out_quint());

        let shown_fraction = fill_transition.evaluate(window, cx).clamp(0., 1.);

        div()
            .id(self.id.clone())
            .w(self.width)
            .h(height)
            .min_h(height)
            .rounded(px(100.))
            .border_1()
            .border_color(border_color)
            .bg(track_color)
            .overflow_hidden()
            .child(
                div()
                    .h_full()
                    .w(relative(shown_fraction))
                    .rounded(px(100.))
                    .bg(fill_color),
            )
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use gpui::TestAppContext;

    #[gpui::test]
    fn fractions_are_clamped(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            assert_eq!(ProgressBar::new("p", -0.5).fraction(), 0.);
            assert_eq!(ProgressBar::new("p", 0.25).fraction(), 0.25);
            assert_eq!(ProgressBar::new("p", 1.5).fraction(), 1.);
        });
    }

    #[gpui::test]
    fn non_finite_fractions_collapse_to_zero(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            assert_eq!(ProgressBar::new("p", f32::NAN).fraction(), 0.);
            assert_eq!(ProgressBar::new("p", f32::INFINITY).fraction(), 0.);
        });
    }

    #[gpui::test]
    fn percent_constructor_divides_by_one_hundred(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            assert_eq!(ProgressBar::from_percent("p", 50.).fraction(), 0.5);
            assert_eq!(ProgressBar::from_percent("p", 250.).fraction(), 1.);
            assert_eq!(ProgressBar::from_percent("p", -10.).fraction(), 0.);
        });
    }
}
