use std::time::Duration;

use gpui::{
    ElementId, FocusHandle, IntoElement, Pixels, RenderOnce, ease_out_quint, prelude::*, px,
};
use lattice_motion::{Transition, TransitionExt};

use crate::{theme::ThemeExt, utils::RgbaExt};

/// How far the ring spreads beyond the component while unfocused; it
/// contracts onto the component as focus lands.
const SPREAD: f32 = 8.;

/// An animated ring drawn around the focused component. Place it as the
/// first child of an `absolute`-capable container.
#[derive(IntoElement)]
pub struct FocusRing {
    id: ElementId,
    focus_handle: FocusHandle,
    corner_radius: Option<Pixels>,
}

impl FocusRing {
    pub fn new(id: impl Into<ElementId>, focus_handle: FocusHandle) -> Self {
        Self {
            id: id.into(),
            focus_handle,
            corner_radius: None,
        }
    }

    /// Matches the ring's corners to the component it wraps.
    pub fn rounded(mut self, corner_radius: impl Into<Pixels>) -> Self {
        self.corner_radius = Some(corner_radius.into());
        self
    }
}

impl RenderOnce for FocusRing {
    fn render(self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let ring_color = cx.get_theme().variants.active(cx).colors.accent.primary;
        let corner_radius = self
            .corner_radius
            .unwrap_or(cx.get_theme().layout.corner_radii.md);

        let is_focused = self.focus_handle.is_focused(window) as u8 as f32;

        let progress = Transition::new(
            self.id.clone(),
            window,
            cx,
            Duration::from_millis(365),
            |_window, _cx| is_focused,
        )
        .with_easing(ease_out_quint());

        if progress.set(cx, is_focused) {
            cx.notify(progress.entity_id());
        }

        gpui::div()
            .absolute()
            .border_2()
            .with_transitions(progress, move |_cx, this, delta| {
                let spread = (1. - delta) * SPREAD + 3.;

                this.top(px(-spread))
                    .bottom(px(-spread))
                    .left(px(-spread))
                    .right(px(-spread))
                    .rounded(corner_radius + px(spread))
                    .border_color(ring_color.alpha(delta * 0.3))
            })
    }
}
