use std::time::Duration;

use gpui::{App, ElementId, Window, ease_out_quint};
use lattice_motion::Transition;

use crate::ElementIdExt;

/// Creates (or retrieves) a keyed transition and retargets it to the
/// value of the first matching branch:
///
/// ```ignore
/// let color = conditional_transition!(id, window, cx, Duration::from_millis(250), {
///     is_focus => focus_color,
///     is_hover => hover_color,
///     _ => base_color
/// });
/// ```
///
/// A single expression instead of a brace block sets an unconditional
/// goal.
#[macro_export]
macro_rules! conditional_transition {
    (
        $id:expr, $window:expr, $cx:expr, $duration:expr, $($rest:tt)+
    ) => {{
        use lattice_motion::WindowTransitionExt as _;

        let value = $crate::conditional_transition_branches!(@condition [ $($rest)+ ]);

        let transition = $window.use_keyed_transition(
            $id,
            $cx,
            $duration,
            |_window, _cx| value.clone(),
        );

        if transition.read_goal($cx) != &value {
            transition.set($cx, value);
            $cx.notify(transition.entity_id());
        }

        transition
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! conditional_transition_branches {
    // Entry point for a branch block.
    (@condition [ { $cond:expr => $value:expr, $($rest:tt)+ } ]) => {{
        if $cond { $value } else { $crate::conditional_transition_branches!(@branches [ $($rest)+ ]) }
    }};

    // Entry point for a plain expression.
    (@condition [ $($value:tt)+ ]) => {{
        $($value)+
    }};

    (@branches [ _ => $value:expr, $($rest:tt)+ ]) => {{
        compile_error!("`_ => value` must be the last branch");
    }};

    (@branches [ $cond:expr => $value:expr, $($rest:tt)+ ]) => {{
        if $cond { $value } else { $crate::conditional_transition_branches!(@branches [ $($rest)+ ]) }
    }};

    (@branches [ _ => $value:expr ]) => {{
        $value
    }};

    (@branches [ $cond:expr => $value:expr ]) => {{
        compile_error!("the last branch must be `_ => value`");
    }};
}

/// Fades a component towards the disabled opacity and back.
pub fn disabled_transition(
    base_id: impl Into<ElementId>,
    window: &mut Window,
    cx: &mut App,
    is_disabled: bool,
) -> Transition<f32> {
    let base_id: ElementId = base_id.into();

    conditional_transition!(
        base_id.with_suffix("state:transition:disabled"),
        window,
        cx,
        Duration::from_millis(365),
        {
            is_disabled => 0.45,
            _ => 1.
        }
    )
    .with_easing(ease_out_quint())
}

/// Animates a checked fraction between 0 and 1.
pub fn checked_transition(
    base_id: impl Into<ElementId>,
    window: &mut Window,
    cx: &mut App,
    duration: Duration,
    is_checked: bool,
) -> Transition<f32> {
    let base_id: ElementId = base_id.into();

    conditional_transition!(
        base_id.with_suffix("state:transition:checked"),
        window,
        cx,
        duration,
        {
            is_checked => 1.,
            _ => 0.
        }
    )
    .with_easing(ease_out_quint())
}
