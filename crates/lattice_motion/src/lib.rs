//! Goal-driven transitions for GPUI elements.
//!
//! A [`Transition`] stores a goal value in an entity. Every render,
//! components update the goal (hover color, checked state, opacity) and
//! evaluate the in-flight value; while a transition is running the
//! window keeps scheduling animation frames, so stateless `RenderOnce`
//! components animate without owning timers.

use std::{
    fmt::Debug,
    ops::{Add, Mul, Sub},
    rc::Rc,
    time::{Duration, Instant},
};

use gpui::{
    AnyElement, App, Bounds, Context, Corners, Edges, Element, ElementId, Entity, EntityId,
    GlobalElementId, InspectorElementId, InteractiveElement, Interactivity, IntoElement, LayoutId,
    ParentElement, Pixels, Point, Radians, Rems, Rgba, Size, StatefulInteractiveElement,
    StyleRefinement, Styled, Window, linear, px,
};

/// A value that can be interpolated between two goals.
pub trait MotionGoal {
    /// The value at `delta` (0..=1) between `self` and `to`.
    fn apply_delta(&self, to: &Self, delta: f32) -> Self;
}

/// Convenience alias for [`MotionGoal::apply_delta`] with the usual
/// lerp argument order.
pub trait Lerp: MotionGoal + Sized {
    fn lerp(&self, to: &Self, t: f32) -> Self {
        self.apply_delta(to, t)
    }
}

impl<T: MotionGoal> Lerp for T {}

fn lerp<T>(a: T, b: T, t: T) -> T
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<Output = T>,
{
    a + (b - a) * t
}

macro_rules! float_goals {
    ( $( $ty:ty ),+ ) => {
        $(
            impl MotionGoal for $ty {
                fn apply_delta(&self, to: &Self, delta: f32) -> Self {
                    lerp(*self, *to, delta as $ty)
                }
            }
        )+
    };
}

float_goals!(f32, f64);

macro_rules! int_goals {
    ( $( $ty:ident ),+ ) => {
        $(
            impl MotionGoal for $ty {
                fn apply_delta(&self, to: &Self, delta: f32) -> Self {
                    lerp(*self as f32, *to as f32, delta).round() as $ty
                }
            }
        )+
    };
}

int_goals!(u8, u16, u32, usize, i32);

macro_rules! struct_goals {
    ( $( $ty:ident $( < $gen:ident > )? { $( $field:ident ),+ } ),+ $(,)? ) => {
        $(
            impl$(<$gen: MotionGoal + Clone + Debug + Default + PartialEq>)? MotionGoal
                for $ty$(<$gen>)?
            {
                fn apply_delta(&self, to: &Self, delta: f32) -> Self {
                    $ty$(::<$gen>)? {
                        $( $field: self.$field.apply_delta(&to.$field, delta) ),+
                    }
                }
            }
        )+
    };
}

struct_goals!(
    Point<T> { x, y },
    Size<T> { width, height },
    Edges<T> { top, right, bottom, left },
    Corners<T> { top_left, top_right, bottom_right, bottom_left },
    Bounds<T> { origin, size },
    Rgba { r, g, b, a },
);

macro_rules! newtype_goals {
    ( $( $ty:ident ),+ ) => {
        $(
            impl MotionGoal for $ty {
                fn apply_delta(&self, to: &Self, delta: f32) -> Self {
                    $ty(self.0.apply_delta(&to.0, delta))
                }
            }
        )+
    };
}

newtype_goals!(Radians, Rems);

impl MotionGoal for Pixels {
    fn apply_delta(&self, to: &Self, delta: f32) -> Self {
        px(lerp(self.to_f64() as f32, to.to_f64() as f32, delta))
    }
}

/// A boolean goal that animates as a 0..=1 fraction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoolGoal(f32);

impl BoolGoal {
    pub const ON: BoolGoal = BoolGoal(1.);
    pub const OFF: BoolGoal = BoolGoal(0.);

    /// The animated fraction.
    pub fn value(self) -> f32 {
        self.0
    }

    /// Whether the goal is (heading) on.
    pub fn is_on(self) -> bool {
        self.0 > 0.5
    }
}

impl From<bool> for BoolGoal {
    fn from(on: bool) -> Self {
        if on { BoolGoal::ON } else { BoolGoal::OFF }
    }
}

impl MotionGoal for BoolGoal {
    fn apply_delta(&self, to: &Self, delta: f32) -> Self {
        BoolGoal(self.0.apply_delta(&to.0, delta))
    }
}

/// Interpolation state stored in an entity so it survives re-renders.
#[derive(Clone)]
pub struct TransitionState<T: MotionGoal + Clone + PartialEq + 'static> {
    goal_updated_at: Instant,
    start_goal: T,
    end_goal: T,
    last_delta: f32,
}

impl<T: MotionGoal + Clone + PartialEq + 'static> TransitionState<T> {
    pub fn new(initial_goal: T) -> Self {
        Self {
            goal_updated_at: Instant::now(),
            start_goal: initial_goal.clone(),
            end_goal: initial_goal,
            last_delta: 1.,
        }
    }
}

/// A handle pairing transition state with a duration and easing.
#[derive(Clone)]
pub struct Transition<T: MotionGoal + Clone + PartialEq + 'static> {
    duration_secs: f32,
    easing: Rc<dyn Fn(f32) -> f32>,
    state: Entity<TransitionState<T>>,
}

impl<T: MotionGoal + Clone + PartialEq + 'static> Transition<T> {
    /// A transition whose state lives in keyed window state under `id`.
    pub fn new(
        id: impl Into<ElementId>,
        window: &mut Window,
        cx: &mut App,
        duration: Duration,
        initial_goal: impl FnOnce(&mut Window, &mut Context<TransitionState<T>>) -> T,
    ) -> Self {
        Self::from_state(
            window.use_keyed_state(id, cx, |window, cx| {
                TransitionState::new(initial_goal(window, cx))
            }),
            duration,
        )
    }

    /// A transition over externally owned state.
    pub fn from_state(state: Entity<TransitionState<T>>, duration: Duration) -> Self {
        Self {
            duration_secs: duration.as_secs_f32(),
            easing: Rc::new(linear),
            state,
        }
    }

    /// Replaces the easing curve (a function over 0..=1).
    pub fn with_easing(mut self, easing: impl Fn(f32) -> f32 + 'static) -> Self {
        self.easing = Rc::new(easing);
        self
    }

    /// The goal the transition is heading towards.
    pub fn read_goal<'a>(&self, cx: &'a App) -> &'a T {
        &self.state.read(cx).end_goal
    }

    pub fn entity_id(&self) -> EntityId {
        self.state.entity_id()
    }

    /// Retargets the transition. The current in-flight value becomes
    /// the new starting point, so goal changes never jump. Returns
    /// whether the goal actually changed; callers notify gpui themselves.
    pub fn set(&self, cx: &mut App, new_goal: T) -> bool {
        let mut changed = false;

        self.state.update(cx, |state, _cx| {
            if state.end_goal == new_goal {
                return;
            }

            let previous = std::mem::replace(&mut state.end_goal, new_goal);
            state.start_goal = state.start_goal.apply_delta(&previous, state.last_delta);
            state.goal_updated_at = Instant::now();
            changed = true;
        });

        changed
    }

    /// Like [`set`](Self::set), with a closure mutating the goal in place.
    pub fn update<R>(
        &self,
        cx: &mut App,
        update: impl FnOnce(&mut T, &mut Context<TransitionState<T>>) -> R,
    ) -> bool {
        let mut changed = false;

        self.state.update(cx, |state, cx| {
            let previous = state.end_goal.clone();
            update(&mut state.end_goal, cx);

            if state.end_goal == previous {
                return;
            }

            state.start_goal = state.start_goal.apply_delta(&previous, state.last_delta);
            state.goal_updated_at = Instant::now();
            changed = true;
        });

        changed
    }

    /// The current in-flight value. Schedules another animation frame
    /// while the transition has not yet reached its goal.
    pub fn evaluate(&self, window: &mut Window, cx: &mut App) -> T {
        let (animating, value) = self.evaluate_inner(cx);
        if animating {
            window.request_animation_frame();
        }
        value
    }

    fn evaluate_inner(&self, cx: &mut App) -> (bool, T) {
        let mut animating = false;
        let mut value = None;

        self.state.update(cx, |state, _cx| {
            let delta = if self.duration_secs <= 0. {
                1.
            } else {
                let elapsed = state.goal_updated_at.elapsed().as_secs_f32();
                (self.easing)((elapsed / self.duration_secs).min(1.))
            };

            state.last_delta = delta;
            value = Some(state.start_goal.apply_delta(&state.end_goal, delta));
            animating = delta != 1. && state.start_goal != state.end_goal;
        });

        (animating, value.expect("state update always runs"))
    }
}

/// Creating keyed transitions directly from a window, mirroring
/// `use_keyed_state`.
pub trait WindowTransitionExt {
    fn use_keyed_transition<T: MotionGoal + Clone + PartialEq + 'static>(
        &mut self,
        id: impl Into<ElementId>,
        cx: &mut App,
        duration: Duration,
        initial_goal: impl FnOnce(&mut Window, &mut Context<TransitionState<T>>) -> T,
    ) -> Transition<T>;
}

impl WindowTransitionExt for Window {
    fn use_keyed_transition<T: MotionGoal + Clone + PartialEq + 'static>(
        &mut self,
        id: impl Into<ElementId>,
        cx: &mut App,
        duration: Duration,
        initial_goal: impl FnOnce(&mut Window, &mut Context<TransitionState<T>>) -> T,
    ) -> Transition<T> {
        Transition::new(id, self, cx, duration, initial_goal)
    }
}

/// One or more transitions evaluated together for the wrapper element.
pub trait MotionValues {
    type Values;

    /// Evaluates every transition; the flag reports whether any is
    /// still animating.
    fn evaluate(&self, cx: &mut App) -> (bool, Self::Values);
}

impl<A: MotionGoal + Clone + PartialEq + 'static> MotionValues for Transition<A> {
    type Values = A;

    fn evaluate(&self, cx: &mut App) -> (bool, A) {
        self.evaluate_inner(cx)
    }
}

macro_rules! impl_motion_values {
    ($first:ident $(, $rest:ident)*) => {
        impl_motion_values!(@recurse () $first $(, $rest)*);
    };

    (@recurse ($($prefix:ident),*) ) => {};

    (@recurse ($($prefix:ident),*) $head:ident $(, $tail:ident)*) => {
        impl_motion_values!(@generate ($($prefix,)* $head));
        impl_motion_values!(@recurse ($($prefix,)* $head) $($tail),*);
    };

    (@generate ($($name:ident),+)) => {
        #[allow(non_snake_case, unused_parens)]
        impl<$($name),+> MotionValues for ( $( Transition<$name> ),+ ,)
        where
            $( $name: MotionGoal + Clone + PartialEq + 'static ),+
        {
            type Values = ( $( $name ),+ );

            fn evaluate(&self, cx: &mut App) -> (bool, Self::Values) {
                let ( $( $name ),+ ,) = self;
                let mut animating = false;

                let values = ($({
                    let (this_animating, value) = $name.evaluate_inner(cx);
                    animating |= this_animating;
                    value
                }),+);

                (animating, values)
            }
        }
    };
}

impl_motion_values!(A, B, C, D);

/// Wraps an element so a styling closure re-runs with fresh transition
/// values each frame.
pub trait TransitionExt {
    fn with_transitions<T>(
        self,
        transitions: T,
        animator: impl Fn(&mut App, Self, T::Values) -> Self + 'static,
    ) -> TransitionElement<Self, T>
    where
        T: MotionValues,
        Self: Sized,
    {
        TransitionElement {
            element: Some(self),
            transitions,
            animator: Box::new(animator),
        }
    }
}

impl<E: IntoElement + 'static> TransitionExt for E {}

pub struct TransitionElement<E, T: MotionValues> {
    element: Option<E>,
    transitions: T,
    animator: Box<dyn Fn(&mut App, E, T::Values) -> E>,
}

impl<E: Element + 'static, T: MotionValues + 'static> Element for TransitionElement<E, T> {
    type RequestLayoutState = AnyElement;
    type PrepaintState = ();

    fn id(&self) -> Option<ElementId> {
        None
    }

    fn source_location(&self) -> Option<&'static std::panic::Location<'static>> {
        None
    }

    fn request_layout(
        &mut self,
        _global_id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        window: &mut Window,
        cx: &mut App,
    ) -> (LayoutId, Self::RequestLayoutState) {
        let (animating, values) = self.transitions.evaluate(cx);

        let element = self.element.take().expect("layout is requested once");
        let mut element = (self.animator)(cx, element, values).into_any_element();

        if animating {
            window.request_animation_frame();
        }

        (element.request_layout(window, cx), element)
    }

    fn prepaint(
        &mut self,
        _global_id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        _bounds: Bounds<Pixels>,
        element: &mut Self::RequestLayoutState,
        window: &mut Window,
        cx: &mut App,
    ) -> Self::PrepaintState {
        element.prepaint(window, cx);
    }

    fn paint(
        &mut self,
        _global_id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        _bounds: Bounds<Pixels>,
        element: &mut Self::RequestLayoutState,
        _prepaint: &mut Self::PrepaintState,
        window: &mut Window,
        cx: &mut App,
    ) {
        element.paint(window, cx);
    }
}

impl<E: Element + 'static, T: MotionValues + 'static> IntoElement for TransitionElement<E, T> {
    type Element = Self;

    fn into_element(self) -> Self::Element {
        self
    }
}

impl<E: Element + Styled + 'static, T: MotionValues + 'static> Styled for TransitionElement<E, T> {
    fn style(&mut self) -> &mut StyleRefinement {
        self.element.as_mut().expect("element not yet rendered").style()
    }
}

impl<E: Element + InteractiveElement + 'static, T: MotionValues + 'static> InteractiveElement
    for TransitionElement<E, T>
{
    fn interactivity(&mut self) -> &mut Interactivity {
        self.element
            .as_mut()
            .expect("element not yet rendered")
            .interactivity()
    }
}

impl<E: Element + ParentElement + 'static, T: MotionValues + 'static> ParentElement
    for TransitionElement<E, T>
{
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.element
            .as_mut()
            .expect("element not yet rendered")
            .extend(elements);
    }
}

impl<E: Element + StatefulInteractiveElement + 'static, T: MotionValues + 'static>
    StatefulInteractiveElement for TransitionElement<E, T>
{
}


#[cfg(all(test, feature = "test-support"))]
mod transition_tests {
    use super::*;
    use gpui::{AppContext as _, TestAppContext};

    #[gpui::test]
    fn set_reports_goal_changes(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let state = cx.new(|_cx| TransitionState::new(0f32));
            let transition = Transition::from_state(state, Duration::from_millis(100));

            assert!(transition.set(cx, 1.));
            assert!(!transition.set(cx, 1.), "same goal is a no-op");
            assert_eq!(*transition.read_goal(cx), 1.);
        });
    }

    #[gpui::test]
    fn update_mutates_the_goal_in_place(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let state = cx.new(|_cx| TransitionState::new(BoolGoal::OFF));
            let transition = Transition::from_state(state, Duration::from_millis(100));

            assert!(transition.update(cx, |goal, _cx| *goal = BoolGoal::ON));
            assert!(transition.read_goal(cx).is_on());
        });
    }

    #[gpui::test]
    fn zero_duration_transitions_finish_immediately(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let state = cx.new(|_cx| TransitionState::new(0f32));
            let transition = Transition::from_state(state, Duration::ZERO);
            transition.set(cx, 4.);

            let (animating, value) = transition.evaluate_inner(cx);
            assert!(!animating);
            assert_eq!(value, 4.);
        });
    }

    #[gpui::test]
    fn initial_state_is_settled(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let state = cx.new(|_cx| TransitionState::new(3f32));
            let transition = Transition::from_state(state, Duration::from_secs(5));

            let (animating, value) = transition.evaluate_inner(cx);
            assert!(!animating, "a never-retargeted transition is settled");
            assert_eq!(value, 3.);
        });
    }
}
