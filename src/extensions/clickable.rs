use gpui::{App, ClickEvent, MouseButton, MouseDownEvent, MouseUpEvent, Window};

type ClickFn = Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>;
type MouseDownFn = Box<dyn Fn(&MouseDownEvent, &mut Window, &mut App) + 'static>;
type MouseUpFn = Box<dyn Fn(&MouseUpEvent, &mut Window, &mut App) + 'static>;

/// The bundle of mouse handlers a clickable component can carry.
#[derive(Default)]
pub struct ClickHandlers {
    pub on_click: Option<ClickFn>,
    pub on_mouse_down: Option<(MouseButton, MouseDownFn)>,
    pub on_mouse_up: Option<(MouseButton, MouseUpFn)>,
    pub on_any_mouse_down: Option<MouseDownFn>,
    pub on_any_mouse_up: Option<MouseUpFn>,
}

impl ClickHandlers {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Fluent handler setters shared by the clickable components.
pub trait Clickable: Sized {
    fn click_handlers_mut(&mut self) -> &mut ClickHandlers;

    fn on_click(mut self, handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static) -> Self {
        self.click_handlers_mut().on_click = Some(Box::new(handler));
        self
    }

    fn on_mouse_down(
        mut self,
        button: MouseButton,
        handler: impl Fn(&MouseDownEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.click_handlers_mut().on_mouse_down = Some((button, Box::new(handler)));
        self
    }

    fn on_mouse_up(
        mut self,
        button: MouseButton,
        handler: impl Fn(&MouseUpEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.click_handlers_mut().on_mouse_up = Some((button, Box::new(handler)));
        self
    }

    fn on_any_mouse_down(
        mut self,
        handler: impl Fn(&MouseDownEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.click_handlers_mut().on_any_mouse_down = Some(Box::new(handler));
        self
    }

    fn on_any_mouse_up(
        mut self,
        handler: impl Fn(&MouseUpEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.click_handlers_mut().on_any_mouse_up = Some(Box::new(handler));
        self
    }
}
