//! Single-line text input machinery: the editing state entity, cursor
//! blink, and a custom element that shapes, paints, and hit-tests the
//! text while registering as the window's input handler.

use std::sync::Arc;

use gpui::{
    Action, App, Bounds, Context, CursorStyle, DispatchPhase, Element, ElementId,
    ElementInputHandler, Entity, GlobalElementId, Hsla, InspectorElementId, InteractiveElement,
    IntoElement, KeyBinding, LayoutId, MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent,
    PaintQuad, ParentElement, Pixels, Refineable, RenderOnce, ShapedLine, SharedString, Style,
    StyleRefinement, Styled, TextRun, UnderlineStyle, Window, div, fill, point,
    prelude::FluentBuilder, px, relative, size,
};

mod cursor_blink;
mod state;

pub use cursor_blink::CursorBlink;
pub use state::*;

type TransformTextFn = Arc<dyn Fn(char) -> char + Send + Sync>;

/// Key context for the input's action bindings.
pub const KEY_CONTEXT: &str = "TextInput";

/// Registers the editing key bindings. Called by [`crate::init`].
pub fn init(cx: &mut App) {
    cx.bind_keys([
        KeyBinding::new("backspace", Backspace, Some(KEY_CONTEXT)),
        KeyBinding::new("delete", Delete, Some(KEY_CONTEXT)),
        KeyBinding::new("left", Left, Some(KEY_CONTEXT)),
        KeyBinding::new("right", Right, Some(KEY_CONTEXT)),
        KeyBinding::new("shift-left", SelectLeft, Some(KEY_CONTEXT)),
        KeyBinding::new("shift-right", SelectRight, Some(KEY_CONTEXT)),
        KeyBinding::new("home", Home, Some(KEY_CONTEXT)),
        KeyBinding::new("end", End, Some(KEY_CONTEXT)),
        KeyBinding::new("cmd-a", SelectAll, Some(KEY_CONTEXT)),
        KeyBinding::new("cmd-c", Copy, Some(KEY_CONTEXT)),
        KeyBinding::new("cmd-x", Cut, Some(KEY_CONTEXT)),
        KeyBinding::new("cmd-v", Paste, Some(KEY_CONTEXT)),
        KeyBinding::new("ctrl-cmd-space", ShowCharacterPalette, Some(KEY_CONTEXT)),
    ]);
}

/// The unstyled single-line input primitive. Styled components (the
/// text field) wrap this with surfaces, borders, and labels.
#[derive(IntoElement)]
pub struct Input {
    id: ElementId,
    state: Entity<InputState>,
    disabled: bool,
    placeholder: SharedString,
    placeholder_text_color: Option<Hsla>,
    selection_color: Option<Hsla>,
    transform_text: Option<TransformTextFn>,
    style: StyleRefinement,
}

impl Styled for Input {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl Input {
    pub fn new(id: impl Into<ElementId>, state: Entity<InputState>) -> Self {
        Self {
            id: id.into(),
            state,
            disabled: false,
            placeholder: "Type here...".into(),
            placeholder_text_color: None,
            selection_color: None,
            transform_text: None,
            style: StyleRefinement::default(),
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn placeholder(mut self, text: impl Into<SharedString>) -> Self {
        self.placeholder = text.into();
        self
    }

    pub fn placeholder_text_color(mut self, color: impl Into<Hsla>) -> Self {
        self.placeholder_text_color = Some(color.into());
        self
    }

    pub fn selection_color(mut self, color: impl Into<Hsla>) -> Self {
        self.selection_color = Some(color.into());
        self
    }

    /// Maps every displayed character, e.g. to bullets for masked entry.
    /// Editing still operates on the real value.
    pub fn transform_text(
        mut self,
        transform: impl Fn(char) -> char + Send + Sync + 'static,
    ) -> Self {
        self.transform_text = Some(Arc::new(transform));
        self
    }

    pub fn read_text(&self, cx: &App) -> SharedString {
        self.state.read(cx).value()
    }
}

impl RenderOnce for Input {
    fn render(self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        use crate::theme::ThemeExt;
        use crate::utils::RgbaExt;

        let theme_colors = &cx.get_theme().variants.active(cx).colors;
        let text_color: Hsla = theme_colors.text.primary.into();
        let placeholder_color = self
            .placeholder_text_color
            .unwrap_or_else(|| theme_colors.text.secondary.fade(0.7).into());
        let selection_color = self
            .selection_color
            .unwrap_or_else(|| theme_colors.accent.primary.alpha(0.3).into());
        let font_family = cx.get_theme().layout.text.default_font.family[0].clone();
        let text_size = cx.get_theme().layout.text.default_font.sizes.body;
        let line_height = window.line_height();

        let state = self.state.clone();
        state.update(cx, |state, cx| state.update_focus_state(window, cx));

        let focus_handle = state.read(cx).focus_handle.clone();
        let cursor_visible = state.read(cx).cursor_visible(cx);

        fn handle<A: Action>(
            state: &Entity<InputState>,
            run: fn(&mut InputState, &mut Context<InputState>),
        ) -> impl Fn(&A, &mut Window, &mut App) + 'static {
            let state = state.clone();
            move |_action, _window, cx| {
                state.update(cx, |state, cx| run(state, cx));
            }
        }

        div()
            .id(self.id)
            .key_context(KEY_CONTEXT)
            .track_focus(&focus_handle)
            .cursor(if self.disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::IBeam
            })
            .w_full()
            .font_family(font_family)
            .text_size(text_size)
            .map(|mut this| {
                this.style().refine(&self.style);
                this
            })
            .when(!self.disabled, |this| {
                let state_mouse_down = self.state.clone();
                let state_mouse_up = self.state.clone();

                this.on_action(handle::<Backspace>(&state, |state, cx| state.backspace(cx)))
                    .on_action(handle::<Delete>(&state, |state, cx| state.delete(cx)))
                    .on_action(handle::<Left>(&state, |state, cx| state.left(cx)))
                    .on_action(handle::<Right>(&state, |state, cx| state.right(cx)))
                    .on_action(handle::<SelectLeft>(&state, |state, cx| {
                        state.select_left(cx)
                    }))
                    .on_action(handle::<SelectRight>(&state, |state, cx| {
                        state.select_right(cx)
                    }))
                    .on_action(handle::<SelectAll>(&state, |state, cx| state.select_all(cx)))
                    .on_action(handle::<Home>(&state, |state, cx| state.home(cx)))
                    .on_action(handle::<End>(&state, |state, cx| state.end(cx)))
                    .on_action(handle::<Copy>(&state, |state, cx| state.copy(cx)))
                    .on_action(handle::<Cut>(&state, |state, cx| state.cut(cx)))
                    .on_action(handle::<Paste>(&state, |state, cx| state.paste(cx)))
                    .on_action::<ShowCharacterPalette>({
                        move |_, window, _cx| window.show_character_palette()
                    })
                    .on_mouse_down(MouseButton::Left, move |event: &MouseDownEvent, _window, cx| {
                        state_mouse_down.update(cx, |state, cx| {
                            state.is_selecting = true;
                            if event.modifiers.shift {
                                state.select_to(state.index_for_mouse_position(event.position), cx);
                            } else {
                                state.move_to(state.index_for_mouse_position(event.position), cx);
                            }
                        });
                    })
                    .on_mouse_up(MouseButton::Left, move |_: &MouseUpEvent, _window, cx| {
                        state_mouse_up.update(cx, |state, _cx| state.is_selecting = false);
                    })
            })
            .child(TextElement {
                input: self.state,
                placeholder: self.placeholder,
                text_color,
                placeholder_text_color: placeholder_color,
                highlight_text_color: selection_color,
                line_height,
                transform_text: self.transform_text,
                cursor_visible,
            })
    }
}

struct TextElement {
    input: Entity<InputState>,
    placeholder: SharedString,
    text_color: Hsla,
    placeholder_text_color: Hsla,
    highlight_text_color: Hsla,
    line_height: Pixels,
    transform_text: Option<TransformTextFn>,
    cursor_visible: bool,
}

struct PrepaintState {
    line: Option<ShapedLine>,
    cursor: Option<PaintQuad>,
    selection: Option<PaintQuad>,
}

impl IntoElement for TextElement {
    type Element = Self;

    fn into_element(self) -> Self::Element {
        self
    }
}

impl Element for TextElement {
    type RequestLayoutState = ();
    type PrepaintState = PrepaintState;

    fn id(&self) -> Option<ElementId> {
        None
    }

    fn source_location(&self) -> Option<&'static core::panic::Location<'static>> {
        None
    }

    fn request_layout(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        window: &mut Window,
        cx: &mut App,
    ) -> (LayoutId, Self::RequestLayoutState) {
        let mut style = Style::default();
        style.size.width = relative(1.).into();
        style.size.height = self.line_height.into();

        (window.request_layout(style, [], cx), ())
    }

    fn prepaint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        window: &mut Window,
        cx: &mut App,
    ) -> Self::PrepaintState {
        let input = self.input.read(cx);
        let content = input.value();
        let selected_range = input.selected_range.clone();
        let cursor = input.cursor_offset();
        let style = window.text_style();

        let (display_text, text_color) = if content.is_empty() {
            (self.placeholder.clone(), self.placeholder_text_color)
        } else if let Some(transform) = &self.transform_text {
            let transformed: String = content.chars().map(|c| transform(c)).collect();
            (transformed.into(), self.text_color)
        } else {
            (content, self.text_color)
        };

        let run = TextRun {
            len: display_text.len(),
            font: style.font(),
            color: text_color,
            background_color: None,
            underline: None,
            strikethrough: None,
        };

        let runs = if let Some(marked_range) = input.marked_range.as_ref() {
            vec![
                TextRun {
                    len: marked_range.start,
                    ..run.clone()
                },
                TextRun {
                    len: marked_range.end - marked_range.start,
                    underline: Some(UnderlineStyle {
                        color: Some(run.color),
                        thickness: px(1.),
                        wavy: false,
                    }),
                    ..run.clone()
                },
                TextRun {
                    len: display_text.len() - marked_range.end,
                    ..run
                },
            ]
            .into_iter()
            .filter(|run| run.len > 0)
            .collect()
        } else {
            vec![run]
        };

        let font_size = style.font_size.to_pixels(window.rem_size());
        let line = window
            .text_system()
            .shape_line(display_text, font_size, &runs, None);

        let cursor_x = line.x_for_index(cursor);
        let (selection, cursor) = if selected_range.is_empty() {
            let height = bounds.bottom() - bounds.top();
            let cursor_height = height * 0.8;

            (
                None,
                Some(fill(
                    Bounds::new(
                        point(
                            bounds.left() + cursor_x,
                            bounds.top() + (height - cursor_height) / 2.,
                        ),
                        size(px(1.), cursor_height),
                    ),
                    self.text_color,
                )),
            )
        } else {
            (
                Some(fill(
                    Bounds::from_corners(
                        point(
                            bounds.left() + line.x_for_index(selected_range.start),
                            bounds.top(),
                        ),
                        point(
                            bounds.left() + line.x_for_index(selected_range.end),
                            bounds.bottom(),
                        ),
                    ),
                    self.highlight_text_color,
                )),
                None,
            )
        };

        PrepaintState {
            line: Some(line),
            cursor,
            selection,
        }
    }

    fn paint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        prepaint: &mut Self::PrepaintState,
        window: &mut Window,
        cx: &mut App,
    ) {
        let focus_handle = self.input.read(cx).focus_handle.clone();

        // Window-level mouse move listener so drags keep selecting even
        // after the pointer leaves the input bounds.
        let input = self.input.clone();
        window.on_mouse_event(move |event: &MouseMoveEvent, phase, _window, cx| {
            if phase == DispatchPhase::Capture {
                return;
            }

            input.update(cx, |input, cx| {
                if input.is_selecting {
                    input.select_to(input.index_for_mouse_position(event.position), cx);
                }
            });
        });

        window.handle_input(
            &focus_handle,
            ElementInputHandler::new(bounds, self.input.clone()),
            cx,
        );

        if let Some(selection) = prepaint.selection.take() {
            window.paint_quad(selection);
        }

        let line = prepaint.line.take().expect("prepaint always shapes a line");
        line.paint(bounds.origin, self.line_height, window, cx)
            .ok();

        if focus_handle.is_focused(window)
            && self.cursor_visible
            && let Some(cursor) = prepaint.cursor.take()
        {
            window.paint_quad(cursor);
        }

        self.input.update(cx, |input, _cx| {
            input.last_layout = Some(line);
            input.last_bounds = Some(bounds);
        });
    }
}
