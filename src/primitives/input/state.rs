use std::ops::Range;

use gpui::{
    App, AppContext as _, Bounds, ClipboardItem, Context, Entity, EntityInputHandler, FocusHandle,
    Focusable, Pixels, Point, ShapedLine, SharedString, UTF16Selection, Window, actions, point,
};
use unicode_segmentation::UnicodeSegmentation;

use super::CursorBlink;

actions!(
    text_input,
    [
        Backspace,
        Delete,
        Left,
        Right,
        SelectLeft,
        SelectRight,
        SelectAll,
        Home,
        End,
        ShowCharacterPalette,
        Paste,
        Cut,
        Copy,
    ]
);

/// Editing state for a single-line text input: the value, selection,
/// IME marked range, and the layout of the last paint for hit testing.
pub struct InputState {
    pub focus_handle: FocusHandle,
    pub value: Option<SharedString>,
    pub selected_range: Range<usize>,
    pub selection_reversed: bool,
    pub marked_range: Option<Range<usize>>,
    pub last_layout: Option<ShapedLine>,
    pub last_bounds: Option<Bounds<Pixels>>,
    pub is_selecting: bool,
    pub cursor_blink: Entity<CursorBlink>,
    was_focused: bool,
}

impl InputState {
    pub fn new(cx: &mut App) -> Self {
        InputState {
            focus_handle: cx.focus_handle().tab_stop(true),
            value: None,
            selected_range: 0..0,
            selection_reversed: false,
            marked_range: None,
            last_layout: None,
            last_bounds: None,
            is_selecting: false,
            cursor_blink: cx.new(|_| CursorBlink::new()),
            was_focused: false,
        }
    }

    /// Seeds the value; a no-op once the input holds text.
    pub fn initial_value(mut self, text: impl Into<SharedString>) -> Self {
        if self.value.is_none() {
            self.value = Some(text.into());
        }
        self
    }

    pub fn value(&self) -> SharedString {
        self.value
            .clone()
            .unwrap_or_else(|| SharedString::new_static(""))
    }

    pub fn clear(&mut self) -> Option<SharedString> {
        self.selected_range = 0..0;
        self.selection_reversed = false;
        self.marked_range = None;
        self.value.take()
    }

    /// Call during render to start/stop cursor blink as focus changes.
    pub fn update_focus_state(&mut self, window: &Window, cx: &mut Context<Self>) {
        let is_focused = self.focus_handle.is_focused(window);
        if is_focused == self.was_focused {
            return;
        }
        self.was_focused = is_focused;

        if is_focused {
            self.cursor_blink.update(cx, |blink, cx| blink.start(cx));
        } else {
            self.cursor_blink.update(cx, |blink, cx| {
                blink.stop();
                cx.notify();
            });
            let cursor = self.cursor_offset();
            self.selected_range = cursor..cursor;
        }
    }

    pub fn cursor_visible(&self, cx: &App) -> bool {
        self.cursor_blink.read(cx).visible()
    }

    fn reset_cursor_blink(&self, cx: &mut Context<Self>) {
        self.cursor_blink.update(cx, |blink, cx| blink.reset(cx));
    }

    pub fn cursor_offset(&self) -> usize {
        if self.selection_reversed {
            self.selected_range.start
        } else {
            self.selected_range.end
        }
    }

    pub fn move_to(&mut self, offset: usize, cx: &mut Context<Self>) {
        self.selected_range = offset..offset;
        self.reset_cursor_blink(cx);
        cx.notify();
    }

    pub fn select_to(&mut self, offset: usize, cx: &mut Context<Self>) {
        if self.selection_reversed {
            self.selected_range.start = offset;
        } else {
            self.selected_range.end = offset;
        }

        if self.selected_range.end < self.selected_range.start {
            self.selection_reversed = !self.selection_reversed;
            self.selected_range = self.selected_range.end..self.selected_range.start;
        }

        self.reset_cursor_blink(cx);
        cx.notify();
    }

    pub fn left(&mut self, cx: &mut Context<Self>) {
        if self.selected_range.is_empty() {
            self.move_to(self.previous_boundary(self.cursor_offset()), cx);
        } else {
            self.move_to(self.selected_range.start, cx);
        }
    }

    pub fn right(&mut self, cx: &mut Context<Self>) {
        if self.selected_range.is_empty() {
            self.move_to(self.next_boundary(self.selected_range.end), cx);
        } else {
            self.move_to(self.selected_range.end, cx);
        }
    }

    pub fn select_left(&mut self, cx: &mut Context<Self>) {
        self.select_to(self.previous_boundary(self.cursor_offset()), cx);
    }

    pub fn select_right(&mut self, cx: &mut Context<Self>) {
        self.select_to(self.next_boundary(self.cursor_offset()), cx);
    }

    pub fn select_all(&mut self, cx: &mut Context<Self>) {
        self.move_to(0, cx);
        self.select_to(self.value().len(), cx);
    }

    pub fn home(&mut self, cx: &mut Context<Self>) {
        self.move_to(0, cx);
    }

    pub fn end(&mut self, cx: &mut Context<Self>) {
        self.move_to(self.value().len(), cx);
    }

    pub fn backspace(&mut self, cx: &mut Context<Self>) {
        if self.selected_range.is_empty() {
            self.select_to(self.previous_boundary(self.cursor_offset()), cx);
        }
        self.splice(self.selected_range.clone(), "", cx);
    }

    pub fn delete(&mut self, cx: &mut Context<Self>) {
        if self.selected_range.is_empty() {
            self.select_to(self.next_boundary(self.cursor_offset()), cx);
        }
        self.splice(self.selected_range.clone(), "", cx);
    }

    pub fn paste(&mut self, cx: &mut Context<Self>) {
        if let Some(text) = cx.read_from_clipboard().and_then(|item| item.text()) {
            // Single-line input: newlines become spaces.
            self.splice(self.selected_range.clone(), &text.replace('\n', " "), cx);
        }
    }

    pub fn copy(&mut self, cx: &mut Context<Self>) {
        if !self.selected_range.is_empty() {
            cx.write_to_clipboard(ClipboardItem::new_string(
                self.value()[self.selected_range.clone()].to_string(),
            ));
        }
    }

    pub fn cut(&mut self, cx: &mut Context<Self>) {
        if !self.selected_range.is_empty() {
            cx.write_to_clipboard(ClipboardItem::new_string(
                self.value()[self.selected_range.clone()].to_string(),
            ));
            self.splice(self.selected_range.clone(), "", cx);
        }
    }

    /// Replaces a byte range with `new_text`, collapsing the selection
    /// after the insertion. The core of every edit.
    fn splice(&mut self, range: Range<usize>, new_text: &str, cx: &mut Context<Self>) {
        self.value = Some(
            (self.value()[0..range.start].to_owned() + new_text + &self.value()[range.end..])
                .into(),
        );
        self.selected_range = range.start + new_text.len()..range.start + new_text.len();
        self.marked_range.take();

        self.reset_cursor_blink(cx);
        cx.notify();
    }

    pub fn index_for_mouse_position(&self, position: Point<Pixels>) -> usize {
        if self.value().is_empty() {
            return 0;
        }

        let (Some(bounds), Some(line)) = (self.last_bounds.as_ref(), self.last_layout.as_ref())
        else {
            return 0;
        };

        // Positions outside the bounds clamp to the ends so drags keep
        // extending the selection.
        if position.y < bounds.top() || position.x < bounds.left() {
            return 0;
        }
        if position.y > bounds.bottom() || position.x > bounds.right() {
            return self.value().len();
        }

        line.closest_index_for_x(position.x - bounds.left())
    }

    fn previous_boundary(&self, offset: usize) -> usize {
        self.value()
            .grapheme_indices(true)
            .rev()
            .find_map(|(idx, _)| (idx < offset).then_some(idx))
            .unwrap_or(0)
    }

    fn next_boundary(&self, offset: usize) -> usize {
        self.value()
            .grapheme_indices(true)
            .find_map(|(idx, _)| (idx > offset).then_some(idx))
            .unwrap_or(self.value().len())
    }

    pub fn offset_from_utf16(&self, offset: usize) -> usize {
        let mut utf8_offset = 0;
        let mut utf16_count = 0;

        for ch in self.value().chars() {
            if utf16_count >= offset {
                break;
            }
            utf16_count += ch.len_utf16();
            utf8_offset += ch.len_utf8();
        }

        utf8_offset
    }

    pub fn offset_to_utf16(&self, offset: usize) -> usize {
        let mut utf16_offset = 0;
        let mut utf8_count = 0;

        for ch in self.value().chars() {
            if utf8_count >= offset {
                break;
            }
            utf8_count += ch.len_utf8();
            utf16_offset += ch.len_utf16();
        }

        utf16_offset
    }

    pub fn range_to_utf16(&self, range: &Range<usize>) -> Range<usize> {
        self.offset_to_utf16(range.start)..self.offset_to_utf16(range.end)
    }

    pub fn range_from_utf16(&self, range_utf16: &Range<usize>) -> Range<usize> {
        self.offset_from_utf16(range_utf16.start)..self.offset_from_utf16(range_utf16.end)
    }
}

impl EntityInputHandler for InputState {
    fn text_for_range(
        &mut self,
        range_utf16: Range<usize>,
        actual_range: &mut Option<Range<usize>>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<String> {
        let range = self.range_from_utf16(&range_utf16);
        actual_range.replace(self.range_to_utf16(&range));
        Some(self.value()[range].to_string())
    }

    fn selected_text_range(
        &mut self,
        _ignore_disabled_input: bool,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<UTF16Selection> {
        Some(UTF16Selection {
            range: self.range_to_utf16(&self.selected_range),
            reversed: self.selection_reversed,
        })
    }

    fn marked_text_range(
        &self,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<Range<usize>> {
        self.marked_range
            .as_ref()
            .map(|range| self.range_to_utf16(range))
    }

    fn unmark_text(&mut self, _window: &mut Window, _cx: &mut Context<Self>) {
        self.marked_range = None;
    }

    fn replace_text_in_range(
        &mut self,
        range_utf16: Option<Range<usize>>,
        new_text: &str,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let range = range_utf16
            .as_ref()
            .map(|range_utf16| self.range_from_utf16(range_utf16))
            .or(self.marked_range.clone())
            .unwrap_or(self.selected_range.clone());

        self.splice(range, new_text, cx);
    }

    fn replace_and_mark_text_in_range(
        &mut self,
        range_utf16: Option<Range<usize>>,
        new_text: &str,
        new_selected_range_utf16: Option<Range<usize>>,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let range = range_utf16
            .as_ref()
            .map(|range_utf16| self.range_from_utf16(range_utf16))
            .or(self.marked_range.clone())
            .unwrap_or(self.selected_range.clone());

        self.value = Some(
            (self.value()[0..range.start].to_owned() + new_text + &self.value()[range.end..])
                .into(),
        );

        self.marked_range = if new_text.is_empty() {
            None
        } else {
            Some(range.start..range.start + new_text.len())
        };

        self.selected_range = new_selected_range_utf16
            .as_ref()
            .map(|range_utf16| self.range_from_utf16(range_utf16))
            .map(|new_range| new_range.start + range.start..new_range.end + range.end)
            .unwrap_or_else(|| range.start + new_text.len()..range.start + new_text.len());

        self.reset_cursor_blink(cx);
        cx.notify();
    }

    fn bounds_for_range(
        &mut self,
        range_utf16: Range<usize>,
        bounds: Bounds<Pixels>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<Bounds<Pixels>> {
        let last_layout = self.last_layout.as_ref()?;
        let range = self.range_from_utf16(&range_utf16);
        Some(Bounds::from_corners(
            point(
                bounds.left() + last_layout.x_for_index(range.start),
                bounds.top(),
            ),
            point(
                bounds.left() + last_layout.x_for_index(range.end),
                bounds.bottom(),
            ),
        ))
    }

    fn character_index_for_point(
        &mut self,
        point: Point<Pixels>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<usize> {
        if self.value().is_empty() {
            return Some(0);
        }

        let bounds = self.last_bounds?;
        let last_layout = self.last_layout.as_ref()?;
        let utf8_index = last_layout.index_for_x(point.x - bounds.left())?;
        Some(self.offset_to_utf16(utf8_index))
    }
}

impl Focusable for InputState {
    fn focus_handle(&self, _: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use gpui::TestAppContext;

    fn with_state(
        cx: &mut TestAppContext,
        value: &str,
        run: impl FnOnce(&mut InputState, &mut Context<InputState>),
    ) {
        cx.update(|cx| {
            let state = cx.new(|cx| InputState::new(cx).initial_value(value.to_owned()));
            state.update(cx, run);
        });
    }

    #[gpui::test]
    fn initial_value_is_set_once(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let _ = cx.new(|cx| {
                let state = InputState::new(cx)
                    .initial_value("first")
                    .initial_value("second");
                assert_eq!(state.value(), "first");
                state
            });
        });
    }

    #[gpui::test]
    fn selection_extends_and_reverses(cx: &mut TestAppContext) {
        with_state(cx, "hello", |state, cx| {
            state.move_to(2, cx);
            state.select_to(4, cx);
            assert_eq!(state.selected_range, 2..4);
            assert!(!state.selection_reversed);

            // Crossing the anchor flips the direction.
            state.select_to(0, cx);
            assert_eq!(state.selected_range, 0..2);
            assert!(state.selection_reversed);
            assert_eq!(state.cursor_offset(), 0);
        });
    }

    #[gpui::test]
    fn grapheme_boundaries_skip_combined_characters(cx: &mut TestAppContext) {
        // "e" + combining acute accent forms one grapheme of 3 bytes.
        with_state(cx, "ae\u{301}b", |state, cx| {
            state.end(cx);
            assert_eq!(state.cursor_offset(), 5);

            state.left(cx);
            assert_eq!(state.cursor_offset(), 4);

            state.left(cx);
            assert_eq!(state.cursor_offset(), 1, "accent cluster is one step");
        });
    }

    #[gpui::test]
    fn utf16_offsets_round_trip(cx: &mut TestAppContext) {
        with_state(cx, "a\u{1F600}b", |state, _cx| {
            // The emoji is 4 UTF-8 bytes and 2 UTF-16 units.
            assert_eq!(state.offset_to_utf16(5), 3);
            assert_eq!(state.offset_from_utf16(3), 5);
            assert_eq!(state.range_to_utf16(&(0..5)), 0..3);
        });
    }

    #[gpui::test]
    fn clear_resets_selection(cx: &mut TestAppContext) {
        with_state(cx, "payload", |state, cx| {
            state.select_all(cx);
            let taken = state.clear();
            assert_eq!(taken.as_deref(), Some("payload"));
            assert_eq!(state.value(), "");
            assert_eq!(state.selected_range, 0..0);
        });
    }

    #[gpui::test]
    fn select_all_spans_the_value(cx: &mut TestAppContext) {
        with_state(cx, "span me", |state, cx| {
            state.select_all(cx);
            assert_eq!(state.selected_range, 0..7);
        });
    }

    #[gpui::test]
    fn backspace_removes_a_full_grapheme(cx: &mut TestAppContext) {
        with_state(cx, "ae\u{301}", |state, cx| {
            state.end(cx);
            state.backspace(cx);
            assert_eq!(state.value(), "a");

            state.backspace(cx);
            assert_eq!(state.value(), "");

            // Backspace at the start is a no-op.
            state.backspace(cx);
            assert_eq!(state.value(), "");
        });
    }

    #[gpui::test]
    fn delete_removes_forward(cx: &mut TestAppContext) {
        with_state(cx, "abc", |state, cx| {
            state.home(cx);
            state.delete(cx);
            assert_eq!(state.value(), "bc");
            assert_eq!(state.cursor_offset(), 0);
        });
    }
}
