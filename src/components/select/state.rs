use std::{rc::Rc, sync::Arc, time::Duration};

use gpui::{
    App, AppContext as _, Context, ElementId, Entity, KeyBinding, SharedString, Window, actions,
    ease_out_quint,
};
use indexmap::IndexMap;
use lattice_motion::{BoolGoal, Transition, TransitionState};
use thiserror::Error;

use crate::{
    ElementIdExt,
    components::select::{SelectItem, SelectItemEntry},
};

actions!(select_menu, [MoveUp, MoveDown, Confirm, Dismiss]);

/// Key context for the select menu's bindings.
pub const KEY_CONTEXT: &str = "SelectMenu";

/// Registers the menu navigation bindings. Called by [`crate::init`].
pub fn init(cx: &mut App) {
    cx.bind_keys([
        KeyBinding::new("up", MoveUp, Some(KEY_CONTEXT)),
        KeyBinding::new("down", MoveDown, Some(KEY_CONTEXT)),
        KeyBinding::new("enter", Confirm, Some(KEY_CONTEXT)),
        KeyBinding::new("escape", Dismiss, Some(KEY_CONTEXT)),
    ]);
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectItemError {
    #[error("no item is registered under this name")]
    InvalidName,
}

pub type OnChangeFn<V> = Rc<dyn Fn(&V, &mut Window, &mut App)>;

/// Shared state backing one select: its items, the selected and
/// highlighted entries, and the open/close transition. Wrap it in an
/// [`Arc`] and hand it to the trigger and menu components.
pub struct SelectState<V: 'static, I: SelectItem<Value = V> + 'static> {
    pub(crate) items: Entity<SelectItems<V, I>>,
    pub(crate) selected_item: Entity<Option<SharedString>>,
    pub(crate) highlighted_item: Entity<Option<SharedString>>,
    pub menu_open_transition: Transition<BoolGoal>,
    pub(crate) on_change: Option<OnChangeFn<V>>,
}

impl<V: 'static, I: SelectItem<Value = V> + 'static> SelectState<V, I> {
    /// Builds state kept in keyed window state under `id`, surviving
    /// re-renders of stateless components.
    pub fn from_window(
        id: impl Into<ElementId>,
        window: &mut Window,
        cx: &mut App,
        create_items: impl FnOnce(&mut Window, &mut Context<SelectItems<V, I>>) -> SelectItems<V, I>,
    ) -> Self {
        let id = id.into();

        Self {
            items: window.use_keyed_state(id.with_suffix("state:items"), cx, create_items),
            selected_item: window.use_keyed_state(
                id.with_suffix("state:selected_item"),
                cx,
                |_window, _cx| None,
            ),
            highlighted_item: window.use_keyed_state(
                id.with_suffix("state:highlighted_item"),
                cx,
                |_window, _cx| None,
            ),
            menu_open_transition: Transition::from_state(
                window.use_keyed_state(id.with_suffix("state:menu_open"), cx, |_window, _cx| {
                    TransitionState::new(BoolGoal::OFF)
                }),
                Duration::from_millis(275),
            )
            .with_easing(ease_out_quint()),
            on_change: None,
        }
    }

    /// Builds state from plain entities, for views that own it.
    pub fn from_cx(cx: &mut App, items: SelectItems<V, I>) -> Self {
        Self {
            items: cx.new(|_cx| items),
            selected_item: cx.new(|_cx| None),
            highlighted_item: cx.new(|_cx| None),
            menu_open_transition: Transition::from_state(
                cx.new(|_cx| TransitionState::new(BoolGoal::OFF)),
                Duration::from_millis(275),
            )
            .with_easing(ease_out_quint()),
            on_change: None,
        }
    }

    /// Called with the newly selected value whenever a selection is
    /// confirmed. Set before wrapping the state in an [`Arc`].
    pub fn on_change(mut self, on_change: impl Fn(&V, &mut Window, &mut App) + 'static) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }

    pub fn is_open(&self, cx: &App) -> bool {
        self.menu_open_transition.read_goal(cx).is_on()
    }

    pub fn set_open(&self, cx: &mut App, open: bool) {
        if self.menu_open_transition.set(cx, open.into()) {
            cx.notify(self.menu_open_transition.entity_id());
        }

        if open {
            // Highlight follows the current selection when reopening.
            let selected = self.selected_item.read(cx).clone();
            self.highlighted_item.update(cx, |highlighted, cx| {
                *highlighted = selected;
                cx.notify();
            });
        }
    }

    pub fn toggle(&self, cx: &mut App) {
        self.set_open(cx, !self.is_open(cx));
    }

    pub fn selected_name(&self, cx: &App) -> Option<SharedString> {
        self.selected_item.read(cx).clone()
    }

    pub fn highlighted_name(&self, cx: &App) -> Option<SharedString> {
        self.highlighted_item.read(cx).clone()
    }

    /// Marks an item as selected and fires the change callback.
    pub fn select(
        self: &Arc<Self>,
        name: &SharedString,
        window: &mut Window,
        cx: &mut App,
    ) -> Result<(), SelectItemError> {
        if self.items.read(cx).get(name).is_none() {
            return Err(SelectItemError::InvalidName);
        }

        self.selected_item.update(cx, |selected, cx| {
            *selected = Some(name.clone());
            cx.notify();
        });

        if let Some(on_change) = self.on_change.clone() {
            let name = name.clone();
            self.items.clone().update(cx, |items, cx| {
                if let Some(entry) = items.get(&name) {
                    (on_change)(entry.item.value(), window, cx);
                }
            });
        }

        Ok(())
    }

    pub fn move_highlight_up(&self, cx: &mut App) {
        self.move_highlight(cx, -1);
    }

    pub fn move_highlight_down(&self, cx: &mut App) {
        self.move_highlight(cx, 1);
    }

    fn move_highlight(&self, cx: &mut App, delta: isize) {
        let items = self.items.read(cx);
        if items.is_empty() {
            return;
        }

        let current = self.highlighted_item.read(cx).clone();
        let next_index = match current.and_then(|name| items.get_index_of(&name)) {
            Some(index) => {
                let last = items.len() as isize - 1;
                (index as isize + delta).clamp(0, last) as usize
            }
            None if delta > 0 => 0,
            None => items.len() - 1,
        };

        let next_name = items
            .get_index(next_index)
            .map(|(name, _entry)| name.clone());

        self.highlighted_item.update(cx, |highlighted, cx| {
            if *highlighted != next_name {
                *highlighted = next_name;
                cx.notify();
            }
        });
    }

    /// Selects the highlighted item and closes the menu.
    pub fn confirm_highlight(self: &Arc<Self>, window: &mut Window, cx: &mut App) {
        if let Some(name) = self.highlighted_item.read(cx).clone() {
            let _ = self.select(&name, window, cx);
        }
        self.set_open(cx, false);
    }
}

/// Insertion-ordered item storage keyed by item name.
pub struct SelectItems<V: 'static, I: SelectItem<Value = V> + 'static>(
    IndexMap<SharedString, SelectItemEntry<I>>,
);

impl<V: 'static, I: SelectItem<Value = V> + 'static> SelectItems<V, I> {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Adds an item; a duplicate name replaces the previous entry.
    pub fn push_item(&mut self, cx: &mut App, item: impl Into<I>) {
        let entry = SelectItemEntry::new(item.into(), cx);
        self.0.insert(entry.item.name(), entry);
    }

    pub fn get(&self, name: &SharedString) -> Option<&SelectItemEntry<I>> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SharedString, &SelectItemEntry<I>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get_index_of(&self, name: &SharedString) -> Option<usize> {
        self.0.get_index_of(name)
    }

    pub fn get_index(&self, index: usize) -> Option<(&SharedString, &SelectItemEntry<I>)> {
        self.0.get_index(index)
    }
}

impl<V: 'static, I: SelectItem<Value = V> + 'static> Default for SelectItems<V, I> {
    fn default() -> Self {
        Self::new()
    }
}
