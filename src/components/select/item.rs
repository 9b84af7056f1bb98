use gpui::{App, FocusHandle, SharedString};

/// An entry a [`super::Select`] can offer. The name doubles as the
/// item's key and must be unique within one select.
pub trait SelectItem {
    type Value;

    fn name(&self) -> SharedString;

    fn value(&self) -> &Self::Value;
}

/// The simplest item: a plain text label that is its own value.
#[derive(Clone, Debug)]
pub struct TextItem {
    name: SharedString,
}

impl TextItem {
    pub fn new(name: impl Into<SharedString>) -> Self {
        Self { name: name.into() }
    }
}

impl SelectItem for TextItem {
    type Value = SharedString;

    fn name(&self) -> SharedString {
        self.name.clone()
    }

    fn value(&self) -> &SharedString {
        &self.name
    }
}

impl From<&str> for TextItem {
    fn from(name: &str) -> Self {
        TextItem::new(name.to_owned())
    }
}

impl From<SharedString> for TextItem {
    fn from(name: SharedString) -> Self {
        TextItem::new(name)
    }
}

/// An item plus the per-item state the menu needs.
pub struct SelectItemEntry<I> {
    pub item: I,
    pub focus_handle: FocusHandle,
}

impl<I> SelectItemEntry<I> {
    pub fn new(item: I, cx: &mut App) -> Self {
        Self {
            item,
            focus_handle: cx.focus_handle().tab_stop(true),
        }
    }
}
