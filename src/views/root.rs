use std::sync::atomic::{AtomicU64, Ordering};

use gpui::{
    AnyElement, AnyView, App, Bounds, Context, ElementId, InteractiveElement, IntoElement,
    ParentElement, Pixels, Render, Styled, Window, div, prelude::FluentBuilder, px,
};

static NEXT_OVERLAY_ID: AtomicU64 = AtomicU64::new(0);

fn next_overlay_id() -> u64 {
    NEXT_OVERLAY_ID.fetch_add(1, Ordering::SeqCst)
}

/// A single overlay: where it renders, and a deferred element builder.
pub struct OverlayEntry {
    pub id: u64,
    pub bounds: Bounds<Pixels>,
    pub element: Box<dyn FnOnce(&mut Window, &mut App) -> AnyElement + Send + 'static>,
}

impl OverlayEntry {
    pub fn new(
        bounds: Bounds<Pixels>,
        element: impl FnOnce(&mut Window, &mut App) -> AnyElement + Send + 'static,
    ) -> Self {
        Self {
            id: next_overlay_id(),
            bounds,
            element: Box::new(element),
        }
    }
}

/// The top-level view: renders a child view plus any overlay entries in
/// front of it, positioned absolutely within the window.
///
/// Dialogs and select menus reach the root through
/// `window.root::<Root>()` to mount their overlays.
pub struct Root {
    view: AnyView,
    entries: Vec<OverlayEntry>,
}

impl Root {
    pub fn new(view: impl Into<AnyView>, _window: &mut Window, _cx: &mut Context<Self>) -> Self {
        Self {
            view: view.into(),
            entries: Vec::new(),
        }
    }

    /// Mounts an overlay; returns its id for later removal.
    pub fn add(
        &mut self,
        bounds: Bounds<Pixels>,
        element: impl FnOnce(&mut Window, &mut App) -> AnyElement + Send + 'static,
    ) -> u64 {
        let entry = OverlayEntry::new(bounds, element);
        let id = entry.id;
        self.entries.push(entry);
        id
    }

    /// Removes an overlay by id; returns whether it was mounted.
    pub fn remove(&mut self, id: u64) -> bool {
        if let Some(position) = self.entries.iter().position(|entry| entry.id == id) {
            self.entries.remove(position);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn overlay_count(&self) -> usize {
        self.entries.len()
    }
}

impl Render for Root {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        // Builders are FnOnce; they are consumed here and re-mounted by
        // their owners on the next render.
        let entries = std::mem::take(&mut self.entries);

        let mut overlays: Vec<AnyElement> = Vec::new();
        for (index, entry) in entries.into_iter().enumerate() {
            let element = (entry.element)(window, cx);

            overlays.push(
                div()
                    .id(ElementId::Name(format!("overlay-{index}").into()))
                    .absolute()
                    .top(entry.bounds.origin.y)
                    .left(entry.bounds.origin.x)
                    .w(entry.bounds.size.width)
                    .h(entry.bounds.size.height)
                    .child(element)
                    .into_any_element(),
            );
        }

        div()
            .id("root")
            .size_full()
            .relative()
            .child(self.view.clone())
            .when(!overlays.is_empty(), |this| {
                this.child(
                    div()
                        .id("root-overlays")
                        .absolute()
                        .top(px(0.))
                        .left(px(0.))
                        .size_full()
                        .children(overlays),
                )
            })
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use gpui::{AppContext, TestAppContext, VisualTestContext, point, size};

    struct TestView;

    impl Render for TestView {
        fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
            div().id("test-view").size_full().child("content")
        }
    }

    fn open_root(cx: &mut TestAppContext) -> gpui::WindowHandle<Root> {
        cx.update(|cx| {
            cx.open_window(Default::default(), |window, cx| {
                let view = cx.new(|_cx| TestView);
                cx.new(|cx| Root::new(view, window, cx))
            })
            .unwrap()
        })
    }

    #[gpui::test]
    fn starts_without_overlays(cx: &mut TestAppContext) {
        let window = open_root(cx);
        let root = window.root(cx).unwrap();

        root.read_with(cx, |root, _| {
            assert_eq!(root.overlay_count(), 0);
        });
    }

    #[gpui::test]
    fn overlays_add_and_remove_by_id(cx: &mut TestAppContext) {
        let window = open_root(cx);
        let root = window.root(cx).unwrap();

        let first = root.update(cx, |root, _cx| {
            root.add(
                Bounds::new(point(px(10.), px(10.)), size(px(100.), px(80.))),
                |_window, _cx| div().child("one").into_any_element(),
            )
        });
        let second = root.update(cx, |root, _cx| {
            root.add(
                Bounds::new(point(px(30.), px(30.)), size(px(100.), px(80.))),
                |_window, _cx| div().child("two").into_any_element(),
            )
        });

        assert_ne!(first, second, "overlay ids are unique");

        root.read_with(cx, |root, _| assert_eq!(root.overlay_count(), 2));

        assert!(root.update(cx, |root, _cx| root.remove(first)));
        assert!(!root.update(cx, |root, _cx| root.remove(first)));
        root.read_with(cx, |root, _| assert_eq!(root.overlay_count(), 1));
    }

    #[gpui::test]
    fn clear_drops_everything(cx: &mut TestAppContext) {
        let window = open_root(cx);
        let root = window.root(cx).unwrap();

        root.update(cx, |root, _cx| {
            for offset in 0..4 {
                root.add(
                    Bounds::new(
                        point(px(offset as f32 * 8.), px(0.)),
                        size(px(40.), px(40.)),
                    ),
                    |_window, _cx| div().into_any_element(),
                );
            }
            root.clear();
        });

        root.read_with(cx, |root, _| assert_eq!(root.overlay_count(), 0));
    }

    #[gpui::test]
    fn renders_with_overlays_mounted(cx: &mut TestAppContext) {
        let window = open_root(cx);
        let root = window.root(cx).unwrap();

        root.update(cx, |root, cx| {
            root.add(
                Bounds::new(point(px(0.), px(0.)), size(px(64.), px(64.))),
                |_window, _cx| div().id("overlay-content").child("overlay").into_any_element(),
            );
            cx.notify();
        });

        let _cx = VisualTestContext::from_window(window.into(), cx);
    }
}
