use gpui::Context;
use std::time::Duration;

const BLINK_INTERVAL: Duration = Duration::from_millis(530);

/// Cursor blink state driven by a background timer. The epoch counter
/// invalidates stale timer wakeups after a reset or stop.
pub struct CursorBlink {
    visible: bool,
    epoch: usize,
}

impl CursorBlink {
    pub fn new() -> Self {
        Self {
            visible: true,
            epoch: 0,
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Call when the cursor moves or text changes so the cursor is
    /// solid right after the edit.
    pub fn reset(&mut self, cx: &mut Context<Self>) {
        self.visible = true;
        self.epoch = self.epoch.wrapping_add(1);
        self.schedule(self.epoch, cx);
    }

    pub fn start(&mut self, cx: &mut Context<Self>) {
        self.visible = true;
        self.epoch = self.epoch.wrapping_add(1);
        self.schedule(self.epoch, cx);
    }

    pub fn stop(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.visible = true;
    }

    fn schedule(&mut self, epoch: usize, cx: &mut Context<Self>) {
        cx.spawn(async move |this, cx| {
            cx.background_executor().timer(BLINK_INTERVAL).await;
            if let Some(this) = this.upgrade() {
                this.update(cx, |blink, cx| {
                    blink.flip(epoch, cx);
                });
            }
        })
        .detach();
    }

    fn flip(&mut self, epoch: usize, cx: &mut Context<Self>) {
        if epoch != self.epoch {
            return;
        }

        self.visible = !self.visible;
        cx.notify();
        self.schedule(epoch, cx);
    }
}

impl Default for CursorBlink {
    fn default() -> Self {
        Self::new()
    }
}
