//! Default scroll locking policy
//!
//! While the sheet holds drag priority the content must not move: every
//! scroll frame snaps it back to the lock position. A drag that starts with
//! the content already scrolled, on a sheet that is not fully expanded, locks
//! at its starting offset rather than the top so the content does not jump.

use std::sync::{Arc, Weak};

use sheetkit_core::{ScrollEvent, SharedValue};

use crate::constants::{ScrollLockState, SheetPosition};
use crate::context::SheetContext;
use crate::offset::{ScrollEventContext, ScrollEventsHandlers, ScrollTarget};

pub struct DefaultScrollEventsHandlers {
    /// Weak so scrollables never keep their sheet alive
    sheet: Weak<SheetContext>,
    lock_state: SharedValue<ScrollLockState>,
    position: SharedValue<SheetPosition>,
    animation_running: SharedValue<bool>,
}

impl DefaultScrollEventsHandlers {
    pub fn new(sheet: &Arc<SheetContext>) -> Self {
        Self {
            sheet: Arc::downgrade(sheet),
            lock_state: sheet.lock_state(),
            position: sheet.position(),
            animation_running: sheet.animation_running(),
        }
    }

    fn publish_root_offset(&self, y: f32) {
        if let Some(sheet) = self.sheet.upgrade() {
            sheet.set_root_scrollable_offset(y);
        }
    }

    fn pin(&self, ctx: &ScrollEventContext, target: &ScrollTarget<'_>) {
        let lock_position = ctx.lock_position();
        target.handle.scroll_to(0.0, lock_position, false);
        target.offset.set(lock_position);
    }

    fn settle(&self, event: &ScrollEvent, ctx: &ScrollEventContext, target: &ScrollTarget<'_>) {
        if self.lock_state.get().is_locked() {
            self.pin(ctx, target);
            return;
        }

        // The sheet writes the root offset itself while it animates
        if !self.animation_running.get() {
            let y = event.content_offset.y;
            target.offset.set(y);
            self.publish_root_offset(y);
        }
    }
}

impl ScrollEventsHandlers for DefaultScrollEventsHandlers {
    fn on_scroll(
        &self,
        _event: &ScrollEvent,
        ctx: &mut ScrollEventContext,
        target: &ScrollTarget<'_>,
    ) {
        if self.lock_state.get().is_locked() {
            self.pin(ctx, target);
        }
    }

    fn on_begin_drag(
        &self,
        event: &ScrollEvent,
        ctx: &mut ScrollEventContext,
        target: &ScrollTarget<'_>,
    ) {
        let y = event.content_offset.y;
        target.offset.set(y);
        self.publish_root_offset(y);
        ctx.initial_content_offset_y = Some(y);
        ctx.should_lock_initial_position = !self.position.get().is_expanded() && y > 0.0;
    }

    fn on_end_drag(
        &self,
        event: &ScrollEvent,
        ctx: &mut ScrollEventContext,
        target: &ScrollTarget<'_>,
    ) {
        self.settle(event, ctx, target);
    }

    fn on_momentum_end(
        &self,
        event: &ScrollEvent,
        ctx: &mut ScrollEventContext,
        target: &ScrollTarget<'_>,
    ) {
        self.settle(event, ctx, target);
    }
}
