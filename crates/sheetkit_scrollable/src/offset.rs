//! Scroll offset tracking
//!
//! Each scroll frame writes the content offset straight into the scrollable's
//! shared cell before anything else runs, so the sheet sees it on its next
//! frame. Drag and momentum boundaries are forwarded to the sheet's
//! [`ScrollEventsHandlers`], which use them to move gesture priority between
//! content and sheet. Caller callbacks fire last. Events are handled one at a
//! time in arrival order; nothing is buffered or coalesced.

use std::sync::Arc;

use sheetkit_core::{event_types, ScrollCallbacks, ScrollEvent, SharedValue, SharedWriter};

use crate::surface::ScrollHandle;

/// State carried across the events of one drag
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollEventContext {
    /// Offset when the current drag began
    pub initial_content_offset_y: Option<f32>,
    /// Pin to the initial offset instead of the top while locked
    pub should_lock_initial_position: bool,
}

impl ScrollEventContext {
    /// Where the content is held while the sheet has drag priority
    pub fn lock_position(&self) -> f32 {
        if self.should_lock_initial_position {
            self.initial_content_offset_y.unwrap_or(0.0)
        } else {
            0.0
        }
    }
}

/// What a handler may act on
pub struct ScrollTarget<'a> {
    pub offset: &'a SharedWriter<f32>,
    pub handle: &'a ScrollHandle,
}

/// Sheet policy hooks for scroll events
///
/// All hooks default to no-ops. They run on the event path and must stay
/// constant-time.
pub trait ScrollEventsHandlers: Send + Sync {
    fn on_scroll(
        &self,
        _event: &ScrollEvent,
        _ctx: &mut ScrollEventContext,
        _target: &ScrollTarget<'_>,
    ) {
    }

    fn on_begin_drag(
        &self,
        _event: &ScrollEvent,
        _ctx: &mut ScrollEventContext,
        _target: &ScrollTarget<'_>,
    ) {
    }

    fn on_end_drag(
        &self,
        _event: &ScrollEvent,
        _ctx: &mut ScrollEventContext,
        _target: &ScrollTarget<'_>,
    ) {
    }

    fn on_momentum_begin(
        &self,
        _event: &ScrollEvent,
        _ctx: &mut ScrollEventContext,
        _target: &ScrollTarget<'_>,
    ) {
    }

    fn on_momentum_end(
        &self,
        _event: &ScrollEvent,
        _ctx: &mut ScrollEventContext,
        _target: &ScrollTarget<'_>,
    ) {
    }
}

/// Handlers that only track the offset
#[derive(Debug, Clone, Copy, Default)]
pub struct PassiveScrollEventsHandlers;

impl ScrollEventsHandlers for PassiveScrollEventsHandlers {}

/// Streams scroll events into shared state
pub struct OffsetTracker {
    offset: SharedWriter<f32>,
    context: ScrollEventContext,
    handlers: Arc<dyn ScrollEventsHandlers>,
    callbacks: ScrollCallbacks,
}

impl OffsetTracker {
    pub fn new(
        offset: SharedWriter<f32>,
        handlers: Arc<dyn ScrollEventsHandlers>,
        callbacks: ScrollCallbacks,
    ) -> Self {
        Self {
            offset,
            context: ScrollEventContext::default(),
            handlers,
            callbacks,
        }
    }

    /// Read handle on the tracked offset
    pub fn offset(&self) -> SharedValue<f32> {
        self.offset.reader()
    }

    pub fn event_context(&self) -> &ScrollEventContext {
        &self.context
    }

    /// Handle one surface event
    pub fn handle_event(&mut self, event: &ScrollEvent, handle: &ScrollHandle) {
        let target = ScrollTarget {
            offset: &self.offset,
            handle,
        };

        match event.event_type {
            event_types::SCROLL => {
                self.offset.set(event.content_offset.y);
                self.handlers.on_scroll(event, &mut self.context, &target);
            }
            event_types::SCROLL_BEGIN_DRAG => {
                self.handlers.on_begin_drag(event, &mut self.context, &target);
            }
            event_types::SCROLL_END_DRAG => {
                self.handlers.on_end_drag(event, &mut self.context, &target);
            }
            event_types::MOMENTUM_SCROLL_BEGIN => {
                self.handlers
                    .on_momentum_begin(event, &mut self.context, &target);
            }
            event_types::MOMENTUM_SCROLL_END => {
                self.handlers.on_momentum_end(event, &mut self.context, &target);
            }
            other => {
                tracing::trace!("ignoring non-scroll event type {}", other);
                return;
            }
        }

        self.callbacks.dispatch(event);
    }
}
