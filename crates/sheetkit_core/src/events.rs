//! Scroll event vocabulary
//!
//! Events reported by a scroll surface, and the dispatcher that fans them out
//! to caller callbacks in arrival order.

use rustc_hash::FxHashMap;

/// Event type identifier
pub type EventType = u32;

/// Scroll surface event types
pub mod event_types {
    use super::EventType;

    pub const SCROLL: EventType = 30;
    /// User started dragging the content
    pub const SCROLL_BEGIN_DRAG: EventType = 33;
    /// User released the content
    pub const SCROLL_END_DRAG: EventType = 34;
    /// Momentum deceleration started after release
    pub const MOMENTUM_SCROLL_BEGIN: EventType = 35;
    /// Momentum deceleration settled
    pub const MOMENTUM_SCROLL_END: EventType = 36;
}

/// A 2D offset in logical pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A 2D size in logical pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A scroll event with the surface geometry at the time it fired
#[derive(Clone, Debug)]
pub struct ScrollEvent {
    pub event_type: EventType,
    pub content_offset: Offset,
    pub content_size: Size,
    pub layout_measurement: Size,
}

impl ScrollEvent {
    /// Create an event at a vertical offset with empty geometry
    pub fn new(event_type: EventType, offset_y: f32) -> Self {
        Self {
            event_type,
            content_offset: Offset::new(0.0, offset_y),
            content_size: Size::default(),
            layout_measurement: Size::default(),
        }
    }

    pub fn scroll(offset_y: f32) -> Self {
        Self::new(event_types::SCROLL, offset_y)
    }

    pub fn begin_drag(offset_y: f32) -> Self {
        Self::new(event_types::SCROLL_BEGIN_DRAG, offset_y)
    }

    pub fn end_drag(offset_y: f32) -> Self {
        Self::new(event_types::SCROLL_END_DRAG, offset_y)
    }

    pub fn momentum_begin(offset_y: f32) -> Self {
        Self::new(event_types::MOMENTUM_SCROLL_BEGIN, offset_y)
    }

    pub fn momentum_end(offset_y: f32) -> Self {
        Self::new(event_types::MOMENTUM_SCROLL_END, offset_y)
    }

    pub fn with_content_size(mut self, width: f32, height: f32) -> Self {
        self.content_size = Size::new(width, height);
        self
    }

    pub fn with_layout_measurement(mut self, width: f32, height: f32) -> Self {
        self.layout_measurement = Size::new(width, height);
        self
    }
}

/// Scroll event handler function type
pub type ScrollEventHandler = Box<dyn Fn(&ScrollEvent) + Send + Sync>;

/// Dispatches scroll events to registered caller callbacks
#[derive(Default)]
pub struct ScrollCallbacks {
    handlers: FxHashMap<EventType, Vec<ScrollEventHandler>>,
}

impl ScrollCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an event type
    pub fn register<F>(&mut self, event_type: EventType, handler: F)
    where
        F: Fn(&ScrollEvent) + Send + Sync + 'static,
    {
        self.handlers
            .entry(event_type)
            .or_default()
            .push(Box::new(handler));
    }

    /// Check whether any handler listens for an event type
    pub fn has_handlers(&self, event_type: EventType) -> bool {
        self.handlers
            .get(&event_type)
            .is_some_and(|handlers| !handlers.is_empty())
    }

    /// Dispatch an event to its handlers in registration order
    pub fn dispatch(&self, event: &ScrollEvent) {
        if let Some(handlers) = self.handlers.get(&event.event_type) {
            for handler in handlers {
                handler(event);
            }
        }
    }
}
