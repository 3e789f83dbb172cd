//! Scroll surface capability
//!
//! Rendering is owned by the host. Each concrete surface kind (plain scroll
//! view, flat list, section list, ...) implements [`ScrollSurface`] and is
//! picked by the [`ScrollableKind`] tag passed to the factory.

use std::fmt;
use std::sync::Arc;

use taffy::prelude::Style;

use crate::constants::{KeyboardDismissMode, OverScrollMode, ScrollableKind};
use crate::projector::AnimatedProps;

/// Capabilities every scroll surface provides
///
/// Offset reporting and content-size notification flow the other way: the
/// surface calls `handle_scroll_event` and `handle_content_size_change` on the
/// mounted scrollable.
pub trait ScrollSurface: Send + Sync {
    /// Programmatically move the content
    fn scroll_to(&self, x: f32, y: f32, animated: bool);

    /// Apply props derived on the animation clock, without re-rendering
    fn apply_animated_props(&self, props: AnimatedProps);

    /// Receive the static props once at mount
    fn configure(&self, _props: &SurfaceProps) {}

    /// Apply a container style derived on the animation clock
    fn apply_container_style(&self, _style: &Style) {}
}

/// Props pushed to the surface once at mount
#[derive(Debug, Clone)]
pub struct SurfaceProps {
    pub kind: ScrollableKind,
    pub over_scroll_mode: OverScrollMode,
    pub keyboard_dismiss_mode: KeyboardDismissMode,
    /// Whether a refresh handler was supplied
    pub refresh_enabled: bool,
    pub refreshing: bool,
    pub progress_view_offset: Option<f32>,
    pub scroll_event_throttle_ms: u32,
    pub animated: AnimatedProps,
    pub style: Style,
}

/// Imperative handle on the underlying scroll surface
///
/// Exposes native scroll control and nothing else about the scrollable.
#[derive(Clone)]
pub struct ScrollHandle {
    kind: ScrollableKind,
    surface: Arc<dyn ScrollSurface>,
}

impl ScrollHandle {
    pub(crate) fn new(kind: ScrollableKind, surface: Arc<dyn ScrollSurface>) -> Self {
        Self { kind, surface }
    }

    pub fn kind(&self) -> ScrollableKind {
        self.kind
    }

    pub fn scroll_to(&self, x: f32, y: f32, animated: bool) {
        self.surface.scroll_to(x, y, animated);
    }

    pub fn scroll_to_top(&self, animated: bool) {
        self.surface.scroll_to(0.0, 0.0, animated);
    }
}

impl fmt::Debug for ScrollHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollHandle")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
