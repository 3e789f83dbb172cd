//! Scroll gesture arbitration
//!
//! The sheet's drag gesture and the content's native scroll gesture see the
//! same pointer stream. The scroll gesture built here is allowed to recognize
//! alongside the drag gesture instead of cancelling it, and keeps recognizing
//! when the pointer leaves the scrollable's bounds, since the sheet can extend
//! past the visible region. Which of the two actually moves the interface is
//! then decided by the panel through the scroll lock.

use smallvec::SmallVec;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a gesture recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GestureId(u64);

impl GestureId {
    /// Allocate a fresh identity
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        GestureId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn to_raw(self) -> u64 {
        self.0
    }
}

/// The panel's drag-to-resize gesture, as seen by its scrollables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraggableGesture {
    id: GestureId,
}

impl DraggableGesture {
    pub fn new() -> Self {
        Self {
            id: GestureId::next(),
        }
    }

    pub fn id(&self) -> GestureId {
        self.id
    }
}

impl Default for DraggableGesture {
    fn default() -> Self {
        Self::new()
    }
}

/// Descriptor of the native scroll gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeGesture {
    id: GestureId,
    simultaneous_with: SmallVec<[GestureId; 2]>,
    cancels_when_outside: bool,
}

impl NativeGesture {
    pub fn new() -> Self {
        Self {
            id: GestureId::next(),
            simultaneous_with: SmallVec::new(),
            cancels_when_outside: true,
        }
    }

    /// Allow recognition alongside an external gesture
    pub fn simultaneous_with_external(mut self, external: GestureId) -> Self {
        if !self.simultaneous_with.contains(&external) {
            self.simultaneous_with.push(external);
        }
        self
    }

    pub fn should_cancel_when_outside(mut self, cancel: bool) -> Self {
        self.cancels_when_outside = cancel;
        self
    }

    pub fn id(&self) -> GestureId {
        self.id
    }

    /// Check whether this gesture may recognize while `other` is active
    pub fn recognizes_simultaneously_with(&self, other: GestureId) -> bool {
        self.simultaneous_with.contains(&other)
    }

    /// Check whether a pointer update should cancel recognition
    pub fn should_cancel_on_pointer(&self, pointer_inside: bool) -> bool {
        !pointer_inside && self.cancels_when_outside
    }

    /// A standalone gesture cannot cooperate with panel dragging
    pub fn is_standalone(&self) -> bool {
        self.simultaneous_with.is_empty()
    }
}

impl Default for NativeGesture {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds and memoizes the scroll gesture for one mounted scrollable
#[derive(Debug, Default)]
pub struct GestureArbiter {
    current: Option<(Option<GestureId>, NativeGesture)>,
    generation: u32,
    degraded_reported: bool,
}

impl GestureArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the scroll gesture for the given external drag gesture
    ///
    /// The descriptor is rebuilt only when the drag gesture identity changes;
    /// rebuilding mid-gesture would drop the recognizer state.
    pub fn native_gesture(&mut self, external: Option<&DraggableGesture>) -> &NativeGesture {
        let key = external.map(DraggableGesture::id);
        if self.current.as_ref().is_some_and(|(k, _)| *k != key) {
            self.current = None;
        }

        let generation = &mut self.generation;
        let degraded_reported = &mut self.degraded_reported;
        let (_, gesture) = self.current.get_or_insert_with(|| {
            *generation += 1;
            let gesture = NativeGesture::new().should_cancel_when_outside(false);
            match external {
                Some(drag) => {
                    tracing::debug!(
                        "scroll gesture {:?} bound to drag gesture {:?}",
                        gesture.id(),
                        drag.id()
                    );
                    (key, gesture.simultaneous_with_external(drag.id()))
                }
                None => {
                    if !*degraded_reported {
                        tracing::warn!(
                            "no draggable gesture in sheet context; scrolling runs standalone"
                        );
                        *degraded_reported = true;
                    }
                    (key, gesture)
                }
            }
        });
        gesture
    }

    /// Check whether the current gesture is standalone
    pub fn is_degraded(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|(_, gesture)| gesture.is_standalone())
    }

    /// Number of times the descriptor has been built
    pub fn generation(&self) -> u32 {
        self.generation
    }
}
