//! Sheet-side state shared with scrollables
//!
//! `SheetContext` is the sheet's half of the contract. It owns the writers
//! for everything the sheet decides (scroll lock, footer height, position,
//! animation status) and lends out read handles. The content extent is the
//! one sheet-owned cell written from outside: its writer is leased to a
//! single scrollable at a time.
//!
//! ```rust
//! use sheetkit_scrollable::context::SheetContext;
//! use sheetkit_scrollable::constants::ScrollLockState;
//!
//! let sheet = SheetContext::builder().footer_height(40.0).build();
//! let lock = sheet.lock_state();
//!
//! sheet.set_scroll_lock(ScrollLockState::Locked);
//! assert!(lock.get().is_locked());
//! ```

use std::sync::Arc;

use sheetkit_core::{Result, SharedValue, SharedWriter};

use crate::constants::{ScrollLockState, ScrollableKind, SheetPosition};
use crate::gesture::DraggableGesture;
use crate::registration::{Registration, ScrollableId, ScrollableRegistry};

/// Builder for [`SheetContext`]
pub struct SheetContextBuilder {
    dynamic_sizing: bool,
    draggable: bool,
    lock_state: ScrollLockState,
    footer_height: f32,
    position: SheetPosition,
}

impl Default for SheetContextBuilder {
    fn default() -> Self {
        Self {
            dynamic_sizing: true,
            draggable: true,
            lock_state: ScrollLockState::Unlocked,
            footer_height: 0.0,
            position: SheetPosition::Closed,
        }
    }
}

impl SheetContextBuilder {
    /// Size the sheet from its content (default: enabled)
    pub fn dynamic_sizing(mut self, enabled: bool) -> Self {
        self.dynamic_sizing = enabled;
        self
    }

    /// Provide a drag gesture to scrollables (default: enabled)
    pub fn draggable(mut self, enabled: bool) -> Self {
        self.draggable = enabled;
        self
    }

    pub fn lock_state(mut self, lock: ScrollLockState) -> Self {
        self.lock_state = lock;
        self
    }

    pub fn footer_height(mut self, height: f32) -> Self {
        self.footer_height = height;
        self
    }

    pub fn position(mut self, position: SheetPosition) -> Self {
        self.position = position;
        self
    }

    pub fn build(self) -> Arc<SheetContext> {
        Arc::new(SheetContext {
            lock_state: SharedWriter::new(self.lock_state),
            footer_height: SharedWriter::new(self.footer_height),
            content_height: SharedValue::new(0.0),
            position: SharedWriter::new(self.position),
            animation_running: SharedWriter::new(false),
            dynamic_sizing: SharedWriter::new(self.dynamic_sizing),
            root_scrollable_offset: SharedWriter::new(0.0),
            root_scrollable_kind: SharedWriter::new(ScrollableKind::Undetermined),
            root_scrollable_refreshable: SharedWriter::new(false),
            draggable_gesture: self.draggable.then(DraggableGesture::new),
            registry: ScrollableRegistry::new(),
        })
    }
}

/// State the sheet shares with the scrollables it hosts
pub struct SheetContext {
    lock_state: SharedWriter<ScrollLockState>,
    footer_height: SharedWriter<f32>,
    content_height: SharedValue<f32>,
    position: SharedWriter<SheetPosition>,
    animation_running: SharedWriter<bool>,
    dynamic_sizing: SharedWriter<bool>,
    root_scrollable_offset: SharedWriter<f32>,
    root_scrollable_kind: SharedWriter<ScrollableKind>,
    root_scrollable_refreshable: SharedWriter<bool>,
    draggable_gesture: Option<DraggableGesture>,
    registry: ScrollableRegistry,
}

impl SheetContext {
    pub fn builder() -> SheetContextBuilder {
        SheetContextBuilder::default()
    }

    // =========================================================================
    // Read handles
    // =========================================================================

    pub fn lock_state(&self) -> SharedValue<ScrollLockState> {
        self.lock_state.reader()
    }

    pub fn footer_height(&self) -> SharedValue<f32> {
        self.footer_height.reader()
    }

    /// The extent the sheet sizes itself from
    ///
    /// Scrollables lease its writer with [`SharedValue::try_writer`].
    pub fn content_height(&self) -> SharedValue<f32> {
        self.content_height.clone()
    }

    pub fn position(&self) -> SharedValue<SheetPosition> {
        self.position.reader()
    }

    pub fn animation_running(&self) -> SharedValue<bool> {
        self.animation_running.reader()
    }

    pub fn dynamic_sizing(&self) -> SharedValue<bool> {
        self.dynamic_sizing.reader()
    }

    pub fn root_scrollable_offset(&self) -> SharedValue<f32> {
        self.root_scrollable_offset.reader()
    }

    pub fn root_scrollable_kind(&self) -> SharedValue<ScrollableKind> {
        self.root_scrollable_kind.reader()
    }

    pub fn root_scrollable_refreshable(&self) -> SharedValue<bool> {
        self.root_scrollable_refreshable.reader()
    }

    pub fn draggable_gesture(&self) -> Option<&DraggableGesture> {
        self.draggable_gesture.as_ref()
    }

    // =========================================================================
    // Sheet-side writes
    // =========================================================================

    pub fn set_scroll_lock(&self, lock: ScrollLockState) -> bool {
        self.lock_state.set(lock)
    }

    pub fn set_footer_height(&self, height: f32) -> bool {
        self.footer_height.set(height)
    }

    pub fn set_position(&self, position: SheetPosition) -> bool {
        self.position.set(position)
    }

    pub fn set_animation_running(&self, running: bool) -> bool {
        self.animation_running.set(running)
    }

    pub fn set_dynamic_sizing(&self, enabled: bool) -> bool {
        self.dynamic_sizing.set(enabled)
    }

    pub fn set_root_scrollable_offset(&self, offset: f32) -> bool {
        self.root_scrollable_offset.set(offset)
    }

    pub(crate) fn publish_root_scrollable(
        &self,
        kind: ScrollableKind,
        refreshable: bool,
        offset: f32,
    ) {
        self.root_scrollable_offset.set(offset);
        self.root_scrollable_kind.set(kind);
        self.root_scrollable_refreshable.set(refreshable);
    }

    // =========================================================================
    // Registry
    // =========================================================================

    pub fn register(&self, registration: Registration) -> Result<()> {
        self.registry.register(registration)
    }

    /// Remove a scrollable, clearing the root scrollable state with the last one
    pub fn unregister(&self, id: ScrollableId) -> bool {
        let removed = self.registry.unregister(id);
        if removed && self.registry.is_empty() {
            self.root_scrollable_kind.set(ScrollableKind::Undetermined);
            self.root_scrollable_refreshable.set(false);
        }
        removed
    }

    pub fn is_registered(&self, id: ScrollableId) -> bool {
        self.registry.contains(id)
    }

    pub fn registered_count(&self) -> usize {
        self.registry.len()
    }

    /// The scrollable currently driving scroll locking
    pub fn active_scrollable(&self) -> Option<Registration> {
        self.registry.active()
    }

    /// Offset of the active scrollable, or zero when none is registered
    pub fn active_scrollable_offset(&self) -> f32 {
        self.active_scrollable()
            .map_or(0.0, |registration| registration.offset.get())
    }
}
