//! Bottom-sheet scrollable factory
//!
//! Wraps a host scroll surface so it scrolls cooperatively inside a sheet.
//! The surface kind is injected as a tag; every kind shares the same
//! behaviour.
//!
//! # Example
//!
//! ```rust,ignore
//! use sheetkit_scrollable::prelude::*;
//!
//! let sheet = SheetContext::builder().footer_height(40.0).build();
//! let scheduler = AnimationScheduler::shared();
//!
//! let mut list = bottom_sheet_flat_list(surface)
//!     .enable_footer_margin_adjustment(true)
//!     .on_content_size_change(|w, h| println!("content {}x{}", w, h))
//!     .mount(&sheet, &scheduler)?;
//!
//! // Forwarded from the host surface
//! list.handle_scroll_event(&ScrollEvent::scroll(120.0));
//! list.handle_content_size_change(375.0, 1200.0);
//!
//! // Imperative control
//! list.handle().scroll_to_top(true);
//! ```

use std::sync::{Arc, Mutex, PoisonError, Weak};

use smallvec::SmallVec;
use taffy::prelude::Style;

use sheetkit_animation::{AnimationScheduler, SharedScheduler, WorkletId};
use sheetkit_core::{event_types, Result, ScrollCallbacks, ScrollEvent, SharedValue, SharedWriter};

use crate::config::ScrollableConfig;
use crate::constants::{
    KeyboardDismissMode, OverScrollMode, ScrollLockState, ScrollableKind, SCROLL_EVENT_THROTTLE_MS,
};
use crate::content_size::{ContentSizeHandler, ContentSizeReconciler};
use crate::context::SheetContext;
use crate::gesture::{DraggableGesture, GestureArbiter, NativeGesture};
use crate::handlers::DefaultScrollEventsHandlers;
use crate::offset::{OffsetTracker, ScrollEventsHandlers};
use crate::projector::{project, AnimatedProps, AnimatedPropsBinding};
use crate::registration::{FocusProbe, Registration, RegistrationLifecycle, ScrollableId};
use crate::style::{container_style, ContainerStyleBinding};
use crate::surface::{ScrollHandle, ScrollSurface, SurfaceProps};

/// Refresh callback
pub type RefreshHandler = Box<dyn Fn() + Send + Sync>;

/// Non-fatal conditions detected while mounting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Degradation {
    /// The sheet offers no drag gesture; scrolling cannot cooperate with it
    NoDraggableGesture,
    /// Refresh props were set without a refresh handler; refresh stays inert
    RefreshWithoutHandler,
    /// Another scrollable sizes the sheet; content size is only forwarded
    ExtentLeaseUnavailable,
}

/// Start building a scrollable for a surface of the given kind
pub fn create_bottom_sheet_scrollable(
    kind: ScrollableKind,
    surface: Arc<dyn ScrollSurface>,
) -> ScrollableBuilder {
    ScrollableBuilder::new(kind, surface)
}

pub fn bottom_sheet_view(surface: Arc<dyn ScrollSurface>) -> ScrollableBuilder {
    create_bottom_sheet_scrollable(ScrollableKind::View, surface)
}

pub fn bottom_sheet_scroll_view(surface: Arc<dyn ScrollSurface>) -> ScrollableBuilder {
    create_bottom_sheet_scrollable(ScrollableKind::ScrollView, surface)
}

pub fn bottom_sheet_flat_list(surface: Arc<dyn ScrollSurface>) -> ScrollableBuilder {
    create_bottom_sheet_scrollable(ScrollableKind::FlatList, surface)
}

pub fn bottom_sheet_section_list(surface: Arc<dyn ScrollSurface>) -> ScrollableBuilder {
    create_bottom_sheet_scrollable(ScrollableKind::SectionList, surface)
}

pub fn bottom_sheet_virtualized_list(surface: Arc<dyn ScrollSurface>) -> ScrollableBuilder {
    create_bottom_sheet_scrollable(ScrollableKind::VirtualizedList, surface)
}

/// Builder collecting config and callbacks before mounting
pub struct ScrollableBuilder {
    kind: ScrollableKind,
    surface: Arc<dyn ScrollSurface>,
    config: ScrollableConfig,
    style: Style,
    callbacks: ScrollCallbacks,
    on_content_size_change: Option<ContentSizeHandler>,
    on_refresh: Option<RefreshHandler>,
    focus_probe: Option<FocusProbe>,
    events_handlers: Option<Arc<dyn ScrollEventsHandlers>>,
    activate_on_mount: bool,
}

impl ScrollableBuilder {
    pub fn new(kind: ScrollableKind, surface: Arc<dyn ScrollSurface>) -> Self {
        Self {
            kind,
            surface,
            config: ScrollableConfig::default(),
            style: Style::default(),
            callbacks: ScrollCallbacks::new(),
            on_content_size_change: None,
            on_refresh: None,
            focus_probe: None,
            events_handlers: None,
            activate_on_mount: true,
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Replace the whole configuration
    pub fn config(mut self, config: ScrollableConfig) -> Self {
        self.config = config;
        self
    }

    pub fn custom_content_height(mut self, height: f32) -> Self {
        self.config.custom_content_height = Some(height);
        self
    }

    pub fn enable_footer_margin_adjustment(mut self, enabled: bool) -> Self {
        self.config.enable_footer_margin_adjustment = enabled;
        self
    }

    pub fn over_scroll_mode(mut self, mode: OverScrollMode) -> Self {
        self.config.over_scroll_mode = mode;
        self
    }

    pub fn keyboard_dismiss_mode(mut self, mode: KeyboardDismissMode) -> Self {
        self.config.keyboard_dismiss_mode = mode;
        self
    }

    pub fn shows_vertical_scroll_indicator(mut self, shows: bool) -> Self {
        self.config.shows_vertical_scroll_indicator = shows;
        self
    }

    pub fn refreshing(mut self, refreshing: bool) -> Self {
        self.config.refreshing = Some(refreshing);
        self
    }

    pub fn progress_view_offset(mut self, offset: f32) -> Self {
        self.config.progress_view_offset = Some(offset);
        self
    }

    /// Container style; the footer margin is merged on top of it
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Register with the sheet as soon as mounted (default: true)
    ///
    /// Hosts that track screen focus themselves call `activate` and
    /// `deactivate` instead.
    pub fn activate_on_mount(mut self, activate: bool) -> Self {
        self.activate_on_mount = activate;
        self
    }

    /// Probe the sheet uses to pick among several active scrollables
    pub fn focus_probe<F>(mut self, probe: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.focus_probe = Some(Arc::new(probe));
        self
    }

    /// Replace the default scroll locking policy
    pub fn scroll_events_handlers(mut self, handlers: Arc<dyn ScrollEventsHandlers>) -> Self {
        self.events_handlers = Some(handlers);
        self
    }

    // =========================================================================
    // Events
    // =========================================================================

    pub fn on_scroll<F>(mut self, handler: F) -> Self
    where
        F: Fn(&ScrollEvent) + Send + Sync + 'static,
    {
        self.callbacks.register(event_types::SCROLL, handler);
        self
    }

    pub fn on_scroll_begin_drag<F>(mut self, handler: F) -> Self
    where
        F: Fn(&ScrollEvent) + Send + Sync + 'static,
    {
        self.callbacks.register(event_types::SCROLL_BEGIN_DRAG, handler);
        self
    }

    pub fn on_scroll_end_drag<F>(mut self, handler: F) -> Self
    where
        F: Fn(&ScrollEvent) + Send + Sync + 'static,
    {
        self.callbacks.register(event_types::SCROLL_END_DRAG, handler);
        self
    }

    pub fn on_momentum_scroll_begin<F>(mut self, handler: F) -> Self
    where
        F: Fn(&ScrollEvent) + Send + Sync + 'static,
    {
        self.callbacks
            .register(event_types::MOMENTUM_SCROLL_BEGIN, handler);
        self
    }

    pub fn on_momentum_scroll_end<F>(mut self, handler: F) -> Self
    where
        F: Fn(&ScrollEvent) + Send + Sync + 'static,
    {
        self.callbacks.register(event_types::MOMENTUM_SCROLL_END, handler);
        self
    }

    pub fn on_content_size_change<F>(mut self, handler: F) -> Self
    where
        F: Fn(f32, f32) + Send + Sync + 'static,
    {
        self.on_content_size_change = Some(Box::new(handler));
        self
    }

    pub fn on_refresh<F>(mut self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_refresh = Some(Box::new(handler));
        self
    }

    // =========================================================================
    // Mount
    // =========================================================================

    /// Mount the scrollable into a sheet
    pub fn mount(
        self,
        sheet: &Arc<SheetContext>,
        scheduler: &SharedScheduler,
    ) -> Result<BottomSheetScrollable> {
        let id = ScrollableId::next();
        let mut degradations = SmallVec::new();

        let mut arbiter = GestureArbiter::new();
        arbiter.native_gesture(sheet.draggable_gesture());
        if arbiter.is_degraded() {
            degradations.push(Degradation::NoDraggableGesture);
        }

        if self.config.has_refresh_props() && self.on_refresh.is_none() {
            tracing::warn!("scrollable {} has refresh props but no refresh handler", id);
            degradations.push(Degradation::RefreshWithoutHandler);
        }

        let handle = ScrollHandle::new(self.kind, Arc::clone(&self.surface));
        let offset = SharedWriter::new(0.0f32);
        let offset_reader = offset.reader();
        let events_handlers: Arc<dyn ScrollEventsHandlers> = match self.events_handlers {
            Some(handlers) => handlers,
            None => Arc::new(DefaultScrollEventsHandlers::new(sheet)),
        };
        let tracker = OffsetTracker::new(offset, events_handlers, self.callbacks);

        let adjust_for_footer = self.config.enable_footer_margin_adjustment;
        let mut reconciler = ContentSizeReconciler::new(
            sheet.content_height(),
            sheet.dynamic_sizing(),
            sheet.footer_height(),
        )
        .custom_content_height(self.config.content_height_override())
        .adjust_for_footer(adjust_for_footer)
        .on_content_size_change(self.on_content_size_change);

        if self.activate_on_mount && !reconciler.resume_extent() && sheet.dynamic_sizing().get() {
            tracing::warn!(
                "scrollable {} cannot size the sheet yet: content height is leased elsewhere",
                id
            );
            degradations.push(Degradation::ExtentLeaseUnavailable);
        }

        // Static props, with the current projection so the first frame is right
        let requested_indicator = self.config.shows_vertical_scroll_indicator;
        let initial_props = project(sheet.lock_state().get(), requested_indicator);
        let footer_height = sheet.footer_height();
        let initial_margin = footer_height.get();
        self.surface.configure(&SurfaceProps {
            kind: self.kind,
            over_scroll_mode: self.config.over_scroll_mode,
            keyboard_dismiss_mode: self.config.keyboard_dismiss_mode,
            refresh_enabled: self.on_refresh.is_some(),
            refreshing: self.config.refreshing.unwrap_or(false),
            progress_view_offset: self.config.progress_view_offset,
            scroll_event_throttle_ms: SCROLL_EVENT_THROTTLE_MS,
            animated: initial_props,
            style: container_style(&self.style, initial_margin, adjust_for_footer),
        });

        let mut props_binding = AnimatedPropsBinding::new(
            sheet.lock_state(),
            requested_indicator,
            Arc::clone(&self.surface),
        )
        .with_applied(initial_props);
        let mut style_binding = adjust_for_footer.then(|| {
            ContainerStyleBinding::new(self.style.clone(), footer_height, Arc::clone(&self.surface))
                .with_applied(initial_margin)
        });

        let worklet = scheduler
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .add_worklet(Box::new(move |_dt| {
                props_binding.tick();
                if let Some(binding) = style_binding.as_mut() {
                    binding.tick();
                }
            }));

        let mut lifecycle = RegistrationLifecycle::new(
            sheet,
            Registration {
                id,
                offset: offset_reader,
                kind: self.kind,
                supports_refresh: self.on_refresh.is_some(),
                focus_probe: self.focus_probe,
            },
        );

        let mut scrollable = BottomSheetScrollable {
            id,
            kind: self.kind,
            handle,
            arbiter,
            tracker,
            reconciler,
            lifecycle: None,
            on_refresh: self.on_refresh,
            requested_indicator,
            lock_state: sheet.lock_state(),
            degradations,
            scheduler: Arc::downgrade(scheduler),
            worklet,
        };

        if self.activate_on_mount {
            lifecycle.activate()?;
        }
        scrollable.lifecycle = Some(lifecycle);

        tracing::debug!("mounted {} scrollable {}", scrollable.kind.name(), id);
        Ok(scrollable)
    }
}

/// A scrollable mounted inside a sheet
///
/// Dropping it unregisters from the sheet, releases the extent lease and
/// stops its animation worklet.
pub struct BottomSheetScrollable {
    id: ScrollableId,
    kind: ScrollableKind,
    handle: ScrollHandle,
    arbiter: GestureArbiter,
    tracker: OffsetTracker,
    reconciler: ContentSizeReconciler,
    lifecycle: Option<RegistrationLifecycle>,
    on_refresh: Option<RefreshHandler>,
    requested_indicator: bool,
    lock_state: SharedValue<ScrollLockState>,
    degradations: SmallVec<[Degradation; 2]>,
    scheduler: Weak<Mutex<AnimationScheduler>>,
    worklet: WorkletId,
}

impl BottomSheetScrollable {
    pub fn id(&self) -> ScrollableId {
        self.id
    }

    pub fn kind(&self) -> ScrollableKind {
        self.kind
    }

    /// Imperative handle on the underlying surface
    pub fn handle(&self) -> ScrollHandle {
        self.handle.clone()
    }

    /// Read handle on the live scroll offset
    pub fn offset(&self) -> SharedValue<f32> {
        self.tracker.offset()
    }

    pub fn degradations(&self) -> &[Degradation] {
        &self.degradations
    }

    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }

    /// Whether the sheet content extent is sized by this scrollable
    pub fn owns_extent(&self) -> bool {
        self.reconciler.owns_extent()
    }

    /// The memoized scroll gesture
    pub fn native_gesture(&mut self) -> &NativeGesture {
        let external = self.current_draggable_gesture();
        self.arbiter.native_gesture(external.as_ref())
    }

    /// Rebind the scroll gesture to a new drag gesture
    ///
    /// A no-op unless the drag gesture identity changed.
    pub fn rebind_gesture(&mut self, external: Option<&DraggableGesture>) -> &NativeGesture {
        self.arbiter.native_gesture(external)
    }

    fn current_draggable_gesture(&self) -> Option<DraggableGesture> {
        self.lifecycle
            .as_ref()
            .and_then(|lifecycle| lifecycle.context())
            .and_then(|sheet| sheet.draggable_gesture().cloned())
    }

    /// Props the surface should currently show
    pub fn animated_props(&self) -> AnimatedProps {
        project(self.lock_state.get(), self.requested_indicator)
    }

    /// Forward a scroll surface event
    pub fn handle_scroll_event(&mut self, event: &ScrollEvent) {
        self.tracker.handle_event(event, &self.handle);
    }

    /// Forward a content size notification
    ///
    /// Returns the sheet extent when this scrollable sized it. An active
    /// scrollable takes over the extent once its previous holder unmounts or
    /// deactivates.
    pub fn handle_content_size_change(&mut self, width: f32, height: f32) -> Option<f32> {
        let extent = self.reconciler.handle(width, height);
        self.clear_extent_degradation();
        extent
    }

    fn clear_extent_degradation(&mut self) {
        if self.reconciler.owns_extent() {
            self.degradations
                .retain(|degradation| *degradation != Degradation::ExtentLeaseUnavailable);
        }
    }

    /// Run the refresh handler, returning whether one was supplied
    pub fn trigger_refresh(&self) -> bool {
        match &self.on_refresh {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle
            .as_ref()
            .is_some_and(RegistrationLifecycle::is_active)
    }

    /// Register with the sheet and size it when the extent is free
    pub fn activate(&mut self) -> Result<()> {
        if let Some(lifecycle) = self.lifecycle.as_mut() {
            lifecycle.activate()?;
        }
        self.reconciler.resume_extent();
        self.clear_extent_degradation();
        Ok(())
    }

    /// Unregister from the sheet, returning whether it was registered
    ///
    /// The content extent is released so another scrollable can size the
    /// sheet.
    pub fn deactivate(&mut self) -> bool {
        self.reconciler.suspend_extent();
        self.lifecycle
            .as_mut()
            .is_some_and(RegistrationLifecycle::deactivate)
    }
}

impl Drop for BottomSheetScrollable {
    fn drop(&mut self) {
        if let Some(scheduler) = self.scheduler.upgrade() {
            scheduler
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove_worklet(self.worklet);
        }
        tracing::debug!("unmounted scrollable {}", self.id);
    }
}
