//! Sheetkit Scrollables
//!
//! Scroll content hosted inside a draggable bottom sheet. The sheet's drag
//! gesture and the content's scroll gesture share one pointer stream; the
//! pieces here keep exactly one of them in control and keep the sheet's
//! layout state in step with the content.
//!
//! - [`gesture`]: scroll gesture that cooperates with the sheet drag gesture
//! - [`offset`]: live offset and drag boundaries streamed into shared state
//! - [`projector`]: scroll lock projected onto surface props per frame
//! - [`content_size`]: content size turned into the sheet's content extent
//! - [`registration`]: scrollable registration with the sheet
//! - [`scrollable`]: the factory tying them to a host scroll surface

pub mod config;
pub mod constants;
pub mod content_size;
pub mod context;
pub mod gesture;
pub mod handlers;
pub mod offset;
pub mod projector;
pub mod registration;
pub mod scrollable;
pub mod style;
pub mod surface;

pub use config::ScrollableConfig;
pub use constants::{
    DecelerationRate, KeyboardDismissMode, OverScrollMode, ScrollLockState, ScrollableKind,
    SheetPosition,
};
pub use context::SheetContext;
pub use gesture::{DraggableGesture, GestureArbiter, NativeGesture};
pub use offset::{OffsetTracker, ScrollEventsHandlers};
pub use projector::{project, AnimatedProps};
pub use registration::{Registration, ScrollableId};
pub use scrollable::{
    bottom_sheet_flat_list, bottom_sheet_scroll_view, bottom_sheet_section_list,
    bottom_sheet_view, bottom_sheet_virtualized_list, create_bottom_sheet_scrollable,
    BottomSheetScrollable, Degradation, ScrollableBuilder,
};
pub use surface::{ScrollHandle, ScrollSurface, SurfaceProps};

/// Everything needed to mount scrollables into a sheet
pub mod prelude {
    pub use crate::config::ScrollableConfig;
    pub use crate::constants::*;
    pub use crate::context::SheetContext;
    pub use crate::scrollable::*;
    pub use crate::surface::{ScrollHandle, ScrollSurface, SurfaceProps};
    pub use sheetkit_animation::{AnimationScheduler, FrameLoop};
    pub use sheetkit_core::{event_types, ScrollEvent};
}
