//! Sheetkit Core
//!
//! Foundational primitives shared by the bottom-sheet crates:
//!
//! - **Shared cells**: single-writer, multi-reader values readable from any thread
//!   without blocking
//! - **Scroll events**: the event vocabulary reported by scroll surfaces and a
//!   dispatcher for caller callbacks
//! - **Errors**: the workspace error type
//!
//! # Example
//!
//! ```rust
//! use sheetkit_core::shared::SharedWriter;
//!
//! let writer = SharedWriter::new(0.0f32);
//! let reader = writer.reader();
//!
//! assert!(writer.set(120.0));
//! assert_eq!(reader.get(), 120.0);
//!
//! // A second writer cannot be leased while the first is alive
//! assert!(reader.try_writer().is_none());
//! ```

pub mod error;
pub mod events;
pub mod shared;

pub use error::{Result, SheetError};
pub use events::{event_types, EventType, Offset, ScrollCallbacks, ScrollEvent, Size};
pub use shared::{AtomicValue, SharedValue, SharedWriter};
