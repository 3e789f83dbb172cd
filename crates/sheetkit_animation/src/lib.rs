//! Sheetkit Animation Path
//!
//! Work that must follow the display refresh rather than the render pass.
//!
//! # Features
//!
//! - **Worklets**: small per-frame closures that derive presentation state
//!   from shared cells
//! - **Frame loop**: a dedicated thread that ticks the scheduler at the target
//!   frame rate, independent of the render path

pub mod frame_loop;
pub mod scheduler;

pub use frame_loop::FrameLoop;
pub use scheduler::{AnimationScheduler, SharedScheduler, Worklet, WorkletId};
