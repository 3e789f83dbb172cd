//! Sheetkit error types

use thiserror::Error;

/// Errors raised at the fallible edges of the sheet crates
///
/// Per-frame paths never return these; degraded conditions there are flagged
/// instead.
#[derive(Error, Debug)]
pub enum SheetError {
    /// Configuration could not be parsed
    #[error("Invalid scrollable configuration: {0}")]
    Config(String),

    /// The sheet context or animation scheduler has been dropped
    #[error("Sheet context detached: {0}")]
    Detached(&'static str),

    /// The scrollable id is already present in the registry
    #[error("Scrollable {0} is already registered")]
    AlreadyRegistered(u64),

    /// Failed to spawn the animation frame thread
    #[error("Failed to spawn frame loop: {0}")]
    FrameLoop(#[from] std::io::Error),
}

/// Result type for sheet operations
pub type Result<T> = std::result::Result<T, SheetError>;
