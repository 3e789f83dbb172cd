//! Shared enums and constants for sheet scrollables

use serde::{Deserialize, Serialize};
use sheetkit_core::AtomicValue;

/// Scroll event throttle passed to every surface, in milliseconds
pub const SCROLL_EVENT_THROTTLE_MS: u32 = 16;

/// Whether inner scrolling is permitted or panel dragging has priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollLockState {
    /// Panel drag has priority; content scrolling is pinned
    Locked,
    /// Content scrolls freely
    #[default]
    Unlocked,
}

impl ScrollLockState {
    pub fn is_locked(&self) -> bool {
        matches!(self, ScrollLockState::Locked)
    }
}

impl AtomicValue for ScrollLockState {
    fn to_bits(self) -> u64 {
        match self {
            ScrollLockState::Locked => 0,
            ScrollLockState::Unlocked => 1,
        }
    }

    fn from_bits(bits: u64) -> Self {
        match bits {
            0 => ScrollLockState::Locked,
            _ => ScrollLockState::Unlocked,
        }
    }
}

/// Position of the sheet relative to its snap points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SheetPosition {
    #[default]
    Closed,
    Opened,
    /// At the highest snap point
    Extended,
    /// Dragged past the highest snap point
    OverExtended,
    /// Filling the container
    FillParent,
}

impl SheetPosition {
    /// Check if the sheet is fully expanded, where content may scroll
    pub fn is_expanded(&self) -> bool {
        matches!(self, SheetPosition::Extended | SheetPosition::FillParent)
    }
}

impl AtomicValue for SheetPosition {
    fn to_bits(self) -> u64 {
        match self {
            SheetPosition::Closed => 0,
            SheetPosition::Opened => 1,
            SheetPosition::Extended => 2,
            SheetPosition::OverExtended => 3,
            SheetPosition::FillParent => 4,
        }
    }

    fn from_bits(bits: u64) -> Self {
        match bits {
            1 => SheetPosition::Opened,
            2 => SheetPosition::Extended,
            3 => SheetPosition::OverExtended,
            4 => SheetPosition::FillParent,
            _ => SheetPosition::Closed,
        }
    }
}

/// Concrete scroll surface kinds a scrollable can wrap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollableKind {
    /// No scrollable has been activated yet
    #[default]
    Undetermined,
    View,
    ScrollView,
    FlatList,
    SectionList,
    VirtualizedList,
}

impl ScrollableKind {
    pub fn name(&self) -> &'static str {
        match self {
            ScrollableKind::Undetermined => "undetermined",
            ScrollableKind::View => "view",
            ScrollableKind::ScrollView => "scroll-view",
            ScrollableKind::FlatList => "flat-list",
            ScrollableKind::SectionList => "section-list",
            ScrollableKind::VirtualizedList => "virtualized-list",
        }
    }
}

impl AtomicValue for ScrollableKind {
    fn to_bits(self) -> u64 {
        match self {
            ScrollableKind::Undetermined => 0,
            ScrollableKind::View => 1,
            ScrollableKind::ScrollView => 2,
            ScrollableKind::FlatList => 3,
            ScrollableKind::SectionList => 4,
            ScrollableKind::VirtualizedList => 5,
        }
    }

    fn from_bits(bits: u64) -> Self {
        match bits {
            1 => ScrollableKind::View,
            2 => ScrollableKind::ScrollView,
            3 => ScrollableKind::FlatList,
            4 => ScrollableKind::SectionList,
            5 => ScrollableKind::VirtualizedList,
            _ => ScrollableKind::Undetermined,
        }
    }
}

/// Momentum deceleration applied by the surface after release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DecelerationRate {
    #[default]
    Normal,
    /// Stops quickly, used while the panel has drag priority
    Fast,
}

impl DecelerationRate {
    /// Per-frame velocity multiplier
    pub fn value(&self) -> f32 {
        match self {
            DecelerationRate::Normal => 0.998,
            DecelerationRate::Fast => 0.99,
        }
    }
}

/// Overscroll glow/bounce behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverScrollMode {
    Always,
    Auto,
    #[default]
    Never,
}

/// How dragging the content dismisses the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyboardDismissMode {
    None,
    OnDrag,
    #[default]
    Interactive,
}
