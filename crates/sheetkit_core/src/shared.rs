//! Single-writer shared cells
//!
//! State shared between the sheet panel and its scrollables crosses threads:
//! the panel settles on the animation thread while scroll events may arrive
//! from the platform input thread. Every field is a cell with exactly one
//! writer and any number of readers.
//!
//! - [`SharedValue`] is a cloneable read handle. `get()` is a single atomic
//!   load and never blocks.
//! - [`SharedWriter`] is the exclusive write lease. Only one can exist per cell;
//!   dropping it releases the lease so another owner can take over.
//!
//! ```rust
//! use sheetkit_core::shared::SharedWriter;
//!
//! let footer = SharedWriter::new(0.0f32);
//! let reader = footer.reader();
//!
//! footer.set(40.0);
//! assert_eq!(reader.get(), 40.0);
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// A value that can be stored in a shared cell as raw bits
pub trait AtomicValue: Copy + PartialEq + Send + Sync + 'static {
    /// Encode the value into cell bits
    fn to_bits(self) -> u64;

    /// Decode the value from cell bits
    fn from_bits(bits: u64) -> Self;

    /// Whether the value may be written into shared state
    ///
    /// Floats reject NaN and infinities so an undefined measurement never
    /// reaches a reader.
    fn is_storable(&self) -> bool {
        true
    }
}

impl AtomicValue for f32 {
    fn to_bits(self) -> u64 {
        f32::to_bits(self) as u64
    }

    fn from_bits(bits: u64) -> Self {
        f32::from_bits(bits as u32)
    }

    fn is_storable(&self) -> bool {
        self.is_finite()
    }
}

impl AtomicValue for bool {
    fn to_bits(self) -> u64 {
        self as u64
    }

    fn from_bits(bits: u64) -> Self {
        bits != 0
    }
}

struct Cell {
    bits: AtomicU64,
    leased: AtomicBool,
}

/// Read handle on a shared cell
pub struct SharedValue<T> {
    cell: Arc<Cell>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for SharedValue<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
            _marker: PhantomData,
        }
    }
}

impl<T: AtomicValue> SharedValue<T> {
    /// Create a cell with no writer leased
    pub fn new(initial: T) -> Self {
        Self {
            cell: Arc::new(Cell {
                bits: AtomicU64::new(initial.to_bits()),
                leased: AtomicBool::new(false),
            }),
            _marker: PhantomData,
        }
    }

    /// Read the current value
    #[inline]
    pub fn get(&self) -> T {
        T::from_bits(self.cell.bits.load(Ordering::Acquire))
    }

    /// Lease the writer for this cell
    ///
    /// Returns `None` while another writer is alive.
    pub fn try_writer(&self) -> Option<SharedWriter<T>> {
        self.cell
            .leased
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SharedWriter {
                cell: Arc::clone(&self.cell),
                _marker: PhantomData,
            })
    }

    /// Check whether a writer currently holds the lease
    pub fn has_writer(&self) -> bool {
        self.cell.leased.load(Ordering::Acquire)
    }

    /// Check whether two handles point at the same cell
    pub fn same_cell(&self, other: &SharedValue<T>) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<T: AtomicValue + fmt::Debug> fmt::Debug for SharedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedValue").field(&self.get()).finish()
    }
}

/// Exclusive write lease on a shared cell
pub struct SharedWriter<T: AtomicValue> {
    cell: Arc<Cell>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: AtomicValue> SharedWriter<T> {
    /// Create a new cell and hold its writer
    pub fn new(initial: T) -> Self {
        Self {
            cell: Arc::new(Cell {
                bits: AtomicU64::new(initial.to_bits()),
                leased: AtomicBool::new(true),
            }),
            _marker: PhantomData,
        }
    }

    /// Get a read handle on the same cell
    pub fn reader(&self) -> SharedValue<T> {
        SharedValue {
            cell: Arc::clone(&self.cell),
            _marker: PhantomData,
        }
    }

    /// Read the current value
    #[inline]
    pub fn get(&self) -> T {
        T::from_bits(self.cell.bits.load(Ordering::Acquire))
    }

    /// Store a value, returning whether the cell changed
    ///
    /// Unchanged and non-storable values leave the cell untouched.
    #[inline]
    pub fn set(&self, value: T) -> bool {
        if !value.is_storable() {
            tracing::trace!("rejected non-storable shared value write");
            return false;
        }

        let bits = value.to_bits();
        // Single writer, so the compare and the store cannot race another store
        if self.cell.bits.load(Ordering::Relaxed) == bits {
            return false;
        }
        self.cell.bits.store(bits, Ordering::Release);
        true
    }
}

impl<T: AtomicValue> Drop for SharedWriter<T> {
    fn drop(&mut self) {
        self.cell.leased.store(false, Ordering::Release);
    }
}

impl<T: AtomicValue + fmt::Debug> fmt::Debug for SharedWriter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedWriter").field(&self.get()).finish()
    }
}
