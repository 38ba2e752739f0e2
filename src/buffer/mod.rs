//! Buffer Module
//!
//! Bounded, big-endian views over an immutable byte medium.
//!
//! ## View Model
//! ```text
//!   medium:  ┌───────────────────────────────────────────────────┐
//!            │ . . . . . ┌─────────────────────────┐ . . . . . . │
//!            │           │▓▓▓▓▓▓▓▓▓▓▓▓│            │             │
//!            └───────────┴────────────┴────────────┴─────────────┘
//!                        ▲            ▲            ▲
//!                      offset     position       limit
//!                      (view-relative 0)     (view length)
//! ```
//!
//! Every read is either relative (at `position`, then advance) or absolute
//! (at an explicit view index, cursor untouched). `slice` is the only way to
//! narrow a view; the child shares the medium and gets its own cursor.
//!
//! ## Variants
//! - [`FileBuffer`]: positioned reads against a shared file handle
//! - [`MemoryBuffer`]: direct indexing into a refcounted memory region

mod file;
mod memory;

use std::cmp::Ordering;

use crate::error::{ensure, AtlasError, Result};

pub use file::FileBuffer;
pub use memory::MemoryBuffer;

/// Width of a big-endian `i32`
pub const INT_SIZE: u64 = 4;

/// Width of a big-endian `i64`
pub const LONG_SIZE: u64 = 8;

/// Chunk size used by [`compare`] when streaming two views
const COMPARE_CHUNK: usize = 256;

/// A bounded, cursor-bearing, big-endian view over an immutable medium.
///
/// A single view is not meant to be shared between threads while its cursor
/// is in use; hand other readers their own view via [`Buffer::slice`].
pub trait Buffer: Sized {
    // -------------------------------------------------------------------------
    // Cursor
    // -------------------------------------------------------------------------

    /// Current cursor, always within `[0, limit]`
    fn position(&self) -> u64;

    /// Move the cursor to `position`
    fn set_position(&mut self, position: u64) -> Result<&mut Self>;

    /// Move the cursor forward by `bytes`
    fn advance(&mut self, bytes: u64) -> Result<&mut Self>;

    /// Length of this view in bytes
    fn limit(&self) -> u64;

    fn remaining(&self) -> u64 {
        self.limit() - self.position()
    }

    fn has_remaining(&self) -> bool {
        self.position() < self.limit()
    }

    // -------------------------------------------------------------------------
    // Absolute Reads (cursor untouched)
    // -------------------------------------------------------------------------

    /// Fill `dst` with the bytes starting at view index `index`
    fn read_at(&self, index: u64, dst: &mut [u8]) -> Result<()>;

    /// Read one byte at view index `index`
    fn get_at(&self, index: u64) -> Result<u8>;

    /// Read a big-endian `i32` at view index `index`
    fn get_int_at(&self, index: u64) -> Result<i32>;

    /// Read a big-endian `i64` at view index `index`
    fn get_long_at(&self, index: u64) -> Result<i64>;

    // -------------------------------------------------------------------------
    // Slicing
    // -------------------------------------------------------------------------

    /// New view over `[from, from + size)` of this view, cursor at 0
    fn slice(&self, from: u64, size: u64) -> Result<Self>;

    /// New view over the next `size` bytes after the cursor
    fn slice_next(&self, size: u64) -> Result<Self> {
        self.slice(self.position(), size)
    }

    /// New view over everything between the cursor and the limit
    fn slice_remaining(&self) -> Result<Self> {
        self.slice(self.position(), self.remaining())
    }

    // -------------------------------------------------------------------------
    // Relative Reads (read at cursor, then advance)
    // -------------------------------------------------------------------------

    fn get(&mut self) -> Result<u8> {
        check_remaining(self, 1)?;
        let value = self.get_at(self.position())?;
        self.advance(1)?;
        Ok(value)
    }

    fn get_int(&mut self) -> Result<i32> {
        check_remaining(self, INT_SIZE)?;
        let value = self.get_int_at(self.position())?;
        self.advance(INT_SIZE)?;
        Ok(value)
    }

    fn get_long(&mut self) -> Result<i64> {
        check_remaining(self, LONG_SIZE)?;
        let value = self.get_long_at(self.position())?;
        self.advance(LONG_SIZE)?;
        Ok(value)
    }

    /// Fill `dst` from the cursor and advance past the copied bytes.
    ///
    /// Use a sub-slice (`&mut dst[off..off + len]`) to fill part of an array.
    fn get_into(&mut self, dst: &mut [u8]) -> Result<&mut Self> {
        check_remaining(self, dst.len() as u64)?;
        self.read_at(self.position(), dst)?;
        self.advance(dst.len() as u64)
    }

    // -------------------------------------------------------------------------
    // Copies
    // -------------------------------------------------------------------------

    /// Copy the whole view into an owned vector (cursor untouched)
    fn to_vec(&self) -> Result<Vec<u8>> {
        let len = usize::try_from(self.limit()).map_err(|_| {
            AtlasError::Precondition(format!(
                "View of {} bytes does not fit in memory",
                self.limit()
            ))
        })?;
        let mut bytes = vec![0u8; len];
        self.read_at(0, &mut bytes)?;
        Ok(bytes)
    }
}

/// Lexicographic comparison of two views as unsigned bytes.
///
/// Both cursors are ignored; the full `[0, limit)` range of each is compared.
pub fn compare<A: Buffer, B: Buffer>(a: &A, b: &B) -> Result<Ordering> {
    let common = a.limit().min(b.limit());
    let mut left = [0u8; COMPARE_CHUNK];
    let mut right = [0u8; COMPARE_CHUNK];

    let mut index = 0u64;
    while index < common {
        let n = (common - index).min(COMPARE_CHUNK as u64) as usize;
        a.read_at(index, &mut left[..n])?;
        b.read_at(index, &mut right[..n])?;
        match left[..n].cmp(&right[..n]) {
            Ordering::Equal => index += n as u64,
            other => return Ok(other),
        }
    }

    Ok(a.limit().cmp(&b.limit()))
}

// =============================================================================
// Shared Bounds Checks
// =============================================================================

/// `[index, index + width)` must lie inside a view of length `limit`
pub(crate) fn check_range(index: u64, width: u64, limit: u64) -> Result<()> {
    let end = index.checked_add(width);
    ensure!(
        matches!(end, Some(end) if end <= limit),
        "Read of {} bytes at index {} exceeds limit {}",
        width,
        index,
        limit
    );
    Ok(())
}

/// A cursor move to `position` must stay within `[0, limit]`
pub(crate) fn check_position(position: u64, limit: u64) -> Result<()> {
    ensure!(
        position <= limit,
        "Position {} outside [0, {}]",
        position,
        limit
    );
    Ok(())
}

/// `advance(bytes)` from `position` must not pass `limit`
pub(crate) fn check_advance(position: u64, bytes: u64, limit: u64) -> Result<u64> {
    match position.checked_add(bytes) {
        Some(next) if next <= limit => Ok(next),
        _ => Err(AtlasError::Precondition(format!(
            "Advance by {} from position {} exceeds limit {}",
            bytes, position, limit
        ))),
    }
}

/// `slice(from, size)` must be fully contained in a view of length `limit`
pub(crate) fn check_slice(from: u64, size: u64, limit: u64) -> Result<()> {
    let end = from.checked_add(size);
    ensure!(
        matches!(end, Some(end) if end <= limit),
        "Slice [{}, {} + {}) not contained in view of limit {}",
        from,
        from,
        size,
        limit
    );
    Ok(())
}

fn check_remaining<B: Buffer>(buf: &B, width: u64) -> Result<()> {
    ensure!(
        buf.remaining() >= width,
        "Relative read of {} bytes with only {} remaining",
        width,
        buf.remaining()
    );
    Ok(())
}
