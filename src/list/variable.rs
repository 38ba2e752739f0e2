//! Variable-Length Byte Array List
//!
//! Offset table plus blob: `count + 1` cumulative offsets delimit `count`
//! records packed back to back, so record `i` is found with two absolute
//! reads and one slice.

use crate::buffer::{Buffer, INT_SIZE, LONG_SIZE};
use crate::config::{Config, Verification};
use crate::error::{ensure, AtlasError, Result};

use super::ByteArrayIndexedList;

/// Immutable list of variable-length byte records
#[derive(Debug)]
pub struct VariableLengthByteArrayIndexedList<B> {
    element_count: usize,
    /// `element_count + 1` big-endian i64 offsets into `elements`
    offsets: B,
    /// Concatenated record bytes (and whatever follows them in the view)
    elements: B,
}

impl<B: Buffer> VariableLengthByteArrayIndexedList<B> {
    /// Decode a list starting at the cursor of `buf`.
    ///
    /// Reads the element count (advancing `buf` past it) and slices the
    /// offset table and the elements region. Offsets are trusted; use
    /// [`Self::decode_with_config`] or [`Self::verify`] to check them.
    /// On failure the cursor of `buf` is restored to where it started.
    pub fn decode(buf: &mut B) -> Result<Self> {
        let start = buf.position();
        match Self::decode_at_cursor(buf) {
            Ok(list) => Ok(list),
            Err(e) => {
                // `start` came from this view, so restoring it cannot fail
                let _ = buf.set_position(start);
                Err(e)
            }
        }
    }

    fn decode_at_cursor(buf: &mut B) -> Result<Self> {
        let count = buf.get_int()?;
        ensure!(count >= 0, "Negative element count: {}", count);

        let offsets_len = (count as u64 + 1) * LONG_SIZE;
        let offsets = buf.slice_next(offsets_len)?;
        let elements = buf.slice(buf.position() + offsets_len, buf.remaining() - offsets_len)?;

        tracing::debug!(
            "Decoded variable-length list: {} elements over {} bytes",
            count,
            elements.limit()
        );

        Ok(Self {
            element_count: count as usize,
            offsets,
            elements,
        })
    }

    /// Decode, then run the verification pass if `config` asks for it
    pub fn decode_with_config(buf: &mut B, config: &Config) -> Result<Self> {
        let list = Self::decode(buf)?;
        if config.verification == Verification::Full {
            list.verify()?;
        }
        Ok(list)
    }

    /// Check the offset table against the layout invariants.
    ///
    /// `offsets[0] == 0`, offsets never decrease, and the last offset equals
    /// the length of the elements view. The view must therefore end where the
    /// list ends; bound it with [`Self::encoded_len`] when other data follows.
    /// Reads the whole table, so keep it off the hot path.
    pub fn verify(&self) -> Result<()> {
        let mut previous = self.offsets.get_long_at(0)?;
        if previous != 0 {
            return Err(self.corruption(format!("First offset is {}, expected 0", previous)));
        }

        for i in 1..=self.element_count {
            let current = self.offsets.get_long_at(i as u64 * LONG_SIZE)?;
            if current < previous {
                return Err(self.corruption(format!(
                    "Offset {} ({}) is smaller than offset {} ({})",
                    i,
                    current,
                    i - 1,
                    previous
                )));
            }
            previous = current;
        }

        if previous as u64 != self.elements.limit() {
            return Err(self.corruption(format!(
                "Last offset {} does not match elements length {}",
                previous,
                self.elements.limit()
            )));
        }

        Ok(())
    }

    /// Bytes occupied by the encoded list: count, offset table and records.
    ///
    /// Lets a caller step over the list to whatever is stored after it.
    pub fn encoded_len(&self) -> Result<u64> {
        let end = self.offsets.get_long_at(self.element_count as u64 * LONG_SIZE)?;
        ensure!(end >= 0, "Negative terminal offset: {}", end);
        Ok(INT_SIZE + self.offsets.limit() + end as u64)
    }

    /// The elements region this list slices records from
    pub fn elements(&self) -> &B {
        &self.elements
    }

    fn corruption(&self, message: String) -> AtlasError {
        tracing::warn!(
            "Variable-length list with {} elements failed verification: {}",
            self.element_count,
            message
        );
        AtlasError::Corruption(message)
    }
}

impl<B: Buffer> ByteArrayIndexedList for VariableLengthByteArrayIndexedList<B> {
    type Record = B;

    fn size(&self) -> usize {
        self.element_count
    }

    fn get(&self, i: usize) -> Result<B> {
        ensure!(
            i < self.element_count,
            "Index {} out of bounds for list of {} elements",
            i,
            self.element_count
        );

        let base = i as u64 * LONG_SIZE;
        let start = self.offsets.get_long_at(base)?;
        let end = self.offsets.get_long_at(base + LONG_SIZE)?;
        ensure!(
            0 <= start && start <= end,
            "Invalid offsets for element {}: [{}, {})",
            i,
            start,
            end
        );

        self.elements.slice(start as u64, (end - start) as u64)
    }
}
