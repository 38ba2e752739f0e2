//! Indexed List Module
//!
//! Immutable, randomly-addressable sequences of byte records decoded from a
//! [`Buffer`]. Records come back as views over the same medium; nothing is
//! copied.
//!
//! ## Variable-Length Layout (big-endian)
//! ```text
//! ┌──────────────┬────────────────────────────────┬──────────────────────┐
//! │ Count: i32   │ Offsets: i64 × (count + 1)     │ Elements             │
//! │ (4)          │ [0, o1, o2, ..., len(elements)] │ record0 record1 ...  │
//! └──────────────┴────────────────────────────────┴──────────────────────┘
//!   record i = elements[offsets[i] .. offsets[i + 1]]
//! ```

mod variable;

use crate::buffer::Buffer;
use crate::error::Result;

pub use variable::VariableLengthByteArrayIndexedList;

/// Read-only, O(1)-indexable sequence of byte records
pub trait ByteArrayIndexedList {
    /// View type handed out for each record
    type Record: Buffer;

    /// Number of records
    fn size(&self) -> usize;

    /// Record `i` as a fresh view with its cursor at 0
    fn get(&self, i: usize) -> Result<Self::Record>;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Records in index order
    fn iter(&self) -> Records<'_, Self>
    where
        Self: Sized,
    {
        Records {
            list: self,
            next: 0,
        }
    }
}

/// Iterator over the records of a [`ByteArrayIndexedList`]
pub struct Records<'a, L> {
    list: &'a L,
    next: usize,
}

impl<'a, L: ByteArrayIndexedList> Iterator for Records<'a, L> {
    type Item = Result<L::Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.list.size() {
            return None;
        }

        let record = self.list.get(self.next);
        self.next += 1;
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.list.size().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl<'a, L: ByteArrayIndexedList> ExactSizeIterator for Records<'a, L> {}
