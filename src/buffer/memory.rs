//! In-memory Buffer
//!
//! Views over a refcounted region (`bytes::Bytes`). Slicing narrows the
//! `Bytes` handle without copying; reads index the region directly.

use std::fmt;
use std::fs::File;

use bytes::Bytes;
use memmap2::Mmap;

use crate::error::Result;

use super::{check_advance, check_position, check_range, check_slice, Buffer};

/// Big-endian [`Buffer`] over a memory region
pub struct MemoryBuffer {
    /// Exactly the bytes of this view
    data: Bytes,
    /// Start of this view within the root region
    offset: u64,
    /// Cursor, relative to the start of `data`
    position: u64,
}

impl MemoryBuffer {
    /// View an owned or shared region
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            offset: 0,
            position: 0,
        }
    }

    /// View a static region
    pub fn from_static(data: &'static [u8]) -> Self {
        Self::new(Bytes::from_static(data))
    }

    /// Map `file` read-only and view the whole mapping.
    ///
    /// The file must not be modified or truncated while any view over the
    /// mapping is alive.
    pub fn map_file(file: &File) -> Result<Self> {
        // SAFETY: callers hand us immutable segment files; the mapping is
        // read-only and owned by the returned `Bytes`.
        let mmap = unsafe { Mmap::map(file) }?;
        tracing::debug!("Mapped {} bytes into memory buffer", mmap.len());
        Ok(Self::new(Bytes::from_owner(mmap)))
    }

    /// Start of this view within the root region
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Borrow the bytes of this view
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Hand out the underlying region without copying
    pub fn into_bytes(self) -> Bytes {
        self.data
    }

    fn fixed<const N: usize>(&self, index: u64) -> Result<[u8; N]> {
        check_range(index, N as u64, self.limit())?;
        let start = index as usize;
        let mut raw = [0u8; N];
        raw.copy_from_slice(&self.data[start..start + N]);
        Ok(raw)
    }
}

impl Buffer for MemoryBuffer {
    fn position(&self) -> u64 {
        self.position
    }

    fn set_position(&mut self, position: u64) -> Result<&mut Self> {
        check_position(position, self.limit())?;
        self.position = position;
        Ok(self)
    }

    fn advance(&mut self, bytes: u64) -> Result<&mut Self> {
        self.position = check_advance(self.position, bytes, self.limit())?;
        Ok(self)
    }

    fn limit(&self) -> u64 {
        self.data.len() as u64
    }

    fn read_at(&self, index: u64, dst: &mut [u8]) -> Result<()> {
        check_range(index, dst.len() as u64, self.limit())?;
        let start = index as usize;
        dst.copy_from_slice(&self.data[start..start + dst.len()]);
        Ok(())
    }

    fn get_at(&self, index: u64) -> Result<u8> {
        check_range(index, 1, self.limit())?;
        Ok(self.data[index as usize])
    }

    fn get_int_at(&self, index: u64) -> Result<i32> {
        Ok(i32::from_be_bytes(self.fixed::<4>(index)?))
    }

    fn get_long_at(&self, index: u64) -> Result<i64> {
        Ok(i64::from_be_bytes(self.fixed::<8>(index)?))
    }

    fn slice(&self, from: u64, size: u64) -> Result<Self> {
        check_slice(from, size, self.limit())?;
        let start = from as usize;

        Ok(Self {
            data: self.data.slice(start..start + size as usize),
            offset: self.offset + from,
            position: 0,
        })
    }
}

// Never print the region itself: a mapped segment can be gigabytes
impl fmt::Debug for MemoryBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBuffer")
            .field("offset", &self.offset)
            .field("limit", &self.limit())
            .field("position", &self.position)
            .finish()
    }
}

impl From<Bytes> for MemoryBuffer {
    fn from(data: Bytes) -> Self {
        Self::new(data)
    }
}

impl From<Vec<u8>> for MemoryBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}
