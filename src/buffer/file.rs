//! File-backed Buffer
//!
//! Every read is a positioned read against the shared file handle at
//! `offset + index`. Nothing is cached; fixed-width values are decoded
//! through a small thread-local scratch region.

use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

use crate::error::{AtlasError, Result};

use super::{check_advance, check_position, check_range, check_slice, Buffer};

/// Large enough for the widest fixed-width value (`i64`)
const SCRATCH_SIZE: usize = 8;

thread_local! {
    /// Per-thread decode scratch, fully overwritten by every read before use
    static SCRATCH: RefCell<[u8; SCRATCH_SIZE]> = const { RefCell::new([0u8; SCRATCH_SIZE]) };
}

/// Big-endian [`Buffer`] reading straight from a file
#[derive(Debug)]
pub struct FileBuffer {
    /// Shared medium; slices clone the `Arc`, never the handle
    file: Arc<File>,
    /// Absolute start of this view within the file
    offset: u64,
    /// View length in bytes
    limit: u64,
    /// Cursor, relative to `offset`
    position: u64,
}

impl FileBuffer {
    /// Open `path` read-only and view the whole file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::new(file)
    }

    /// View the whole of an already-open file
    pub fn new(file: File) -> Result<Self> {
        Self::from_shared(Arc::new(file))
    }

    /// View the whole of a file shared with other owners.
    ///
    /// The limit is the file length at this moment; the file must not change
    /// for as long as any view over it is alive.
    pub fn from_shared(file: Arc<File>) -> Result<Self> {
        let limit = file.metadata()?.len();
        tracing::debug!("Opened file buffer over {} bytes", limit);

        Ok(Self {
            file,
            offset: 0,
            limit,
            position: 0,
        })
    }

    /// Absolute start of this view within the file
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// The underlying file handle
    pub fn file(&self) -> &Arc<File> {
        &self.file
    }

    /// Positioned read of exactly `dst.len()` bytes at absolute `address`
    fn read_absolute(&self, address: u64, dst: &mut [u8]) -> Result<()> {
        let len = dst.len();
        read_exact_at(&self.file, dst, address).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                tracing::warn!(
                    "Short read of {} bytes at offset {}: medium smaller than expected",
                    len,
                    address
                );
                AtlasError::ShortRead {
                    offset: address,
                    len,
                }
            } else {
                AtlasError::Io(e)
            }
        })
    }

    /// Read `N` bytes at view index `index` through the thread-local scratch
    fn read_fixed<const N: usize>(&self, index: u64) -> Result<[u8; N]> {
        check_range(index, N as u64, self.limit)?;
        let address = self.offset + index;

        SCRATCH.with(|cell| {
            let mut scratch = cell.borrow_mut();
            let dst = &mut scratch[..N];
            self.read_absolute(address, dst)?;

            let mut raw = [0u8; N];
            raw.copy_from_slice(dst);
            Ok(raw)
        })
    }
}

impl Buffer for FileBuffer {
    fn position(&self) -> u64 {
        self.position
    }

    fn set_position(&mut self, position: u64) -> Result<&mut Self> {
        check_position(position, self.limit)?;
        self.position = position;
        Ok(self)
    }

    fn advance(&mut self, bytes: u64) -> Result<&mut Self> {
        self.position = check_advance(self.position, bytes, self.limit)?;
        Ok(self)
    }

    fn limit(&self) -> u64 {
        self.limit
    }

    fn read_at(&self, index: u64, dst: &mut [u8]) -> Result<()> {
        check_range(index, dst.len() as u64, self.limit)?;
        if dst.is_empty() {
            return Ok(());
        }
        self.read_absolute(self.offset + index, dst)
    }

    fn get_at(&self, index: u64) -> Result<u8> {
        let [byte] = self.read_fixed::<1>(index)?;
        Ok(byte)
    }

    fn get_int_at(&self, index: u64) -> Result<i32> {
        Ok(i32::from_be_bytes(self.read_fixed::<4>(index)?))
    }

    fn get_long_at(&self, index: u64) -> Result<i64> {
        Ok(i64::from_be_bytes(self.read_fixed::<8>(index)?))
    }

    fn slice(&self, from: u64, size: u64) -> Result<Self> {
        check_slice(from, size, self.limit)?;

        Ok(Self {
            file: Arc::clone(&self.file),
            offset: self.offset + from,
            limit: size,
            position: 0,
        })
    }
}

// =============================================================================
// Positioned Reads
// =============================================================================

#[cfg(unix)]
fn read_exact_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<()> {
    use std::os::unix::fs::FileExt;
    file.read_exact_at(buf, offset)
}

#[cfg(windows)]
fn read_exact_at(file: &File, mut buf: &mut [u8], mut offset: u64) -> io::Result<()> {
    use std::os::windows::fs::FileExt;

    while !buf.is_empty() {
        match file.seek_read(buf, offset) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "failed to fill whole buffer",
                ))
            }
            Ok(n) => {
                buf = &mut std::mem::take(&mut buf)[n..];
                offset += n as u64;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
