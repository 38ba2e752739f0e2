//! # atlasbuf
//!
//! Zero-copy binary access for immutable, read-only data structures:
//! - Bounds-checked, big-endian `Buffer` views with a cursor and absolute reads
//! - File-backed views (positioned reads) and memory-backed views (`Bytes`/mmap)
//! - Offset-table lists of variable-length byte records with O(1) access
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │          Sorted indexes / postings / row stores              │
//! │                 (built on top of this crate)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │          VariableLengthByteArrayIndexedList                  │
//! │        (count │ offset table │ elements blob)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ slice / get_long_at
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ FileBuffer  │          │MemoryBuffer │
//!   │  (pread)    │          │(Bytes/mmap) │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod buffer;
pub mod list;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{AtlasError, Result};
pub use config::{Config, Verification};
pub use buffer::{Buffer, FileBuffer, MemoryBuffer};
pub use list::{ByteArrayIndexedList, VariableLengthByteArrayIndexedList};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of atlasbuf
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
