//! Error types for atlasbuf
//!
//! Two kinds of failure matter to callers: precondition violations (the
//! caller or an upstream builder broke the contract) and medium failures
//! (the bytes could not be read back as requested).

use thiserror::Error;

/// Result type alias using AtlasError
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Unified error type for buffer and list operations
#[derive(Debug, Error)]
pub enum AtlasError {
    // -------------------------------------------------------------------------
    // Contract Errors
    // -------------------------------------------------------------------------
    #[error("Precondition violated: {0}")]
    Precondition(String),

    // -------------------------------------------------------------------------
    // Medium Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Short read: medium ended before {len} bytes at offset {offset}")]
    ShortRead { offset: u64, len: usize },

    // -------------------------------------------------------------------------
    // Verification Errors
    // -------------------------------------------------------------------------
    #[error("Corrupted structure: {0}")]
    Corruption(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AtlasError {
    /// True for caller errors: out-of-range arguments or negative decoded values
    pub fn is_precondition(&self) -> bool {
        matches!(self, AtlasError::Precondition(_))
    }

    /// True when the medium itself failed (short read or other I/O error)
    pub fn is_io(&self) -> bool {
        matches!(self, AtlasError::Io(_) | AtlasError::ShortRead { .. })
    }
}

/// Fail with a precondition violation unless `cond` holds.
macro_rules! ensure {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::error::AtlasError::Precondition(format!($($arg)+)));
        }
    };
}

pub(crate) use ensure;
