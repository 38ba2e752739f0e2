//! Configuration for atlasbuf
//!
//! Controls how much checking happens when a structure is decoded.

use std::str::FromStr;

use crate::error::AtlasError;

/// Decode-time configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Decode Configuration
    // -------------------------------------------------------------------------
    /// How offset tables are checked when a list is decoded
    pub verification: Verification,
}

/// Offset table checking mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verification {
    /// Trust the encoded offsets (hot path, no extra reads)
    #[default]
    Trusted,

    /// Read the whole offset table once and reject malformed layouts
    Full,
}

impl FromStr for Verification {
    type Err = AtlasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trusted" => Ok(Verification::Trusted),
            "full" => Ok(Verification::Full),
            other => Err(AtlasError::Config(format!(
                "Unknown verification mode: {} (expected trusted or full)",
                other
            ))),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the verification mode
    pub fn verification(mut self, mode: Verification) -> Self {
        self.config.verification = mode;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
