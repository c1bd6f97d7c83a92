//! Decode limits
//!
//! The cache format trusts its own length and nesting fields. These limits
//! bound what the decoder will do on behalf of an untrusted stream before it
//! gives up with a decode error.

use thiserror::Error;

/// Limits applied during a decode pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum KV map nesting depth (default: 128)
    pub max_depth: usize,

    /// Maximum length-delimited payload size in bytes (default: 64MB)
    pub max_payload_bytes: u32,

    /// Maximum number of string table entries (default: 16M)
    pub max_string_table_len: u32,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        DecodeLimits {
            max_depth: 128,
            max_payload_bytes: 64 * 1024 * 1024, // 64MB
            max_string_table_len: 16 * 1024 * 1024,
        }
    }
}

impl DecodeLimits {
    /// Create limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create limits with small values for testing
    pub fn for_testing() -> Self {
        DecodeLimits {
            max_depth: 8,
            max_payload_bytes: 64 * 1024,
            max_string_table_len: 1024,
        }
    }

    /// Set maximum nesting depth (builder pattern)
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set maximum payload size (builder pattern)
    pub fn with_max_payload_bytes(mut self, bytes: u32) -> Self {
        self.max_payload_bytes = bytes;
        self
    }

    /// Set maximum string table length (builder pattern)
    pub fn with_max_string_table_len(mut self, len: u32) -> Self {
        self.max_string_table_len = len;
        self
    }

    /// Validate limits
    pub fn validate(&self) -> Result<(), LimitsError> {
        if self.max_depth == 0 {
            return Err(LimitsError::ZeroDepth);
        }
        if self.max_payload_bytes == 0 {
            return Err(LimitsError::ZeroPayload);
        }
        Ok(())
    }
}

/// Invalid limit configurations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitsError {
    /// The root map itself needs one level of depth
    #[error("Maximum depth must be at least 1")]
    ZeroDepth,

    /// No payload could ever be decoded
    #[error("Maximum payload size must be at least 1 byte")]
    ZeroPayload,
}
