//! Error types for ESP context construction and algorithm dispatch.

use thiserror::Error;

/// Errors that can occur while constructing an [`crate::context::EspContext`].
///
/// Construction failure is total: no partially-initialized context is ever
/// returned to the caller. Each variant identifies which step failed so the
/// diagnostic log line can name algorithm-vs-key-vs-configuration as the
/// cause.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// The requested encryption algorithm has no backing implementation.
    #[error("unsupported encryption algorithm")]
    UnsupportedCipher,

    /// The cipher accepted the algorithm but rejected the key material
    /// (wrong length, typically).
    #[error("failed to install encryption key")]
    CipherKeyRejected,

    /// The requested integrity algorithm has no backing implementation.
    #[error("unsupported integrity algorithm")]
    UnsupportedMac,

    /// The MAC accepted the algorithm but rejected the key material.
    #[error("failed to install integrity key")]
    MacKeyRejected,

    /// `window_size` was zero or not a multiple of 8.
    #[error("window size {0} must be a positive multiple of 8")]
    InvalidWindowSize(u32),
}
