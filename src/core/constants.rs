//! Protocol constants for the ESP anti-replay context.
//!
//! These values are fixed by RFC 4303 and the IKEv2 transform registries.

/// Default anti-replay window size, in bits. RFC 4303 requires at least 32;
/// strongSwan and most implementations default to 128.
pub const DEFAULT_WINDOW_SIZE: u32 = 128;

/// AES block size in bytes, used for CBC IV sizing.
pub const AES_BLOCK_SIZE: usize = 16;

/// HMAC-SHA1-96 truncated tag length in bytes (96 bits).
pub const HMAC_SHA1_96_TAG_LEN: usize = 12;

/// HMAC-SHA2-256-128 truncated tag length in bytes (128 bits).
pub const HMAC_SHA2_256_128_TAG_LEN: usize = 16;

/// HMAC-SHA2-384-192 truncated tag length in bytes (192 bits).
pub const HMAC_SHA2_384_192_TAG_LEN: usize = 24;

/// HMAC-SHA2-512-256 truncated tag length in bytes (256 bits).
pub const HMAC_SHA2_512_256_TAG_LEN: usize = 32;
