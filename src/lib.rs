//! # ESP Context
//!
//! The per-SA cryptographic context for the IPsec ESP (Encapsulating
//! Security Payload) transform, RFC 4303.
//!
//! An [`EspContext`] is bound to a single direction (inbound or outbound) of
//! a single Security Association at construction time. It owns a keyed
//! cipher handle and a keyed MAC handle (both opaque — this crate never
//! invokes them, only retains them for the caller's packet data path), and
//! — for inbound contexts — the sequence-number high-water mark and
//! anti-replay sliding window that defend against packet replay.
//!
//! ## Scope
//!
//! This crate does not parse ESP headers, encrypt or decrypt packets,
//! negotiate keys, or manage SA lifecycle (rekey scheduling, expiry). It
//! provides only the seqno-and-window primitive an ESP send/receive path
//! uses around each packet. Extended Sequence Numbers (64-bit, ESN) are out
//! of scope.
//!
//! ## Example
//!
//! ```
//! use esp_context::{CipherAlgorithm, DefaultCryptoFactory, EspContext, MacAlgorithm};
//!
//! let factory = DefaultCryptoFactory::new();
//!
//! let mut outbound = EspContext::create(
//!     &factory,
//!     CipherAlgorithm::EncrAesCbc,
//!     &[0x11; 16],
//!     MacAlgorithm::AuthHmacSha2_256_128,
//!     b"32-byte-or-longer integrity key!",
//!     false,
//! )
//! .expect("supported algorithms with valid keys always construct");
//!
//! assert_eq!(outbound.next_seqno(), Some(1));
//! assert_eq!(outbound.next_seqno(), Some(2));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod context;
pub mod core;
pub mod crypto;

pub use context::EspContext;
pub use core::{CipherAlgorithm, CipherHandle, ConstructionError, CryptoFactory, MacAlgorithm, MacHandle};
pub use crypto::DefaultCryptoFactory;

/// Convenient re-export of the crate's public surface.
pub mod prelude {
    pub use crate::context::EspContext;
    pub use crate::core::*;
    pub use crate::crypto::*;
}
