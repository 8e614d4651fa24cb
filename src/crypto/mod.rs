//! Concrete crypto backends for the ESP context's cipher and MAC handles.
//!
//! The ESP context itself is generic over [`crate::core::CipherHandle`] and
//! [`crate::core::MacHandle`]; this module supplies the production
//! implementations that [`DefaultCryptoFactory`] hands out.

mod cipher;
mod factory;
mod mac;

pub use cipher::AesCbcCipher;
pub use factory::DefaultCryptoFactory;
pub use mac::{HmacSha1_96, HmacSha256_128, HmacSha384_192, HmacSha512_256};
