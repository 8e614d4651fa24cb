//! The production [`CryptoFactory`] implementation.

use crate::core::{CipherAlgorithm, CipherHandle, CryptoFactory, MacAlgorithm, MacHandle};

use super::cipher::AesCbcCipher;
use super::mac::{HmacSha1_96, HmacSha256_128, HmacSha384_192, HmacSha512_256};

/// Resolves algorithm identifiers to the RustCrypto-backed handles in this
/// crate. `key_len` is accepted but otherwise unused for cipher creation
/// (AES-CBC self-selects its key width from the bytes passed to
/// `set_key`); it exists because the external interface in spec.md §6
/// passes it to `create_cipher`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCryptoFactory;

impl DefaultCryptoFactory {
    /// Create a new default factory.
    pub fn new() -> Self {
        Self
    }
}

impl CryptoFactory for DefaultCryptoFactory {
    fn create_cipher(&self, alg: CipherAlgorithm, _key_len: usize) -> Option<Box<dyn CipherHandle>> {
        match alg {
            CipherAlgorithm::EncrAesCbc => Some(Box::new(AesCbcCipher::new())),
        }
    }

    fn create_mac(&self, alg: MacAlgorithm) -> Option<Box<dyn MacHandle>> {
        match alg {
            MacAlgorithm::AuthHmacSha1_96 => Some(Box::new(HmacSha1_96::new())),
            MacAlgorithm::AuthHmacSha2_256_128 => Some(Box::new(HmacSha256_128::new())),
            MacAlgorithm::AuthHmacSha2_384_192 => Some(Box::new(HmacSha384_192::new())),
            MacAlgorithm::AuthHmacSha2_512_256 => Some(Box::new(HmacSha512_256::new())),
        }
    }
}
