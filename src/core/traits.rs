//! Algorithm identifiers and the external crypto collaborator interfaces.
//!
//! [`CipherHandle`] and [`MacHandle`] are opaque, keyed primitives: the ESP
//! context retains them only so a caller on the packet data path can invoke
//! them. The context itself never calls `encrypt`/`decrypt`/`sign`/`verify`.

use crate::core::error::ConstructionError;

/// IKEv2 Encryption Transform identifiers this crate recognizes.
///
/// Wire values per the IANA "Transform Type 1 - Encryption Algorithm
/// Transform IDs" registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CipherAlgorithm {
    /// `ENCR_AES_CBC` (IKEv2 transform ID 12).
    EncrAesCbc,
}

impl TryFrom<u16> for CipherAlgorithm {
    type Error = ConstructionError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            12 => Ok(CipherAlgorithm::EncrAesCbc),
            _ => Err(ConstructionError::UnsupportedCipher),
        }
    }
}

/// IKEv2 Integrity Transform identifiers this crate recognizes.
///
/// Wire values per the IANA "Transform Type 3 - Integrity Algorithm
/// Transform IDs" registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum MacAlgorithm {
    /// `AUTH_HMAC_SHA1_96` (IKEv2 transform ID 2).
    AuthHmacSha1_96,
    /// `AUTH_HMAC_SHA2_256_128` (IKEv2 transform ID 12).
    AuthHmacSha2_256_128,
    /// `AUTH_HMAC_SHA2_384_192` (IKEv2 transform ID 13).
    AuthHmacSha2_384_192,
    /// `AUTH_HMAC_SHA2_512_256` (IKEv2 transform ID 14).
    AuthHmacSha2_512_256,
}

impl TryFrom<u16> for MacAlgorithm {
    type Error = ConstructionError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(MacAlgorithm::AuthHmacSha1_96),
            12 => Ok(MacAlgorithm::AuthHmacSha2_256_128),
            13 => Ok(MacAlgorithm::AuthHmacSha2_384_192),
            14 => Ok(MacAlgorithm::AuthHmacSha2_512_256),
            _ => Err(ConstructionError::UnsupportedMac),
        }
    }
}

/// A keyed symmetric cipher, opaque to the ESP context that owns it.
///
/// The context never calls these methods; they exist for the caller that
/// retrieves the handle via `get_cipher()` to drive the packet data path.
pub trait CipherHandle: Send {
    /// The algorithm this handle was constructed for.
    fn algorithm(&self) -> CipherAlgorithm;

    /// Install (or re-install) the key. Returns `false` on a malformed key.
    fn set_key(&mut self, key: &[u8]) -> bool;

    /// Encrypt `plaintext` in place under `iv`, returning the ciphertext.
    ///
    /// `iv` must be [`CipherHandle::block_size`] bytes.
    fn encrypt(&self, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, ConstructionError>;

    /// Decrypt `ciphertext` under `iv`, returning the plaintext.
    fn decrypt(&self, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, ConstructionError>;

    /// Block size in bytes (also the required IV length for CBC mode).
    fn block_size(&self) -> usize;
}

/// A keyed MAC, opaque to the ESP context that owns it.
pub trait MacHandle: Send {
    /// The algorithm this handle was constructed for.
    fn algorithm(&self) -> MacAlgorithm;

    /// Install (or re-install) the key. Returns `false` on a malformed key.
    fn set_key(&mut self, key: &[u8]) -> bool;

    /// Compute the (possibly truncated) authentication tag over `data`.
    fn sign(&self, data: &[u8]) -> Vec<u8>;

    /// Verify `tag` against the authentication tag computed over `data`.
    fn verify(&self, data: &[u8], tag: &[u8]) -> bool;

    /// Length, in bytes, of the tag this MAC produces.
    fn tag_len(&self) -> usize;
}

/// Resolves algorithm identifiers to keyed handle instances.
///
/// This is the "crypto factory" external collaborator from the ESP context's
/// perspective: construction never reaches into a concrete cipher or MAC
/// type directly, only through this trait, so tests can supply a stub
/// factory to exercise construction-failure paths.
pub trait CryptoFactory {
    /// Construct an unkeyed cipher handle for `alg`, or `None` if
    /// unsupported. `key_len` disambiguates AES-128/192/256.
    fn create_cipher(&self, alg: CipherAlgorithm, key_len: usize) -> Option<Box<dyn CipherHandle>>;

    /// Construct an unkeyed MAC handle for `alg`, or `None` if unsupported.
    fn create_mac(&self, alg: MacAlgorithm) -> Option<Box<dyn MacHandle>>;
}
