//! `AUTH_HMAC_*` MAC handles, backed by the `hmac`/`sha1`/`sha2` crates.
//!
//! Each handle truncates the underlying HMAC tag to the width named by its
//! IKEv2 transform (RFC 4868's truncation rule).

use hmac::{Hmac, Mac as HmacMac};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};
use zeroize::Zeroize;

use crate::core::{
    MacAlgorithm, MacHandle, HMAC_SHA1_96_TAG_LEN, HMAC_SHA2_256_128_TAG_LEN,
    HMAC_SHA2_384_192_TAG_LEN, HMAC_SHA2_512_256_TAG_LEN,
};

/// Constant-time byte comparison, to avoid leaking tag-mismatch position.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

macro_rules! hmac_handle {
    ($name:ident, $digest:ty, $algorithm:expr, $tag_len:expr, $doc:literal) => {
        #[doc = $doc]
        pub struct $name {
            key: Vec<u8>,
            keyed: bool,
        }

        impl $name {
            /// Create an unkeyed handle. `set_key` must be called before use.
            pub fn new() -> Self {
                Self { key: Vec::new(), keyed: false }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Drop for $name {
            fn drop(&mut self) {
                self.key.zeroize();
            }
        }

        impl MacHandle for $name {
            fn algorithm(&self) -> MacAlgorithm {
                $algorithm
            }

            fn set_key(&mut self, key: &[u8]) -> bool {
                if key.is_empty() {
                    return false;
                }
                self.key.zeroize();
                self.key = key.to_vec();
                self.keyed = true;
                true
            }

            fn sign(&self, data: &[u8]) -> Vec<u8> {
                let mut mac = Hmac::<$digest>::new_from_slice(&self.key)
                    .expect("HMAC accepts keys of any length");
                mac.update(data);
                mac.finalize().into_bytes()[..$tag_len].to_vec()
            }

            fn verify(&self, data: &[u8], tag: &[u8]) -> bool {
                self.keyed && constant_time_eq(&self.sign(data), tag)
            }

            fn tag_len(&self) -> usize {
                $tag_len
            }
        }
    };
}

hmac_handle!(
    HmacSha1_96,
    Sha1,
    MacAlgorithm::AuthHmacSha1_96,
    HMAC_SHA1_96_TAG_LEN,
    "`AUTH_HMAC_SHA1_96` MAC handle."
);
hmac_handle!(
    HmacSha256_128,
    Sha256,
    MacAlgorithm::AuthHmacSha2_256_128,
    HMAC_SHA2_256_128_TAG_LEN,
    "`AUTH_HMAC_SHA2_256_128` MAC handle."
);
hmac_handle!(
    HmacSha384_192,
    Sha384,
    MacAlgorithm::AuthHmacSha2_384_192,
    HMAC_SHA2_384_192_TAG_LEN,
    "`AUTH_HMAC_SHA2_384_192` MAC handle."
);
hmac_handle!(
    HmacSha512_256,
    Sha512,
    MacAlgorithm::AuthHmacSha2_512_256,
    HMAC_SHA2_512_256_TAG_LEN,
    "`AUTH_HMAC_SHA2_512_256` MAC handle."
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha1_96_tag_is_truncated() {
        let mut mac = HmacSha1_96::new();
        assert!(mac.set_key(b"test key"));
        let tag = mac.sign(b"message");
        assert_eq!(tag.len(), HMAC_SHA1_96_TAG_LEN);
    }

    #[test]
    fn sha2_512_256_tag_is_truncated() {
        let mut mac = HmacSha512_256::new();
        assert!(mac.set_key(b"test key"));
        let tag = mac.sign(b"message");
        assert_eq!(tag.len(), HMAC_SHA2_512_256_TAG_LEN);
    }

    #[test]
    fn verify_accepts_matching_tag_and_rejects_tampered() {
        let mut mac = HmacSha256_128::new();
        assert!(mac.set_key(b"test key"));
        let tag = mac.sign(b"message");
        assert!(mac.verify(b"message", &tag));

        let mut tampered = tag.clone();
        tampered[0] ^= 0xFF;
        assert!(!mac.verify(b"message", &tampered));
        assert!(!mac.verify(b"different message", &tag));
    }

    #[test]
    fn rejects_empty_key() {
        let mut mac = HmacSha1_96::new();
        assert!(!mac.set_key(b""));
    }

    #[test]
    fn unkeyed_verify_always_rejects() {
        let mac = HmacSha1_96::new();
        assert!(!mac.verify(b"message", &[0u8; HMAC_SHA1_96_TAG_LEN]));
    }
}
