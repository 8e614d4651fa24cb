//! `ENCR_AES_CBC` cipher handle, backed by the `aes`/`cbc` crates.

use aes::{Aes128, Aes192, Aes256};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use zeroize::Zeroize;

use crate::core::{CipherAlgorithm, CipherHandle, ConstructionError, AES_BLOCK_SIZE};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type Aes192CbcEnc = cbc::Encryptor<Aes192>;
type Aes192CbcDec = cbc::Decryptor<Aes192>;
type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES-CBC key width, selected by the key length passed to `set_key`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KeyWidth {
    Aes128,
    Aes192,
    Aes256,
}

impl KeyWidth {
    fn from_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(KeyWidth::Aes128),
            24 => Some(KeyWidth::Aes192),
            32 => Some(KeyWidth::Aes256),
            _ => None,
        }
    }
}

/// `ENCR_AES_CBC` cipher handle. Keyed by `set_key`; the key width (128,
/// 192, or 256 bits) is determined by the key length.
pub struct AesCbcCipher {
    key: Vec<u8>,
    width: Option<KeyWidth>,
}

impl AesCbcCipher {
    /// Create an unkeyed handle. `set_key` must be called before use.
    pub fn new() -> Self {
        Self { key: Vec::new(), width: None }
    }
}

impl Default for AesCbcCipher {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AesCbcCipher {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl CipherHandle for AesCbcCipher {
    fn algorithm(&self) -> CipherAlgorithm {
        CipherAlgorithm::EncrAesCbc
    }

    fn set_key(&mut self, key: &[u8]) -> bool {
        match KeyWidth::from_len(key.len()) {
            Some(width) => {
                self.key.zeroize();
                self.key = key.to_vec();
                self.width = Some(width);
                true
            }
            None => false,
        }
    }

    fn encrypt(&self, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, ConstructionError> {
        let width = self.width.ok_or(ConstructionError::CipherKeyRejected)?;
        if iv.len() != AES_BLOCK_SIZE {
            return Err(ConstructionError::CipherKeyRejected);
        }
        let ct = match width {
            KeyWidth::Aes128 => Aes128CbcEnc::new_from_slices(&self.key, iv)
                .map_err(|_| ConstructionError::CipherKeyRejected)?
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
            KeyWidth::Aes192 => Aes192CbcEnc::new_from_slices(&self.key, iv)
                .map_err(|_| ConstructionError::CipherKeyRejected)?
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
            KeyWidth::Aes256 => Aes256CbcEnc::new_from_slices(&self.key, iv)
                .map_err(|_| ConstructionError::CipherKeyRejected)?
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        };
        Ok(ct)
    }

    fn decrypt(&self, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, ConstructionError> {
        let width = self.width.ok_or(ConstructionError::CipherKeyRejected)?;
        if iv.len() != AES_BLOCK_SIZE {
            return Err(ConstructionError::CipherKeyRejected);
        }
        let result = match width {
            KeyWidth::Aes128 => Aes128CbcDec::new_from_slices(&self.key, iv)
                .map_err(|_| ConstructionError::CipherKeyRejected)?
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
            KeyWidth::Aes192 => Aes192CbcDec::new_from_slices(&self.key, iv)
                .map_err(|_| ConstructionError::CipherKeyRejected)?
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
            KeyWidth::Aes256 => Aes256CbcDec::new_from_slices(&self.key, iv)
                .map_err(|_| ConstructionError::CipherKeyRejected)?
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        };
        result.map_err(|_| ConstructionError::CipherKeyRejected)
    }

    fn block_size(&self) -> usize {
        AES_BLOCK_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_key_length() {
        let mut cipher = AesCbcCipher::new();
        assert!(!cipher.set_key(&[0u8; 10]));
    }

    #[test]
    fn encrypt_decrypt_roundtrip_aes128() {
        let mut cipher = AesCbcCipher::new();
        assert!(cipher.set_key(&[0x42u8; 16]));
        let iv = [0x01u8; AES_BLOCK_SIZE];
        let plaintext = b"anti-replay window state";

        let ciphertext = cipher.encrypt(&iv, plaintext).unwrap();
        let decrypted = cipher.decrypt(&iv, &ciphertext).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn encrypt_decrypt_roundtrip_aes256() {
        let mut cipher = AesCbcCipher::new();
        assert!(cipher.set_key(&[0x07u8; 32]));
        let iv = [0x02u8; AES_BLOCK_SIZE];
        let plaintext = b"ESP context";

        let ciphertext = cipher.encrypt(&iv, plaintext).unwrap();
        let decrypted = cipher.decrypt(&iv, &ciphertext).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn encrypt_without_key_fails() {
        let cipher = AesCbcCipher::new();
        let iv = [0u8; AES_BLOCK_SIZE];
        assert!(cipher.encrypt(&iv, b"x").is_err());
    }

    /// NIST SP 800-38A, F.2.1 (CBC-AES128.Encrypt), first block. PKCS7
    /// padding appends a full block of 0x10 bytes after an already
    /// block-aligned plaintext, so only the leading 16 ciphertext bytes are
    /// comparable to the published vector.
    #[test]
    fn matches_nist_sp800_38a_first_block() {
        let key = hex::decode("2b7e151628aed2a6abf7158809cf4f3c").unwrap();
        let iv = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let plaintext = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();
        let expected_first_block = hex::decode("7649abac8119b246cee98e9b12e9197d").unwrap();

        let mut cipher = AesCbcCipher::new();
        assert!(cipher.set_key(&key));
        let ciphertext = cipher.encrypt(&iv, &plaintext).unwrap();
        assert_eq!(&ciphertext[..AES_BLOCK_SIZE], expected_first_block.as_slice());
    }
}
