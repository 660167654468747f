/*!
AES-256-GCM symmetric encryption implementation.
*/

use aes_gcm::{
    Aes256Gcm, Key as AesKey, Nonce, Tag,
    aead::{AeadInPlace, KeyInit},
};

use crate::core::{
    constants::sizes::aes,
    crypto::{
        config::SymmetricAlgorithm,
        traits::cipher::{RecordNonce, RecordTag, SymmetricCipher},
    },
    error::{CryptoError, Result},
};

/// AES-256-GCM cipher implementation
pub struct Aes256GcmCipher {
    cipher: Aes256Gcm,
}

impl Aes256GcmCipher {
    /// Create a new AES-256-GCM cipher
    pub fn new(key: &[u8; aes::KEY_SIZE]) -> Self {
        Self {
            cipher: Aes256Gcm::new(AesKey::<Aes256Gcm>::from_slice(key)),
        }
    }
}

impl SymmetricCipher for Aes256GcmCipher {
    fn encrypt_detached(&self, nonce: &RecordNonce, plaintext: &[u8]) -> Result<(Vec<u8>, RecordTag)> {
        let mut buffer = plaintext.to_vec();
        let tag = self
            .cipher
            .encrypt_in_place_detached(Nonce::from_slice(nonce), b"", &mut buffer)
            .map_err(|_e| CryptoError::EncryptionFailed)?;

        let mut detached = [0u8; aes::TAG_SIZE];
        detached.copy_from_slice(&tag);
        Ok((buffer, detached))
    }

    fn decrypt_detached(&self, nonce: &RecordNonce, ciphertext: &[u8], tag: &RecordTag) -> Result<Vec<u8>> {
        let mut buffer = ciphertext.to_vec();
        self.cipher
            .decrypt_in_place_detached(Nonce::from_slice(nonce), b"", &mut buffer, Tag::from_slice(tag))
            .map_err(|_e| CryptoError::DecryptionFailed)?;
        Ok(buffer)
    }

    fn algorithm(&self) -> SymmetricAlgorithm {
        SymmetricAlgorithm::Aes256Gcm
    }
}
