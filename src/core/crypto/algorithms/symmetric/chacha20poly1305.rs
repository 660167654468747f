/*!
ChaCha20-Poly1305 symmetric encryption implementation.
*/

use chacha20poly1305::{
    ChaCha20Poly1305, Key as ChaChaKey, Nonce, Tag,
    aead::{AeadInPlace, KeyInit},
};

use crate::core::{
    constants::sizes::chacha,
    crypto::{
        config::SymmetricAlgorithm,
        traits::cipher::{RecordNonce, RecordTag, SymmetricCipher},
    },
    error::{CryptoError, Result},
};

/// ChaCha20-Poly1305 cipher implementation
pub struct ChaCha20Poly1305Cipher {
    cipher: ChaCha20Poly1305,
}

impl ChaCha20Poly1305Cipher {
    /// Create a new ChaCha20-Poly1305 cipher
    pub fn new(key: &[u8; chacha::KEY_SIZE]) -> Self {
        Self {
            cipher: ChaCha20Poly1305::new(ChaChaKey::from_slice(key)),
        }
    }
}

impl SymmetricCipher for ChaCha20Poly1305Cipher {
    fn encrypt_detached(&self, nonce: &RecordNonce, plaintext: &[u8]) -> Result<(Vec<u8>, RecordTag)> {
        let mut buffer = plaintext.to_vec();
        let tag = self
            .cipher
            .encrypt_in_place_detached(Nonce::from_slice(nonce), b"", &mut buffer)
            .map_err(|_e| CryptoError::EncryptionFailed)?;

        let mut detached = [0u8; chacha::TAG_SIZE];
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
        SymmetricAlgorithm::ChaCha20Poly1305
    }
}
