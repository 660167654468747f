/*!
Symmetric encryption algorithm implementations.
*/

mod chacha20poly1305;
#[cfg(feature = "aes-gcm")]
mod aes_gcm;

use crate::core::{
    constants::sizes::SESSION_KEY_SIZE,
    crypto::{config::SymmetricAlgorithm, traits::cipher::SymmetricCipher},
    error::Result,
};

pub use self::chacha20poly1305::ChaCha20Poly1305Cipher;
#[cfg(feature = "aes-gcm")]
pub use self::aes_gcm::Aes256GcmCipher;

/// Create a cipher for the specified algorithm
pub fn create_cipher(key: &[u8; SESSION_KEY_SIZE], algorithm: SymmetricAlgorithm) -> Result<Box<dyn SymmetricCipher>> {
    match algorithm {
        SymmetricAlgorithm::ChaCha20Poly1305 => Ok(Box::new(ChaCha20Poly1305Cipher::new(key))),
        SymmetricAlgorithm::Aes256Gcm => {
            #[cfg(feature = "aes-gcm")]
            {
                Ok(Box::new(Aes256GcmCipher::new(key)))
            }
            #[cfg(not(feature = "aes-gcm"))]
            {
                Err(crate::core::error::Error::UnsupportedAlgorithm(
                    "AES-256-GCM is not available, enable the 'aes-gcm' feature".into(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(algorithm: SymmetricAlgorithm) -> Result<()> {
        let cipher = create_cipher(&[7u8; SESSION_KEY_SIZE], algorithm)?;
        assert_eq!(cipher.algorithm(), algorithm);

        let nonce = [1u8; 12];
        let (ciphertext, tag) = cipher.encrypt_detached(&nonce, b"record body")?;
        assert_eq!(ciphertext.len(), b"record body".len());
        assert_ne!(ciphertext.as_slice(), b"record body");

        let plaintext = cipher.decrypt_detached(&nonce, &ciphertext, &tag)?;
        assert_eq!(plaintext, b"record body");

        let mut bad_tag = tag;
        bad_tag[0] ^= 0x01;
        let err = cipher.decrypt_detached(&nonce, &ciphertext, &bad_tag).unwrap_err();
        assert!(err.is_decryption_failure());
        Ok(())
    }

    #[test]
    fn test_chacha_round_trip() -> Result<()> {
        round_trip(SymmetricAlgorithm::ChaCha20Poly1305)
    }

    #[cfg(feature = "aes-gcm")]
    #[test]
    fn test_aes_round_trip() -> Result<()> {
        round_trip(SymmetricAlgorithm::Aes256Gcm)
    }

    #[cfg(not(feature = "aes-gcm"))]
    #[test]
    fn test_aes_unavailable() {
        let result = create_cipher(&[0u8; SESSION_KEY_SIZE], SymmetricAlgorithm::Aes256Gcm);
        assert!(matches!(result, Err(crate::core::error::Error::UnsupportedAlgorithm(_))));
    }
}
