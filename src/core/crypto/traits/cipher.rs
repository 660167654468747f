/*!
Traits for symmetric encryption and decryption.

Records keep their nonce, tag and ciphertext as separate fields, so the
cipher interface works with detached tags.
*/

use crate::core::{
    constants::sizes::chacha::{NONCE_SIZE, TAG_SIZE},
    crypto::config::SymmetricAlgorithm,
    error::Result,
};

/// Nonce accepted by every record cipher
pub type RecordNonce = [u8; NONCE_SIZE];

/// Detached authentication tag produced by every record cipher
pub type RecordTag = [u8; TAG_SIZE];

/// Trait for symmetric cipher operations
pub trait SymmetricCipher: Send + Sync {
    /// Encrypt `plaintext`, returning the ciphertext and its detached tag
    fn encrypt_detached(&self, nonce: &RecordNonce, plaintext: &[u8]) -> Result<(Vec<u8>, RecordTag)>;

    /// Verify `tag` and decrypt `ciphertext`
    ///
    /// Fails with `DecryptionFailed` if the tag does not verify; no
    /// plaintext is returned in that case.
    fn decrypt_detached(&self, nonce: &RecordNonce, ciphertext: &[u8], tag: &RecordTag) -> Result<Vec<u8>>;

    /// Get the algorithm being used
    fn algorithm(&self) -> SymmetricAlgorithm;
}
