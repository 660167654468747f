/*!
Traits for protecting the session key under a recipient key.
*/

use crate::core::{
    constants::sizes::SESSION_KEY_SIZE,
    crypto::config::KeyWrapAlgorithm,
    error::Result,
    memory::ZeroizeOnDrop,
};

/// Wraps a session key so only the matching secret key can recover it
pub trait KeyWrap {
    /// Produce the wrapped form of `session_key`
    fn wrap_key(&self, session_key: &[u8; SESSION_KEY_SIZE]) -> Result<Vec<u8>>;

    /// Get the algorithm being used
    fn algorithm(&self) -> KeyWrapAlgorithm;
}

/// Recovers a session key from its wrapped form
pub trait KeyUnwrap {
    /// Recover the session key
    ///
    /// Fails with `DecryptionFailed` when `wrapped` is malformed or was
    /// produced for a different key pair.
    fn unwrap_key(&self, wrapped: &[u8]) -> Result<ZeroizeOnDrop<[u8; SESSION_KEY_SIZE]>>;

    /// Get the algorithm being used
    fn algorithm(&self) -> KeyWrapAlgorithm;
}
