/*!
Implementations of cryptographic algorithms.

This module provides concrete implementations of the
cryptographic algorithm interfaces.
*/

// Session-key wrapping
pub mod kem;

// Record ciphers
pub mod symmetric;

pub use kem::{RecipientKeyPair, RecipientPublicKey, RecipientSecretKey};
pub use symmetric::create_cipher;
