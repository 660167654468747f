/*!
Cryptographic components for the envelope-encrypted deque.

This module provides the session-key wrap, the record ciphers, the record
type and the sealer that ties them together.
*/

// Algorithm selection
pub mod config;

// Interfaces
pub mod traits;

// Kyber key wrap and AEAD record ciphers
pub mod algorithms;

// Canonical Base64 fields
pub mod encoding;

// Encrypted record
pub mod record;

// Session-key lifecycle and sealing
pub mod envelope;

pub use algorithms::{RecipientKeyPair, RecipientPublicKey, RecipientSecretKey};
pub use config::{EnvelopeConfig, KeyWrapAlgorithm, SymmetricAlgorithm};
pub use encoding::Base64Field;
pub use envelope::{EnvelopeSealer, SessionState, open_record, open_record_any};
pub use record::{EncryptedRecord, EncryptedRecordBuilder, RecordField};
pub use traits::{KeyUnwrap, KeyWrap, SymmetricCipher};
