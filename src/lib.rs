/*!
# String Data Deque

Double-ended queues of data that render to a single string on demand.

## Overview

Elements are converted when they are inserted and formatted only when the
deque is rendered, so appending stays cheap and the joined string always
reflects the current contents and separator.

- `ConvertFormatDeque` for any element type with user-supplied conversion and formatting
- `StringDeque` for plain strings
- `CircularDeque` holding only the newest `capacity` strings
- `WormDeque` that can be appended to but never rewritten
- `EncryptedDeque` storing every value as an envelope-encrypted record

## Envelope Encryption

With the `encryption` feature (on by default) values put into an
`EncryptedDeque` are never stored in plaintext:

- CRYSTALS-Kyber wraps one random session key per deque
- ChaCha20-Poly1305 (or AES-256-GCM with the `aes-gcm` feature) seals each record
- Session keys live in `ZeroizeOnDrop` and are wiped when no longer needed
*/

// Core components
pub mod core;

// Re-export commonly used types for convenience
pub use self::core::constants::{DEFAULT_SEPARATOR, ENCRYPTION_AVAILABLE};
pub use self::core::deque::{
    CircularDeque, Conversion, ConvertFormatDeque, FnConversion, Input, StringDeque, Stringify, WormDeque,
};
pub use self::core::error::{CryptoError, Error, Result};
pub use self::core::memory::ZeroizeOnDrop;

// Re-export the encrypted deque and its key types
#[cfg(feature = "encryption")]
pub use self::core::crypto::{
    Base64Field, EncryptedRecord, EnvelopeConfig, KeyWrapAlgorithm, RecipientKeyPair, RecipientPublicKey,
    RecipientSecretKey, RecordField, SessionState, SymmetricAlgorithm,
};
#[cfg(feature = "encryption")]
pub use self::core::deque::{DECRYPTION_FAILED_MARKER, EncryptedDeque, RecordFormat};
