/*!
Core traits for cryptographic operations.

This module defines the interfaces the envelope encryption is written
against: a record cipher and a session-key wrap.
*/

pub mod cipher;
pub mod key_wrap;

pub use cipher::{RecordNonce, RecordTag, SymmetricCipher};
pub use key_wrap::{KeyUnwrap, KeyWrap};
