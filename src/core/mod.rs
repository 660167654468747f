//! Core components of the string data deques.
//!
//! This module contains the deque containers, the envelope encryption they
//! use, key-material hygiene and error handling.

// Deque containers
pub mod deque;

// Envelope encryption
#[cfg(feature = "encryption")]
pub mod crypto;

// Memory handling for key material
pub mod memory;

// Sizes and defaults
pub mod constants;

// Error handling
pub mod error;

// Re-exports for convenience
pub use self::error::{CryptoError, Error, Result};
