/*!
Algorithm configuration for the envelope-encrypted deque.

This module selects the key-wrap mechanism used to protect the session key
and the AEAD cipher used to seal each record.
*/

use crate::core::error::{Error, Result};

/// Supported key-wrap mechanisms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyWrapAlgorithm {
    /// CRYSTALS-Kyber KEM (Kyber768)
    #[default]
    Kyber768,
    /// CRYSTALS-Kyber KEM (Kyber512) - for resource-constrained environments
    Kyber512,
    /// CRYSTALS-Kyber KEM (Kyber1024) - highest security level
    Kyber1024,
}

impl KeyWrapAlgorithm {
    /// Get the name of the algorithm as a string
    pub fn name(&self) -> &'static str {
        match self {
            KeyWrapAlgorithm::Kyber768 => "CRYSTALS-Kyber-768",
            KeyWrapAlgorithm::Kyber512 => "CRYSTALS-Kyber-512",
            KeyWrapAlgorithm::Kyber1024 => "CRYSTALS-Kyber-1024",
        }
    }

    /// Check if the algorithm is available in the current build
    pub fn is_available(&self) -> bool {
        match self {
            KeyWrapAlgorithm::Kyber768 => true,
            KeyWrapAlgorithm::Kyber512 => cfg!(feature = "kyber512"),
            KeyWrapAlgorithm::Kyber1024 => cfg!(feature = "kyber1024"),
        }
    }

    /// Fail with `UnsupportedAlgorithm` if compiled out
    pub fn ensure_available(&self) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(Error::UnsupportedAlgorithm(format!(
                "{} is not available, enable the '{}' feature",
                self.name(),
                self.feature()
            )))
        }
    }

    fn feature(&self) -> &'static str {
        match self {
            KeyWrapAlgorithm::Kyber768 => "encryption",
            KeyWrapAlgorithm::Kyber512 => "kyber512",
            KeyWrapAlgorithm::Kyber1024 => "kyber1024",
        }
    }
}

/// Supported record ciphers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymmetricAlgorithm {
    /// ChaCha20-Poly1305
    #[default]
    ChaCha20Poly1305,
    /// AES-256-GCM - hardware acceleration on many platforms
    Aes256Gcm,
}

impl SymmetricAlgorithm {
    /// Every record cipher, in preference order
    pub const ALL: [SymmetricAlgorithm; 2] = [SymmetricAlgorithm::ChaCha20Poly1305, SymmetricAlgorithm::Aes256Gcm];

    /// Record ciphers compiled into this build, in preference order
    pub fn available() -> impl Iterator<Item = SymmetricAlgorithm> {
        Self::ALL.into_iter().filter(SymmetricAlgorithm::is_available)
    }

    /// Get the name of the algorithm as a string
    pub fn name(&self) -> &'static str {
        match self {
            SymmetricAlgorithm::ChaCha20Poly1305 => "ChaCha20-Poly1305",
            SymmetricAlgorithm::Aes256Gcm => "AES-256-GCM",
        }
    }

    /// Check if the algorithm is available in the current build
    pub fn is_available(&self) -> bool {
        match self {
            SymmetricAlgorithm::ChaCha20Poly1305 => true,
            SymmetricAlgorithm::Aes256Gcm => cfg!(feature = "aes-gcm"),
        }
    }

    /// Fail with `UnsupportedAlgorithm` if compiled out
    pub fn ensure_available(&self) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(Error::UnsupportedAlgorithm(format!(
                "{} is not available, enable the 'aes-gcm' feature",
                self.name()
            )))
        }
    }
}

/// Algorithm choice for one encrypted deque
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnvelopeConfig {
    /// Mechanism protecting the session key
    pub key_wrap: KeyWrapAlgorithm,
    /// Cipher sealing each record
    pub symmetric: SymmetricAlgorithm,
}

impl EnvelopeConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new configuration with specific settings
    pub fn with_algorithms(key_wrap: KeyWrapAlgorithm, symmetric: SymmetricAlgorithm) -> Self {
        Self { key_wrap, symmetric }
    }

    /// Create a configuration optimized for resource-constrained environments
    pub fn lightweight() -> Self {
        Self::with_algorithms(KeyWrapAlgorithm::Kyber512, SymmetricAlgorithm::ChaCha20Poly1305)
    }

    /// Create a configuration optimized for highest security
    pub fn high_security() -> Self {
        Self::with_algorithms(KeyWrapAlgorithm::Kyber1024, SymmetricAlgorithm::ChaCha20Poly1305)
    }

    /// Create a configuration optimized for hardware acceleration
    pub fn hardware_optimized() -> Self {
        Self::with_algorithms(KeyWrapAlgorithm::Kyber768, SymmetricAlgorithm::Aes256Gcm)
    }

    /// Validate the configuration against the compiled-in features
    pub fn validate(&self) -> Result<()> {
        self.key_wrap.ensure_available()?;
        self.symmetric.ensure_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() -> Result<()> {
        let config = EnvelopeConfig::new();
        assert_eq!(config.key_wrap, KeyWrapAlgorithm::Kyber768);
        assert_eq!(config.symmetric, SymmetricAlgorithm::ChaCha20Poly1305);
        config.validate()
    }

    #[test]
    fn test_presets() {
        assert_eq!(EnvelopeConfig::lightweight().key_wrap, KeyWrapAlgorithm::Kyber512);
        assert_eq!(EnvelopeConfig::high_security().key_wrap, KeyWrapAlgorithm::Kyber1024);
        assert_eq!(EnvelopeConfig::hardware_optimized().symmetric, SymmetricAlgorithm::Aes256Gcm);
    }

    #[test]
    fn test_validate_follows_features() {
        let config = EnvelopeConfig::hardware_optimized();
        assert_eq!(config.validate().is_ok(), cfg!(feature = "aes-gcm"));

        let config = EnvelopeConfig::high_security();
        match config.validate() {
            Ok(()) => assert!(cfg!(feature = "kyber1024")),
            Err(Error::UnsupportedAlgorithm(msg)) => assert!(msg.contains("kyber1024")),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(KeyWrapAlgorithm::Kyber768.name(), "CRYSTALS-Kyber-768");
        assert_eq!(SymmetricAlgorithm::Aes256Gcm.name(), "AES-256-GCM");
    }
}
