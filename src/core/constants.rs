/*!
Constants for the string data deques.

This module contains the default separator and the key, nonce and tag sizes
used by the envelope-encrypted deque.
*/

/// Separator used when none is given
pub const DEFAULT_SEPARATOR: &str = "";

/// Whether the encrypted deque was compiled in
pub const ENCRYPTION_AVAILABLE: bool = cfg!(feature = "encryption");

/// Size constants for the envelope encryption
pub mod sizes {
    /// ChaCha20-Poly1305 constants
    pub mod chacha {
        /// Size of ChaCha20-Poly1305 key in bytes
        pub const KEY_SIZE: usize = 32;

        /// Size of ChaCha20-Poly1305 nonce in bytes
        pub const NONCE_SIZE: usize = 12;

        /// Size of ChaCha20-Poly1305 tag in bytes
        pub const TAG_SIZE: usize = 16;
    }

    /// AES-GCM constants
    pub mod aes {
        /// Size of AES-256-GCM key in bytes
        pub const KEY_SIZE: usize = 32;

        /// Size of AES-256-GCM tag in bytes
        pub const TAG_SIZE: usize = 16;
    }

    /// CRYSTALS-Kyber constants
    pub mod kyber {
        /// Size of Kyber768 ciphertext in bytes
        pub const CIPHERTEXT_BYTES: usize = 1088;

        /// Size of Kyber512 ciphertext in bytes
        pub const CIPHERTEXT_BYTES_512: usize = 768;

        /// Size of Kyber1024 ciphertext in bytes
        pub const CIPHERTEXT_BYTES_1024: usize = 1568;
    }

    /// Size of the session key shared by every record in a deque
    pub const SESSION_KEY_SIZE: usize = chacha::KEY_SIZE;

    /// Leading random bytes of every record nonce
    pub const NONCE_PREFIX_SIZE: usize = 4;
}

/// Salt value for HKDF (used to derive the key-wrapping key)
pub const HKDF_SALT: &[u8] = b"STRINGDATADEQUE-KEYWRAP-SALT";

/// Info value for HKDF when wrapping session keys
pub const HKDF_INFO_KEYWRAP: &[u8] = b"STRINGDATADEQUE-KEYWRAP-V1";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encryption_flag_matches_build() {
        assert_eq!(ENCRYPTION_AVAILABLE, cfg!(feature = "encryption"));
    }

    #[test]
    fn test_session_key_fits_every_cipher() {
        assert_eq!(sizes::SESSION_KEY_SIZE, sizes::aes::KEY_SIZE);
        assert!(sizes::NONCE_PREFIX_SIZE < sizes::chacha::NONCE_SIZE);
    }
}
