/*!
CRYSTALS-Kyber session-key wrap.

The session key is sealed under a key-encryption key derived with HKDF-SHA256
from a fresh Kyber encapsulation to the recipient's public key. The wrapped
form is `kem_ciphertext || sealed_session_key || tag`.

Kyber decapsulation uses implicit rejection: a non-matching secret key still
yields a shared secret, just the wrong one, so the seal fails to verify and
unwrapping reports `DecryptionFailed`.
*/

use std::fmt;

use hkdf::Hkdf;
use pqcrypto_traits::kem::{Ciphertext as _, PublicKey as _, SecretKey as _, SharedSecret as _};
use sha2::Sha256;

use crate::core::{
    constants::{
        HKDF_INFO_KEYWRAP, HKDF_SALT,
        sizes::{SESSION_KEY_SIZE, chacha, kyber},
    },
    crypto::{
        algorithms::symmetric::ChaCha20Poly1305Cipher,
        config::KeyWrapAlgorithm,
        traits::{KeyUnwrap, KeyWrap, RecordTag, SymmetricCipher},
    },
    error::{CryptoError, Result},
    memory::{Zeroize, ZeroizeOnDrop},
};

/// The key-encryption key is used for exactly one seal, so a fixed nonce is safe
const KEYWRAP_NONCE: [u8; chacha::NONCE_SIZE] = [0u8; chacha::NONCE_SIZE];

/// Run `$body` with `$kem` bound to the pqcrypto module for `$algorithm`
macro_rules! with_kyber {
    ($algorithm:expr, $kem:ident => $body:expr) => {{
        let outcome: Result<_> = match $algorithm {
            KeyWrapAlgorithm::Kyber768 => {
                use pqcrypto_kyber::kyber768 as $kem;
                $body
            }
            KeyWrapAlgorithm::Kyber512 => {
                #[cfg(feature = "kyber512")]
                {
                    use pqcrypto_kyber::kyber512 as $kem;
                    $body
                }
                #[cfg(not(feature = "kyber512"))]
                {
                    Err(crate::core::error::Error::UnsupportedAlgorithm(
                        "CRYSTALS-Kyber-512 is not available, enable the 'kyber512' feature".into(),
                    ))
                }
            }
            KeyWrapAlgorithm::Kyber1024 => {
                #[cfg(feature = "kyber1024")]
                {
                    use pqcrypto_kyber::kyber1024 as $kem;
                    $body
                }
                #[cfg(not(feature = "kyber1024"))]
                {
                    Err(crate::core::error::Error::UnsupportedAlgorithm(
                        "CRYSTALS-Kyber-1024 is not available, enable the 'kyber1024' feature".into(),
                    ))
                }
            }
        };
        outcome
    }};
}

/// Public half of a recipient key pair; shared with every encrypting deque
#[derive(Clone, PartialEq, Eq)]
pub struct RecipientPublicKey {
    algorithm: KeyWrapAlgorithm,
    bytes: Vec<u8>,
}

impl RecipientPublicKey {
    /// Parse a serialized public key
    pub fn from_bytes(algorithm: KeyWrapAlgorithm, bytes: &[u8]) -> Result<Self> {
        with_kyber!(algorithm, kem => {
            kem::PublicKey::from_bytes(bytes).map_err(|_| CryptoError::InvalidKeyFormat)?;
            Ok(())
        })?;
        Ok(Self {
            algorithm,
            bytes: bytes.to_vec(),
        })
    }

    /// Serialized key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get the algorithm of this key
    pub fn algorithm(&self) -> KeyWrapAlgorithm {
        self.algorithm
    }
}

impl fmt::Debug for RecipientPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipientPublicKey")
            .field("algorithm", &self.algorithm)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Secret half of a recipient key pair; never stored by a deque
pub struct RecipientSecretKey {
    algorithm: KeyWrapAlgorithm,
    bytes: ZeroizeOnDrop<Vec<u8>>,
}

impl RecipientSecretKey {
    /// Parse a serialized secret key
    pub fn from_bytes(algorithm: KeyWrapAlgorithm, bytes: &[u8]) -> Result<Self> {
        with_kyber!(algorithm, kem => {
            kem::SecretKey::from_bytes(bytes).map_err(|_| CryptoError::InvalidKeyFormat)?;
            Ok(())
        })?;
        Ok(Self {
            algorithm,
            bytes: ZeroizeOnDrop::new(bytes.to_vec()),
        })
    }

    /// Serialized key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get the algorithm of this key
    pub fn algorithm(&self) -> KeyWrapAlgorithm {
        self.algorithm
    }
}

impl fmt::Debug for RecipientSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipientSecretKey")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

/// Freshly generated recipient key pair
#[derive(Debug)]
pub struct RecipientKeyPair {
    /// Key handed to encrypting deques
    pub public_key: RecipientPublicKey,
    /// Key kept by whoever reads the records back
    pub secret_key: RecipientSecretKey,
}

impl RecipientKeyPair {
    /// Generate a new key pair for `algorithm`
    pub fn generate(algorithm: KeyWrapAlgorithm) -> Result<Self> {
        let (public_key, secret_key) = with_kyber!(algorithm, kem => {
            let (pk, sk) = kem::keypair();
            Ok((pk.as_bytes().to_vec(), ZeroizeOnDrop::new(sk.as_bytes().to_vec())))
        })?;
        Ok(Self {
            public_key: RecipientPublicKey {
                algorithm,
                bytes: public_key,
            },
            secret_key: RecipientSecretKey {
                algorithm,
                bytes: secret_key,
            },
        })
    }
}

impl KeyWrap for RecipientPublicKey {
    fn wrap_key(&self, session_key: &[u8; SESSION_KEY_SIZE]) -> Result<Vec<u8>> {
        let (shared_secret, mut wrapped) = with_kyber!(self.algorithm, kem => {
            let pk = kem::PublicKey::from_bytes(&self.bytes).map_err(|_| CryptoError::InvalidKeyFormat)?;
            let (ss, ct) = kem::encapsulate(&pk);
            Ok((ZeroizeOnDrop::new(ss.as_bytes().to_vec()), ct.as_bytes().to_vec()))
        })?;

        let kek = derive_kek(&shared_secret)?;
        let (sealed, tag) = ChaCha20Poly1305Cipher::new(&kek).encrypt_detached(&KEYWRAP_NONCE, session_key)?;

        wrapped.extend_from_slice(&sealed);
        wrapped.extend_from_slice(&tag);
        Ok(wrapped)
    }

    fn algorithm(&self) -> KeyWrapAlgorithm {
        self.algorithm
    }
}

impl KeyUnwrap for RecipientSecretKey {
    fn unwrap_key(&self, wrapped: &[u8]) -> Result<ZeroizeOnDrop<[u8; SESSION_KEY_SIZE]>> {
        let kem_len = ciphertext_len(self.algorithm);
        if wrapped.len() != kem_len + SESSION_KEY_SIZE + chacha::TAG_SIZE {
            return Err(CryptoError::DecryptionFailed.into());
        }
        let (kem_ciphertext, rest) = wrapped.split_at(kem_len);
        let (sealed, tag_bytes) = rest.split_at(SESSION_KEY_SIZE);

        let shared_secret = with_kyber!(self.algorithm, kem => {
            let ct = kem::Ciphertext::from_bytes(kem_ciphertext).map_err(|_| CryptoError::DecryptionFailed)?;
            let sk = kem::SecretKey::from_bytes(&self.bytes).map_err(|_| CryptoError::InvalidKeyFormat)?;
            let ss = kem::decapsulate(&ct, &sk);
            Ok(ZeroizeOnDrop::new(ss.as_bytes().to_vec()))
        })?;

        let kek = derive_kek(&shared_secret)?;
        let mut tag: RecordTag = [0u8; chacha::TAG_SIZE];
        tag.copy_from_slice(tag_bytes);
        let mut opened = ChaCha20Poly1305Cipher::new(&kek).decrypt_detached(&KEYWRAP_NONCE, sealed, &tag)?;

        let mut key = [0u8; SESSION_KEY_SIZE];
        key.copy_from_slice(&opened);
        opened.zeroize();
        let session_key = ZeroizeOnDrop::new(key);
        key.zeroize();
        Ok(session_key)
    }

    fn algorithm(&self) -> KeyWrapAlgorithm {
        self.algorithm
    }
}

/// Length of the KEM ciphertext at the front of a wrapped key
pub fn ciphertext_len(algorithm: KeyWrapAlgorithm) -> usize {
    match algorithm {
        KeyWrapAlgorithm::Kyber768 => kyber::CIPHERTEXT_BYTES,
        KeyWrapAlgorithm::Kyber512 => kyber::CIPHERTEXT_BYTES_512,
        KeyWrapAlgorithm::Kyber1024 => kyber::CIPHERTEXT_BYTES_1024,
    }
}

/// Derive the key-encryption key from a KEM shared secret
fn derive_kek(shared_secret: &[u8]) -> Result<ZeroizeOnDrop<[u8; chacha::KEY_SIZE]>> {
    let mut okm = [0u8; chacha::KEY_SIZE];
    Hkdf::<Sha256>::new(Some(HKDF_SALT), shared_secret)
        .expand(HKDF_INFO_KEYWRAP, &mut okm)
        .map_err(|_e| CryptoError::KeyDerivationFailed)?;
    let kek = ZeroizeOnDrop::new(okm);
    okm.zeroize();
    Ok(kek)
}
