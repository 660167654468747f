/*!
Envelope encryption.

An [`EnvelopeSealer`] owns one session for its whole life. The session key
is generated on the first seal, wrapped once under the recipient key, and
then reused for every record; only the nonce, tag and ciphertext change
from record to record.

Record nonces are a random 4-byte prefix chosen when the session is keyed,
followed by a 64-bit big-endian record counter, so no nonce repeats under
one session key.
*/

use std::fmt;

use rand::RngCore;

use crate::core::{
    constants::sizes::{NONCE_PREFIX_SIZE, SESSION_KEY_SIZE},
    crypto::{
        algorithms::{RecipientPublicKey, create_cipher},
        config::SymmetricAlgorithm,
        encoding::Base64Field,
        record::EncryptedRecord,
        traits::{KeyUnwrap, KeyWrap, RecordNonce, RecordTag, SymmetricCipher},
    },
    error::{CryptoError, Result},
    memory::{Zeroize, ZeroizeOnDrop},
};

/// Session key lifecycle of one sealer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionState {
    /// No session key exists yet
    Uninitialized,
    /// A session key was generated and wrapped; it stays until the sealer is dropped
    Keyed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Uninitialized => write!(f, "Uninitialized"),
            SessionState::Keyed => write!(f, "Keyed"),
        }
    }
}

/// Keyed session: the record cipher plus the wrapped form of its key
struct Session {
    cipher: Box<dyn SymmetricCipher>,
    wrapped_key: Base64Field,
    nonce_prefix: [u8; NONCE_PREFIX_SIZE],
    sealed: u64,
}

impl Session {
    fn establish<W: KeyWrap>(key_wrap: &W, symmetric: SymmetricAlgorithm) -> Result<Self> {
        let mut rng = rand::rng();

        let mut raw = [0u8; SESSION_KEY_SIZE];
        rng.fill_bytes(&mut raw);
        let session_key = ZeroizeOnDrop::new(raw);
        raw.zeroize();

        let wrapped_key = Base64Field::from(key_wrap.wrap_key(&session_key)?);
        let cipher = create_cipher(&session_key, symmetric)?;

        let mut nonce_prefix = [0u8; NONCE_PREFIX_SIZE];
        rng.fill_bytes(&mut nonce_prefix);

        log::debug!(
            "Session keyed for {} records, key wrapped with {}",
            symmetric.name(),
            key_wrap.algorithm().name()
        );

        Ok(Self {
            cipher,
            wrapped_key,
            nonce_prefix,
            sealed: 0,
        })
    }

    fn next_nonce(&mut self) -> Result<RecordNonce> {
        let counter = self.sealed;
        self.sealed = counter.checked_add(1).ok_or(CryptoError::EncryptionFailed)?;

        let mut nonce: RecordNonce = [0u8; 12];
        nonce[..NONCE_PREFIX_SIZE].copy_from_slice(&self.nonce_prefix);
        nonce[NONCE_PREFIX_SIZE..].copy_from_slice(&counter.to_be_bytes());
        Ok(nonce)
    }
}

/// Seals plaintexts into [`EncryptedRecord`]s under one lazily created session key
pub struct EnvelopeSealer<W: KeyWrap = RecipientPublicKey> {
    key_wrap: W,
    symmetric: SymmetricAlgorithm,
    session: Option<Session>,
}

impl<W: KeyWrap> EnvelopeSealer<W> {
    /// Create an unkeyed sealer
    ///
    /// Fails with `UnsupportedAlgorithm` if either algorithm is compiled out.
    pub fn new(key_wrap: W, symmetric: SymmetricAlgorithm) -> Result<Self> {
        key_wrap.algorithm().ensure_available()?;
        symmetric.ensure_available()?;
        Ok(Self {
            key_wrap,
            symmetric,
            session: None,
        })
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        match self.session {
            Some(_) => SessionState::Keyed,
            None => SessionState::Uninitialized,
        }
    }

    /// Wrapped session key, once keyed
    pub fn wrapped_session_key(&self) -> Option<&Base64Field> {
        self.session.as_ref().map(|session| &session.wrapped_key)
    }

    /// Recipient key the session key is wrapped under
    pub fn key_wrap(&self) -> &W {
        &self.key_wrap
    }

    /// Record cipher in use
    pub fn symmetric(&self) -> SymmetricAlgorithm {
        self.symmetric
    }

    /// Number of records sealed so far
    pub fn sealed_count(&self) -> u64 {
        self.session.as_ref().map_or(0, |session| session.sealed)
    }

    /// Encrypt one plaintext, keying the session first if needed
    pub fn seal(&mut self, plaintext: &str) -> Result<EncryptedRecord> {
        let session = match self.session.take() {
            Some(session) => session,
            None => Session::establish(&self.key_wrap, self.symmetric)?,
        };
        let session = self.session.insert(session);

        let nonce = session.next_nonce()?;
        let (ciphertext, tag) = session.cipher.encrypt_detached(&nonce, plaintext.as_bytes())?;
        log::trace!("Sealed record {}", session.sealed);

        Ok(EncryptedRecord::new(
            session.wrapped_key.clone(),
            Base64Field::from_bytes(&nonce),
            Base64Field::from_bytes(&tag),
            ciphertext,
        ))
    }
}

impl<W: KeyWrap + fmt::Debug> fmt::Debug for EnvelopeSealer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvelopeSealer")
            .field("key_wrap", &self.key_wrap)
            .field("symmetric", &self.symmetric)
            .field("state", &self.state())
            .finish()
    }
}

/// Decrypt a record with the secret key matching its recipient public key
///
/// Fails with `DecryptionFailed` if the wrapped key, nonce, tag or ciphertext
/// was altered, or if `secret_key` does not belong to the recipient.
pub fn open_record<K: KeyUnwrap + ?Sized>(
    record: &EncryptedRecord,
    secret_key: &K,
    symmetric: SymmetricAlgorithm,
) -> Result<String> {
    let plaintext = open_bytes(record, secret_key, symmetric).inspect_err(|err| {
        if err.is_decryption_failure() {
            log::warn!("Record failed to authenticate under {}", symmetric.name());
        }
    })?;
    String::from_utf8(plaintext).map_err(|_e| CryptoError::DecryptionFailed.into())
}

/// Decrypt a record without knowing which record cipher sealed it
///
/// The session key is unwrapped once, then every compiled-in cipher is tried
/// in preference order. A cipher that did not seal the record fails its tag
/// check, so only the sealing cipher can produce plaintext.
pub fn open_record_any<K: KeyUnwrap + ?Sized>(record: &EncryptedRecord, secret_key: &K) -> Result<String> {
    let plaintext = open_bytes_any(record, secret_key).inspect_err(|err| {
        if err.is_decryption_failure() {
            log::warn!("Record failed to authenticate under every available cipher");
        }
    })?;
    String::from_utf8(plaintext).map_err(|_e| CryptoError::DecryptionFailed.into())
}

fn nonce_and_tag(record: &EncryptedRecord) -> Result<(RecordNonce, RecordTag)> {
    let nonce = RecordNonce::try_from(record.nonce().decoded()).map_err(|_e| CryptoError::DecryptionFailed)?;
    let tag = RecordTag::try_from(record.tag().decoded()).map_err(|_e| CryptoError::DecryptionFailed)?;
    Ok((nonce, tag))
}

fn open_bytes<K: KeyUnwrap + ?Sized>(
    record: &EncryptedRecord,
    secret_key: &K,
    symmetric: SymmetricAlgorithm,
) -> Result<Vec<u8>> {
    let (nonce, tag) = nonce_and_tag(record)?;
    let session_key = secret_key.unwrap_key(record.encrypted_session_key().decoded())?;
    let cipher = create_cipher(&session_key, symmetric)?;
    cipher.decrypt_detached(&nonce, record.ciphertext().decoded(), &tag)
}

fn open_bytes_any<K: KeyUnwrap + ?Sized>(record: &EncryptedRecord, secret_key: &K) -> Result<Vec<u8>> {
    let (nonce, tag) = nonce_and_tag(record)?;
    let session_key = secret_key.unwrap_key(record.encrypted_session_key().decoded())?;
    for symmetric in SymmetricAlgorithm::available() {
        let cipher = create_cipher(&session_key, symmetric)?;
        if let Ok(plaintext) = cipher.decrypt_detached(&nonce, record.ciphertext().decoded(), &tag) {
            log::trace!("Record opened with {}", symmetric.name());
            return Ok(plaintext);
        }
    }
    Err(CryptoError::DecryptionFailed.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::crypto::{
        algorithms::RecipientKeyPair,
        config::KeyWrapAlgorithm,
        record::RecordField,
    };

    fn sealer() -> Result<(EnvelopeSealer, RecipientKeyPair)> {
        let pair = RecipientKeyPair::generate(KeyWrapAlgorithm::Kyber768)?;
        let sealer = EnvelopeSealer::new(pair.public_key.clone(), SymmetricAlgorithm::ChaCha20Poly1305)?;
        Ok((sealer, pair))
    }

    #[test]
    fn test_keyed_on_first_seal_only() -> Result<()> {
        let (mut sealer, _pair) = sealer()?;
        assert_eq!(sealer.state(), SessionState::Uninitialized);
        assert!(sealer.wrapped_session_key().is_none());

        let first = sealer.seal("one")?;
        assert_eq!(sealer.state(), SessionState::Keyed);
        let wrapped = sealer.wrapped_session_key().cloned();

        let second = sealer.seal("two")?;
        assert_eq!(sealer.wrapped_session_key().cloned(), wrapped);
        assert_eq!(first.encrypted_session_key(), second.encrypted_session_key());
        assert_ne!(first.nonce(), second.nonce());
        assert_eq!(sealer.sealed_count(), 2);
        Ok(())
    }

    #[test]
    fn test_nonce_layout() -> Result<()> {
        let (mut sealer, _pair) = sealer()?;
        let first = sealer.seal("a")?;
        let second = sealer.seal("b")?;

        let n1 = first.field_bytes(RecordField::Nonce);
        let n2 = second.field_bytes(RecordField::Nonce);
        assert_eq!(n1.len(), 12);
        assert_eq!(&n1[..NONCE_PREFIX_SIZE], &n2[..NONCE_PREFIX_SIZE]);
        assert_eq!(&n1[NONCE_PREFIX_SIZE..], &0u64.to_be_bytes());
        assert_eq!(&n2[NONCE_PREFIX_SIZE..], &1u64.to_be_bytes());
        Ok(())
    }

    #[test]
    fn test_open_round_trip() -> Result<()> {
        let (mut sealer, pair) = sealer()?;
        let record = sealer.seal("attack at dawn")?;
        let plaintext = open_record(&record, &pair.secret_key, SymmetricAlgorithm::ChaCha20Poly1305)?;
        assert_eq!(plaintext, "attack at dawn");
        Ok(())
    }

    #[test]
    fn test_truncated_nonce_is_rejected() -> Result<()> {
        let (mut sealer, pair) = sealer()?;
        let mut record = sealer.seal("x")?;
        record.set_field(RecordField::Nonce, &[0u8; 8][..]);
        let err = open_record(&record, &pair.secret_key, SymmetricAlgorithm::ChaCha20Poly1305).unwrap_err();
        assert!(err.is_decryption_failure());
        Ok(())
    }

    #[test]
    fn test_open_any_finds_the_sealing_cipher() -> Result<()> {
        let (mut sealer, pair) = sealer()?;
        let record = sealer.seal("either way")?;
        assert_eq!(open_record_any(&record, &pair.secret_key)?, "either way");

        let mut tampered = record.clone();
        tampered.set_field(RecordField::Tag, &[0u8; 16][..]);
        let err = open_record_any(&tampered, &pair.secret_key).unwrap_err();
        assert!(err.is_decryption_failure());
        Ok(())
    }

    #[cfg(feature = "aes-gcm")]
    #[test]
    fn test_open_any_with_aes_records() -> Result<()> {
        let pair = RecipientKeyPair::generate(KeyWrapAlgorithm::Kyber768)?;
        let mut sealer = EnvelopeSealer::new(pair.public_key.clone(), SymmetricAlgorithm::Aes256Gcm)?;
        let record = sealer.seal("accelerated")?;
        assert_eq!(open_record_any(&record, &pair.secret_key)?, "accelerated");
        Ok(())
    }

    #[test]
    fn test_available_ciphers() {
        let available: Vec<_> = SymmetricAlgorithm::available().collect();
        assert_eq!(available.first(), Some(&SymmetricAlgorithm::ChaCha20Poly1305));
        assert_eq!(available.len(), if cfg!(feature = "aes-gcm") { 2 } else { 1 });
    }

    #[test]
    fn test_state_display() {
        assert_eq!(SessionState::Uninitialized.to_string(), "Uninitialized");
        assert_eq!(SessionState::Keyed.to_string(), "Keyed");
    }
}
