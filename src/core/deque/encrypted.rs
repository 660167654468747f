/*!
Envelope-encrypted deque.

Every inserted value is stringified and sealed into an [`EncryptedRecord`]
on the way in; plaintext is never stored. All records of one deque share a
single session key, generated on the first insertion and wrapped once under
the recipient public key.

How a record renders is chosen with a [`RecordFormat`]: kept encrypted (the
default), decrypted with a secret key handed to the format, or any custom
function. Reading records back without giving the deque a secret key goes
through [`EncryptedDeque::decrypt`], [`EncryptedDeque::decrypt_at`] or
[`EncryptedDeque::render_decrypted`], which only borrow the key.

Sealing is fallible, so unlike the string deques there are no operator
overloads here; use [`EncryptedDeque::with`] and [`EncryptedDeque::with_all`]
to chain.
*/

use std::collections::vec_deque;
use std::fmt;

use crate::construction_err;
use crate::core::{
    constants::DEFAULT_SEPARATOR,
    crypto::{
        algorithms::{RecipientPublicKey, RecipientSecretKey},
        config::{EnvelopeConfig, SymmetricAlgorithm},
        encoding::Base64Field,
        envelope::{EnvelopeSealer, SessionState, open_record, open_record_any},
        record::EncryptedRecord,
        traits::KeyUnwrap,
    },
    deque::{conversion::Conversion, convert_format::ConvertFormatDeque, input::Input},
    error::Result,
};

/// Rendered in place of a record that fails to decrypt
pub const DECRYPTION_FAILED_MARKER: &str = "[decryption failed]";

/// How an encrypted deque renders its records
#[derive(Default)]
pub enum RecordFormat {
    /// Render the record fields, still encrypted
    #[default]
    KeepEncrypted,
    /// Decrypt each record with the held secret key
    Decrypting(RecipientSecretKey),
    /// Render with a caller-supplied function
    Custom(Box<dyn Fn(&EncryptedRecord) -> String>),
}

impl RecordFormat {
    pub fn keep_encrypted() -> Self {
        RecordFormat::KeepEncrypted
    }

    pub fn decrypting(secret_key: RecipientSecretKey) -> Self {
        RecordFormat::Decrypting(secret_key)
    }

    pub fn custom<F>(format: F) -> Self
    where
        F: Fn(&EncryptedRecord) -> String + 'static,
    {
        RecordFormat::Custom(Box::new(format))
    }
}

impl fmt::Debug for RecordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordFormat::KeepEncrypted => write!(f, "KeepEncrypted"),
            RecordFormat::Decrypting(_) => write!(f, "Decrypting"),
            RecordFormat::Custom(_) => write!(f, "Custom"),
        }
    }
}

/// Conversion that seals strings into records and renders them per [`RecordFormat`]
pub struct EnvelopeConversion {
    sealer: EnvelopeSealer<RecipientPublicKey>,
    format: RecordFormat,
}

impl Conversion<String> for EnvelopeConversion {
    type Item = EncryptedRecord;

    fn convert(&mut self, value: String) -> Result<EncryptedRecord> {
        self.sealer.seal(&value)
    }

    fn format(&self, record: &EncryptedRecord) -> String {
        match &self.format {
            RecordFormat::KeepEncrypted => record.to_string(),
            RecordFormat::Decrypting(secret_key) => open_record(record, secret_key, self.sealer.symmetric())
                .unwrap_or_else(|_e| DECRYPTION_FAILED_MARKER.to_owned()),
            RecordFormat::Custom(format) => format(record),
        }
    }
}

/// Deque that stores only envelope-encrypted records
pub struct EncryptedDeque {
    inner: ConvertFormatDeque<EncryptedRecord, String, EnvelopeConversion>,
}

impl EncryptedDeque {
    /// Create an empty deque sealing for `public_key` with the default record cipher
    pub fn new(public_key: RecipientPublicKey) -> Result<Self> {
        let config = EnvelopeConfig::with_algorithms(public_key.algorithm(), SymmetricAlgorithm::default());
        Self::with_config(public_key, &config)
    }

    /// Create an empty deque with explicit algorithms
    ///
    /// The key-wrap algorithm of `config` must match the public key.
    pub fn with_config(public_key: RecipientPublicKey, config: &EnvelopeConfig) -> Result<Self> {
        config.validate()?;
        if public_key.algorithm() != config.key_wrap {
            return construction_err!(
                "public key is {} but the configuration selects {}",
                public_key.algorithm().name(),
                config.key_wrap.name()
            );
        }
        let conversion = EnvelopeConversion {
            sealer: EnvelopeSealer::new(public_key, config.symmetric)?,
            format: RecordFormat::default(),
        };
        Ok(Self {
            inner: ConvertFormatDeque::from_conversion(conversion, DEFAULT_SEPARATOR),
        })
    }

    /// Create a deque pre-filled with `data`, sealing each value
    pub fn with_data<D: fmt::Display>(
        public_key: RecipientPublicKey,
        data: impl Into<Input<D>>,
        separator: impl Into<String>,
    ) -> Result<Self> {
        let mut deque = Self::new(public_key)?.with_separator(separator);
        deque.insert(data)?;
        Ok(deque)
    }

    /// Replace the record format, builder style
    pub fn with_format(mut self, format: RecordFormat) -> Self {
        self.set_format(format);
        self
    }

    /// Replace the separator, builder style
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.inner.set_separator(separator);
        self
    }

    /// Seal and append one value
    pub fn append<D: fmt::Display>(&mut self, value: D) -> Result<()> {
        self.inner.append(value.to_string())
    }

    /// Seal and append every value; on failure nothing is appended
    pub fn extend<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        self.inner.extend(values.into_iter().map(|value| value.to_string()))
    }

    /// Seal and append a single value or a sequence of values
    pub fn insert<D: fmt::Display>(&mut self, values: impl Into<Input<D>>) -> Result<()> {
        self.extend(values.into())
    }

    /// Pre-process each value, then seal and append the results
    pub fn insert_with<V, R, P>(&mut self, values: impl Into<Input<V>>, mut pre_process: P) -> Result<()>
    where
        R: fmt::Display,
        P: FnMut(V) -> Result<R>,
    {
        self.inner
            .insert_with(values, |value| pre_process(value).map(|out| out.to_string()))
    }

    /// Append one value, consuming and returning the deque
    pub fn with<D: fmt::Display>(mut self, value: D) -> Result<Self> {
        self.append(value)?;
        Ok(self)
    }

    /// Append every value, consuming and returning the deque
    pub fn with_all<I>(mut self, values: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        self.extend(values)?;
        Ok(self)
    }

    /// Get the record at `index`; negative indices count from the back
    pub fn get(&self, index: isize) -> Result<&EncryptedRecord> {
        self.inner.get(index)
    }

    /// Seal `value` and store it at `index`
    ///
    /// The index is checked first, so a bad index never keys the session.
    pub fn set<D: fmt::Display>(&mut self, index: isize, value: D) -> Result<()> {
        self.inner.set(index, value.to_string())
    }

    /// Remove and return the record at `index`, still encrypted
    pub fn draw(&mut self, index: isize) -> Result<EncryptedRecord> {
        self.inner.draw(index)
    }

    /// Remove and return the last record
    pub fn draw_last(&mut self) -> Result<EncryptedRecord> {
        self.inner.draw_last()
    }

    /// Delete the record at `index`
    pub fn remove(&mut self, index: isize) -> Result<()> {
        self.inner.remove(index)
    }

    /// Remove every record; the session key is kept
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn front(&self) -> Option<&EncryptedRecord> {
        self.inner.front()
    }

    pub fn back(&self) -> Option<&EncryptedRecord> {
        self.inner.back()
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, EncryptedRecord> {
        self.inner.iter()
    }

    /// True if `record` is stored, or its rendering occurs in the rendered deque
    pub fn contains(&self, record: &EncryptedRecord) -> bool {
        self.inner.contains(record)
    }

    /// Join the formatted records with the current separator
    pub fn render(&self) -> String {
        self.inner.render()
    }

    /// Join the formatted records with `separator`, leaving the stored one alone
    pub fn render_with_separator(&self, separator: &str) -> String {
        self.inner.render_with_separator(separator)
    }

    /// Decrypt every record with `secret_key` and join the plaintexts
    ///
    /// Fails on the first record that does not decrypt.
    pub fn render_decrypted<K: KeyUnwrap + ?Sized>(&self, secret_key: &K) -> Result<String> {
        let symmetric = self.symmetric_algorithm();
        let plaintexts = self
            .inner
            .iter()
            .map(|record| open_record(record, secret_key, symmetric))
            .collect::<Result<Vec<_>>>()?;
        Ok(plaintexts.join(self.inner.separator()))
    }

    pub fn separator(&self) -> &str {
        self.inner.separator()
    }

    pub fn set_separator(&mut self, separator: impl Into<String>) {
        self.inner.set_separator(separator);
    }

    /// Replace the record format
    pub fn set_format(&mut self, format: RecordFormat) {
        self.inner.conversion_mut().format = format;
    }

    /// Current record format
    pub fn format(&self) -> &RecordFormat {
        &self.inner.conversion().format
    }

    /// Whether the session key has been generated yet
    pub fn session_state(&self) -> SessionState {
        self.inner.conversion().sealer.state()
    }

    /// Wrapped session key shared by every record, once keyed
    pub fn encrypted_session_key(&self) -> Option<&Base64Field> {
        self.inner.conversion().sealer.wrapped_session_key()
    }

    /// Recipient the session key is wrapped for
    pub fn public_key(&self) -> &RecipientPublicKey {
        self.inner.conversion().sealer.key_wrap()
    }

    /// Record cipher used by this deque
    pub fn symmetric_algorithm(&self) -> SymmetricAlgorithm {
        self.inner.conversion().sealer.symmetric()
    }

    /// Decrypt the record at `index` with `secret_key`
    pub fn decrypt_at<K: KeyUnwrap + ?Sized>(&self, index: isize, secret_key: &K) -> Result<String> {
        open_record(self.get(index)?, secret_key, self.symmetric_algorithm())
    }

    /// Decrypt a record sealed with any compiled-in record cipher
    ///
    /// A record does not name its cipher, so each available one is tried
    /// under the unwrapped session key until one authenticates.
    pub fn decrypt<K: KeyUnwrap + ?Sized>(record: &EncryptedRecord, secret_key: &K) -> Result<String> {
        open_record_any(record, secret_key)
    }

    /// Decrypt a record known to be sealed with `symmetric`
    pub fn decrypt_with<K: KeyUnwrap + ?Sized>(
        record: &EncryptedRecord,
        secret_key: &K,
        symmetric: SymmetricAlgorithm,
    ) -> Result<String> {
        open_record(record, secret_key, symmetric)
    }
}

impl fmt::Display for EncryptedDeque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl fmt::Debug for EncryptedDeque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedDeque")
            .field("len", &self.len())
            .field("state", &self.session_state())
            .field("format", self.format())
            .field("separator", &self.separator())
            .finish()
    }
}

impl<'a> IntoIterator for &'a EncryptedDeque {
    type Item = &'a EncryptedRecord;
    type IntoIter = vec_deque::Iter<'a, EncryptedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        crypto::{algorithms::RecipientKeyPair, config::KeyWrapAlgorithm},
        error::Error,
    };

    fn keys() -> Result<RecipientKeyPair> {
        RecipientKeyPair::generate(KeyWrapAlgorithm::Kyber768)
    }

    fn reading(pair: &RecipientKeyPair) -> Result<EncryptedDeque> {
        let secret = RecipientSecretKey::from_bytes(KeyWrapAlgorithm::Kyber768, pair.secret_key.as_bytes())?;
        Ok(EncryptedDeque::new(pair.public_key.clone())?
            .with_separator("\n")
            .with_format(RecordFormat::decrypting(secret)))
    }

    #[test]
    fn test_empty() -> Result<()> {
        let pair = keys()?;
        let deque = reading(&pair)?;
        assert_eq!(deque.render(), "");
        assert_eq!(deque.session_state(), SessionState::Uninitialized);
        Ok(())
    }

    #[test]
    fn test_chaining_renders_plaintext() -> Result<()> {
        let pair = keys()?;
        let deque = reading(&pair)?.with("Line 1")?.with(2)?;
        assert_eq!(deque.to_string(), "Line 1\n2");

        let deque = reading(&pair)?.with_all(["Line1", "Line2"])?.with_all([3, 4])?;
        assert_eq!(deque.render(), "Line1\nLine2\n3\n4");
        assert_eq!(deque.len(), 4);
        Ok(())
    }

    #[test]
    fn test_get_and_decrypt() -> Result<()> {
        let pair = keys()?;
        let mut deque = EncryptedDeque::new(pair.public_key.clone())?;
        deque.append("test")?;
        deque.append(1)?;
        assert_eq!(EncryptedDeque::decrypt(deque.get(0)?, &pair.secret_key)?, "test");
        assert_eq!(deque.decrypt_at(-1, &pair.secret_key)?, "1");
        Ok(())
    }

    #[test]
    fn test_set_checks_index_before_keying() -> Result<()> {
        let pair = keys()?;
        let mut deque = EncryptedDeque::new(pair.public_key.clone())?;
        assert!(matches!(deque.set(0, "test"), Err(Error::IndexOutOfRange { .. })));
        assert!(matches!(deque.set(1, 1), Err(Error::IndexOutOfRange { .. })));
        assert_eq!(deque.session_state(), SessionState::Uninitialized);

        deque.append("old")?;
        assert_eq!(deque.decrypt_at(0, &pair.secret_key)?, "old");
        deque.set(0, "new")?;
        assert_eq!(deque.decrypt_at(0, &pair.secret_key)?, "new");
        Ok(())
    }

    #[test]
    fn test_set_negative_index() -> Result<()> {
        let pair = keys()?;
        let mut deque = reading(&pair)?;
        deque.append("first line")?;
        deque.append("line 2")?;
        deque.extend(["several more", "will be overwritten"])?;
        deque.extend(["final"])?;
        deque.set(-2, "second_to_final_changed")?;
        assert_eq!(
            deque.render(),
            "first line\nline 2\nseveral more\nsecond_to_final_changed\nfinal"
        );
        Ok(())
    }

    #[test]
    fn test_keep_encrypted_is_default() -> Result<()> {
        let pair = keys()?;
        let mut deque = EncryptedDeque::new(pair.public_key.clone())?.with_separator("\n");
        deque.append("test")?;
        let record = deque.get(0)?.clone();
        assert_eq!(deque.render(), record.to_string());
        assert!(!deque.render().contains("test"));

        let rebuilt = EncryptedRecord::new(
            record.encrypted_session_key().as_str(),
            record.nonce().as_str(),
            record.tag().as_str(),
            record.ciphertext().as_str(),
        );
        assert_eq!(*deque.get(0)?, rebuilt);
        assert!(deque.contains(&rebuilt));
        Ok(())
    }

    #[test]
    fn test_draw_returns_record() -> Result<()> {
        let pair = keys()?;
        let mut deque = EncryptedDeque::new(pair.public_key.clone())?;
        deque.append("line 1")?;
        let record = deque.draw_last()?;
        assert_eq!(EncryptedDeque::decrypt(&record, &pair.secret_key)?, "line 1");
        assert!(deque.is_empty());
        Ok(())
    }

    #[test]
    fn test_clear_keeps_session() -> Result<()> {
        let pair = keys()?;
        let mut deque = reading(&pair)?;
        deque.extend(["line 1", "line 2"])?;
        let wrapped = deque.encrypted_session_key().cloned();
        assert_eq!(deque.len(), 2);
        assert_ne!(deque.render(), "");

        deque.clear();
        assert_eq!(deque.len(), 0);
        assert_eq!(deque.render(), "");
        assert_eq!(deque.session_state(), SessionState::Keyed);

        deque.append("line 3")?;
        assert_eq!(deque.encrypted_session_key().cloned(), wrapped);
        Ok(())
    }

    #[test]
    fn test_insert_with_pre_process() -> Result<()> {
        let pair = keys()?;
        let mut deque = reading(&pair)?;
        deque.insert_with((1..=9).collect::<Vec<i32>>(), |v: i32| Ok(v * 2))?;
        assert_eq!(deque.render(), "2\n4\n6\n8\n10\n12\n14\n16\n18");
        Ok(())
    }

    #[test]
    fn test_initial_string_is_one_record() -> Result<()> {
        let pair = keys()?;
        let secret = RecipientSecretKey::from_bytes(KeyWrapAlgorithm::Kyber768, pair.secret_key.as_bytes())?;
        let deque = EncryptedDeque::with_data(pair.public_key.clone(), "string init test", "")?
            .with_format(RecordFormat::decrypting(secret));
        assert_eq!(deque.len(), 1);
        assert_eq!(deque.to_string(), "string init test");
        Ok(())
    }

    #[test]
    fn test_decrypting_format_marks_foreign_records() -> Result<()> {
        let pair = keys()?;
        let stranger = keys()?;
        let deque = EncryptedDeque::new(pair.public_key.clone())?
            .with_format(RecordFormat::decrypting(stranger.secret_key))
            .with("secret")?;
        assert_eq!(deque.render(), DECRYPTION_FAILED_MARKER);
        Ok(())
    }

    #[test]
    fn test_render_decrypted_borrows_key() -> Result<()> {
        let pair = keys()?;
        let deque = EncryptedDeque::new(pair.public_key.clone())?
            .with_separator(", ")
            .with_all(["a", "b"])?;
        assert_eq!(deque.render_decrypted(&pair.secret_key)?, "a, b");
        Ok(())
    }

    #[test]
    fn test_custom_format() -> Result<()> {
        let pair = keys()?;
        let deque = EncryptedDeque::new(pair.public_key.clone())?
            .with_separator("|")
            .with_format(RecordFormat::custom(|record| record.ciphertext().decoded().len().to_string()))
            .with_all(["abc", "hello"])?;
        assert_eq!(deque.render(), "3|5");
        Ok(())
    }

    #[test]
    fn test_config_must_match_key() -> Result<()> {
        let pair = keys()?;
        let config = EnvelopeConfig::with_algorithms(KeyWrapAlgorithm::Kyber512, SymmetricAlgorithm::ChaCha20Poly1305);
        let result = EncryptedDeque::with_config(pair.public_key.clone(), &config);
        assert!(matches!(
            result,
            Err(Error::Construction(_)) | Err(Error::UnsupportedAlgorithm(_))
        ));
        Ok(())
    }
}
