/*!
Encrypted record.

One sealed element of an encrypted deque: the wrapped session key shared by
every record of that deque, plus this record's nonce, tag and ciphertext.
All four fields are required.
*/

use std::fmt;

use crate::construction_err;
use crate::core::{crypto::encoding::Base64Field, error::Result};

/// Names of the four record fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    /// Session key wrapped under the recipient public key
    EncryptedSessionKey,
    /// Per-record nonce
    Nonce,
    /// Detached authentication tag
    Tag,
    /// Encrypted plaintext
    Ciphertext,
}

impl RecordField {
    /// Field name as used in the rendered record
    pub fn name(&self) -> &'static str {
        match self {
            RecordField::EncryptedSessionKey => "enc_session_key",
            RecordField::Nonce => "nonce",
            RecordField::Tag => "tag",
            RecordField::Ciphertext => "ciphertext",
        }
    }
}

/// Envelope-encrypted element; equality compares all four fields
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncryptedRecord {
    encrypted_session_key: Base64Field,
    nonce: Base64Field,
    tag: Base64Field,
    ciphertext: Base64Field,
}

impl EncryptedRecord {
    /// Create a record from its four fields
    pub fn new(
        encrypted_session_key: impl Into<Base64Field>,
        nonce: impl Into<Base64Field>,
        tag: impl Into<Base64Field>,
        ciphertext: impl Into<Base64Field>,
    ) -> Self {
        Self {
            encrypted_session_key: encrypted_session_key.into(),
            nonce: nonce.into(),
            tag: tag.into(),
            ciphertext: ciphertext.into(),
        }
    }

    /// Start a record field by field
    pub fn builder() -> EncryptedRecordBuilder {
        EncryptedRecordBuilder::default()
    }

    pub fn encrypted_session_key(&self) -> &Base64Field {
        &self.encrypted_session_key
    }

    pub fn nonce(&self) -> &Base64Field {
        &self.nonce
    }

    pub fn tag(&self) -> &Base64Field {
        &self.tag
    }

    pub fn ciphertext(&self) -> &Base64Field {
        &self.ciphertext
    }

    /// Get a field by name
    pub fn field(&self, field: RecordField) -> &Base64Field {
        match field {
            RecordField::EncryptedSessionKey => &self.encrypted_session_key,
            RecordField::Nonce => &self.nonce,
            RecordField::Tag => &self.tag,
            RecordField::Ciphertext => &self.ciphertext,
        }
    }

    /// Decoded bytes of a field
    pub fn field_bytes(&self, field: RecordField) -> &[u8] {
        self.field(field).decoded()
    }

    /// Replace a field; text already in canonical Base64 is kept as is
    pub fn set_field(&mut self, field: RecordField, value: impl Into<Base64Field>) {
        let slot = match field {
            RecordField::EncryptedSessionKey => &mut self.encrypted_session_key,
            RecordField::Nonce => &mut self.nonce,
            RecordField::Tag => &mut self.tag,
            RecordField::Ciphertext => &mut self.ciphertext,
        };
        *slot = value.into();
    }
}

impl fmt::Display for EncryptedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={} {}={} {}={} {}={}",
            RecordField::EncryptedSessionKey.name(),
            self.encrypted_session_key,
            RecordField::Nonce.name(),
            self.nonce,
            RecordField::Tag.name(),
            self.tag,
            RecordField::Ciphertext.name(),
            self.ciphertext,
        )
    }
}

/// Builder that refuses to produce a partially filled record
#[derive(Debug, Clone, Default)]
pub struct EncryptedRecordBuilder {
    encrypted_session_key: Option<Base64Field>,
    nonce: Option<Base64Field>,
    tag: Option<Base64Field>,
    ciphertext: Option<Base64Field>,
}

impl EncryptedRecordBuilder {
    pub fn encrypted_session_key(mut self, value: impl Into<Base64Field>) -> Self {
        self.encrypted_session_key = Some(value.into());
        self
    }

    pub fn nonce(mut self, value: impl Into<Base64Field>) -> Self {
        self.nonce = Some(value.into());
        self
    }

    pub fn tag(mut self, value: impl Into<Base64Field>) -> Self {
        self.tag = Some(value.into());
        self
    }

    pub fn ciphertext(mut self, value: impl Into<Base64Field>) -> Self {
        self.ciphertext = Some(value.into());
        self
    }

    /// Build the record, failing with `Construction` on the first missing field
    pub fn build(self) -> Result<EncryptedRecord> {
        let Some(encrypted_session_key) = self.encrypted_session_key else {
            return missing(RecordField::EncryptedSessionKey);
        };
        let Some(nonce) = self.nonce else {
            return missing(RecordField::Nonce);
        };
        let Some(tag) = self.tag else {
            return missing(RecordField::Tag);
        };
        let Some(ciphertext) = self.ciphertext else {
            return missing(RecordField::Ciphertext);
        };
        Ok(EncryptedRecord {
            encrypted_session_key,
            nonce,
            tag,
            ciphertext,
        })
    }
}

fn missing(field: RecordField) -> Result<EncryptedRecord> {
    construction_err!("encrypted record is missing '{}'", field.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;

    fn sample() -> EncryptedRecord {
        EncryptedRecord::new(&b"wrapped"[..], &b"nonce"[..], &b"tag"[..], &b"body"[..])
    }

    #[test]
    fn test_structural_equality() {
        let record = sample();
        let rebuilt = EncryptedRecord::new(
            record.encrypted_session_key().as_str(),
            record.nonce().as_str(),
            record.tag().as_str(),
            record.ciphertext().as_str(),
        );
        assert_eq!(record, rebuilt);

        let mut changed = rebuilt.clone();
        changed.set_field(RecordField::Tag, &b"other"[..]);
        assert_ne!(record, changed);
    }

    #[test]
    fn test_field_bytes() {
        let record = sample();
        assert_eq!(record.field_bytes(RecordField::Ciphertext), b"body");
        assert_eq!(record.field_bytes(RecordField::EncryptedSessionKey), b"wrapped");
    }

    #[test]
    fn test_set_plain_text_field() {
        let mut record = EncryptedRecord::new("", "test", "", "");
        record.set_field(RecordField::Ciphertext, "abcdefghia");
        assert_eq!(record.ciphertext().as_str(), "YWJjZGVmZ2hpYQ==");
    }

    #[test]
    fn test_builder_requires_every_field() -> Result<()> {
        let result = EncryptedRecord::builder().nonce("AAAA").tag("AAAA").build();
        match result {
            Err(Error::Construction(msg)) => assert!(msg.contains("enc_session_key")),
            other => panic!("expected construction error, got {:?}", other),
        }

        let result = EncryptedRecord::builder()
            .encrypted_session_key("AAAA")
            .nonce("AAAA")
            .tag("AAAA")
            .build();
        assert!(matches!(result, Err(Error::Construction(msg)) if msg.contains("ciphertext")));

        let record = EncryptedRecord::builder()
            .encrypted_session_key("AAAA")
            .nonce("AAAA")
            .tag("AAAA")
            .ciphertext("AAAA")
            .build()?;
        assert_eq!(record.to_string(), "enc_session_key=AAAA nonce=AAAA tag=AAAA ciphertext=AAAA");
        Ok(())
    }
}
