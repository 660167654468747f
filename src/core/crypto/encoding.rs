/*!
Canonical Base64 record fields.

A field is always held in padded standard Base64. Text that is already in
that form (it decodes, and re-encoding the decoded bytes gives back the same
text) is kept verbatim; anything else is treated as raw UTF-8 and encoded.
Feeding a field's own text back in is therefore a no-op.

Short ASCII words can happen to be valid Base64 (`"test"` is), in which case
they are kept as the encoded form rather than encoded again.
*/

use std::fmt;

use base64::Engine;

use crate::core::error::{Error, Result};

const ENGINE: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// Byte string held in canonical Base64 form
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Base64Field {
    text: String,
    bytes: Vec<u8>,
}

impl Base64Field {
    /// Encode raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            text: ENGINE.encode(bytes),
            bytes: bytes.to_vec(),
        }
    }

    /// Keep `text` if it is canonical Base64, otherwise encode its UTF-8 bytes
    pub fn from_text(text: &str) -> Self {
        match canonical_decode(text) {
            Some(bytes) => Self {
                text: text.to_owned(),
                bytes,
            },
            None => Self::from_bytes(text.as_bytes()),
        }
    }

    /// Accept only canonical Base64 text
    pub fn parse(text: &str) -> Result<Self> {
        canonical_decode(text)
            .map(|bytes| Self {
                text: text.to_owned(),
                bytes,
            })
            .ok_or_else(|| Error::Encoding(format!("not canonical Base64 ({} chars)", text.len())))
    }

    /// True if `text` decodes and re-encodes to itself
    pub fn is_canonical(text: &str) -> bool {
        canonical_decode(text).is_some()
    }

    /// Canonical Base64 text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Decoded bytes
    pub fn decoded(&self) -> &[u8] {
        &self.bytes
    }
}

fn canonical_decode(text: &str) -> Option<Vec<u8>> {
    let bytes = ENGINE.decode(text).ok()?;
    (ENGINE.encode(&bytes) == text).then_some(bytes)
}

impl From<&str> for Base64Field {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<String> for Base64Field {
    fn from(text: String) -> Self {
        Self::from_text(&text)
    }
}

impl From<&[u8]> for Base64Field {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for Base64Field {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            text: ENGINE.encode(&bytes),
            bytes,
        }
    }
}

impl fmt::Display for Base64Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for Base64Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Base64Field").field(&self.text).finish()
    }
}
