/*!
Error handling for the string data deques.

Every failure is local and synchronous: nothing is retried internally and
nothing is fatal, so each variant is something the immediate caller can
recover from.
*/

use thiserror::Error;

/// Result type for deque operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for deque operations
#[derive(Error, Debug)]
pub enum Error {
    /// A convert or pre-process function rejected its input
    #[error("Type conversion failed: {0}")]
    TypeConversion(String),

    /// A value handed to a skip-conversion insert was not the stored type
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    /// Indexed access outside the stored items
    #[error("Index {index} out of range for deque of length {len}")]
    IndexOutOfRange {
        index: isize,
        len: usize,
    },

    /// A mutation the container's policy forbids
    #[error("{container} does not implement {operation}")]
    OperationNotSupported {
        container: &'static str,
        operation: &'static str,
    },

    /// Cryptographic error (limited details for security)
    #[error("Cryptographic operation failed: {0}")]
    Crypto(#[source] CryptoError),

    /// Required construction parameters were missing or invalid
    #[error("Construction error: {0}")]
    Construction(String),

    /// A record field was not valid Base64
    #[error("Invalid encoding: {0}")]
    Encoding(String),

    /// The requested algorithm was compiled out
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

/// Cryptographic errors with limited details to prevent leaking information
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoError {
    /// Generic encryption error
    #[error("Encryption failed")]
    EncryptionFailed,

    /// Authentication tag did not verify, or the key did not match
    #[error("Decryption failed")]
    DecryptionFailed,

    /// Key derivation error
    #[error("Key derivation failed")]
    KeyDerivationFailed,

    /// Invalid key format
    #[error("Invalid key format")]
    InvalidKeyFormat,
}

impl From<CryptoError> for Error {
    fn from(error: CryptoError) -> Self {
        Error::Crypto(error)
    }
}

impl Error {
    /// True when the error means a record failed to authenticate
    pub fn is_decryption_failure(&self) -> bool {
        matches!(self, Error::Crypto(CryptoError::DecryptionFailed))
    }

    /// Shorthand for the out-of-range error
    pub(crate) fn index(index: isize, len: usize) -> Self {
        Error::IndexOutOfRange { index, len }
    }

    /// Shorthand for a policy rejection
    pub(crate) fn not_supported(container: &'static str, operation: &'static str) -> Self {
        Error::OperationNotSupported { container, operation }
    }
}

/// Create a type conversion error
#[macro_export]
macro_rules! conversion_err {
    ($msg:expr) => {
        Err($crate::Error::TypeConversion($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        Err($crate::Error::TypeConversion(format!($fmt, $($arg)*)))
    };
}

/// Create a construction error
#[macro_export]
macro_rules! construction_err {
    ($msg:expr) => {
        Err($crate::Error::Construction($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        Err($crate::Error::Construction(format!($fmt, $($arg)*)))
    };
}
