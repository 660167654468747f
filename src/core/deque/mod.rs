/*!
String data deques.

[`ConvertFormatDeque`] is the generic building block: it converts inputs on
insertion and formats elements only when rendered. The string deques are
built on top of it, and the encrypted deque plugs an envelope sealer in as
its conversion.
*/

// Single-or-many insertion input
pub mod input;

// Conversion and formatting hooks
pub mod conversion;

// Generic lazily-joined deque
pub mod convert_format;

// Plain string deque
pub mod string;

// Bounded variant
pub mod circular;

// Write-once variant
pub mod worm;

// Envelope-encrypted variant
#[cfg(feature = "encryption")]
pub mod encrypted;

pub use circular::CircularDeque;
pub use conversion::{Conversion, ConvertFn, FnConversion, FormatFn, Stringify};
pub use convert_format::ConvertFormatDeque;
#[cfg(feature = "encryption")]
pub use encrypted::{DECRYPTION_FAILED_MARKER, EncryptedDeque, EnvelopeConversion, RecordFormat};
pub use input::Input;
pub use string::StringDeque;
pub use worm::WormDeque;
