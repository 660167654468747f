/*!
Key-encapsulation based session-key wrapping.
*/

mod kyber;

pub use kyber::{RecipientKeyPair, RecipientPublicKey, RecipientSecretKey, ciphertext_len};
