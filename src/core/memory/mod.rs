/*!
Memory hygiene for key material.
*/

pub mod zeroize;
pub mod zeroize_on_drop;

pub use zeroize::{Zeroize, secure_zero_memory};
pub use zeroize_on_drop::ZeroizeOnDrop;
