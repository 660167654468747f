/*!
Zero-on-drop wrapper.

Holds key material and wipes it when the owner goes out of scope, so the
session key of an encrypted deque does not outlive the deque.
*/

use std::fmt;
use std::ops::Deref;

use crate::core::memory::zeroize::Zeroize;

/// A wrapper that zeroizes its contents when dropped
pub struct ZeroizeOnDrop<T: Zeroize> {
    inner: T,
}

impl<T: Zeroize> ZeroizeOnDrop<T> {
    /// Wrap a value
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }
}

impl<T: Zeroize> Deref for ZeroizeOnDrop<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T: Zeroize> Drop for ZeroizeOnDrop<T> {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl<T: Zeroize> fmt::Debug for ZeroizeOnDrop<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ZeroizeOnDrop(<redacted>)")
    }
}
