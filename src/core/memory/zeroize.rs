/*!
Memory zeroization for key material.

Session keys, key-encryption keys and decoded secret keys pass through
buffers that are wiped with volatile writes once they are no longer needed.
*/

use std::ptr;
use std::sync::atomic::{Ordering, fence};

/// Trait for wiping sensitive bytes in place
pub trait Zeroize {
    /// Overwrite every byte with zero
    fn zeroize(&mut self);
}

impl Zeroize for [u8] {
    fn zeroize(&mut self) {
        secure_zero_memory(self);
    }
}

impl<const N: usize> Zeroize for [u8; N] {
    fn zeroize(&mut self) {
        secure_zero_memory(self.as_mut_slice());
    }
}

impl Zeroize for Vec<u8> {
    fn zeroize(&mut self) {
        secure_zero_memory(self.as_mut_slice());
        self.clear();
    }
}

/// Zero `memory` with writes the compiler may not elide
#[inline(never)]
pub fn secure_zero_memory(memory: &mut [u8]) {
    for byte in memory.iter_mut() {
        // SAFETY: `byte` is a valid, exclusive reference into `memory`
        unsafe {
            ptr::write_volatile(byte, 0);
        }
    }
    fence(Ordering::SeqCst);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_is_wiped() {
        let mut key = [0xA5u8; 32];
        key.zeroize();
        assert!(key.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_vec_is_wiped_and_emptied() {
        let mut buffer = vec![7u8; 48];
        buffer.zeroize();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_slice_is_wiped() {
        let mut data = [0xFFu8; 16];
        secure_zero_memory(&mut data[4..12]);
        assert_eq!(&data[..4], &[0xFF; 4]);
        assert!(data[4..12].iter().all(|&b| b == 0));
        assert_eq!(&data[12..], &[0xFF; 4]);
    }
}
