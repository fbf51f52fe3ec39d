//! [`IvCounter`]: the self-extending counter that seeds each keystream block.
//!
//! The counter is the 16-byte base IV followed by a suffix that grows one
//! zero byte at a time. Only the last byte is ever incremented; when it wraps
//! from `0xFF` to `0x00` a new zero byte is appended instead of carrying into
//! the previous one. The resulting IV sequence is
//!
//! ```text
//! block 0    base
//! block 1    base || 00
//! block k    base || (k - 1)          for 1 <= k <= 256
//! block 257  base || 00 || 00
//! block 258  base || 00 || 01
//! ```
//!
//! This must match the vendor's encoder bit for bit.

use super::IV_LEN;

/// Growable big-endian counter appended to a fixed base IV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IvCounter {
    bytes: Vec<u8>,
    pending_extend: bool,
}

impl IvCounter {
    /// Start a counter at `base` with an empty suffix.
    pub fn new(base: &[u8; IV_LEN]) -> Self {
        let mut bytes = Vec::with_capacity(IV_LEN + 4);
        bytes.extend_from_slice(base);
        Self {
            bytes,
            pending_extend: true,
        }
    }

    /// Full IV for the current block: base followed by the suffix.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The counter suffix (everything after the base IV).
    pub fn suffix(&self) -> &[u8] {
        &self.bytes[IV_LEN..]
    }

    /// Increment the last byte, returning `true` when it wrapped to zero.
    pub fn increment(&mut self) -> bool {
        match self.bytes.last_mut() {
            Some(last) => {
                *last = last.wrapping_add(1);
                *last == 0
            }
            None => true,
        }
    }

    /// Append a single `0x00` byte to the suffix.
    pub fn extend_by_one_zero_byte(&mut self) {
        self.bytes.push(0);
    }

    /// Move to the IV of the next block.
    ///
    /// The first call, and every call that follows a wrap, extends instead of
    /// incrementing.
    pub fn advance(&mut self) {
        if !self.pending_extend {
            self.pending_extend = self.increment();
        }
        if self.pending_extend {
            self.extend_by_one_zero_byte();
            self.pending_extend = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: [u8; IV_LEN] = [0xAA; IV_LEN];

    fn advanced(times: usize) -> IvCounter {
        let mut counter = IvCounter::new(&BASE);
        for _ in 0..times {
            counter.advance();
        }
        counter
    }

    #[test]
    fn first_block_uses_base_unmodified() {
        let counter = IvCounter::new(&BASE);
        assert_eq!(counter.as_bytes(), &BASE[..]);
        assert!(counter.suffix().is_empty());
    }

    #[test]
    fn second_block_appends_zero() {
        assert_eq!(advanced(1).suffix(), &[0x00]);
    }

    #[test]
    fn then_counts_up_in_last_byte() {
        assert_eq!(advanced(2).suffix(), &[0x01]);
        assert_eq!(advanced(3).suffix(), &[0x02]);
        assert_eq!(advanced(256).suffix(), &[0xFF]);
    }

    #[test]
    fn wrap_extends_by_one_byte() {
        assert_eq!(advanced(257).suffix(), &[0x00, 0x00]);
        assert_eq!(advanced(258).suffix(), &[0x00, 0x01]);
        assert_eq!(advanced(512).suffix(), &[0x00, 0xFF]);
        assert_eq!(advanced(513).suffix(), &[0x00, 0x00, 0x00]);
    }

    #[test]
    fn base_is_never_touched() {
        let counter = advanced(600);
        assert_eq!(&counter.as_bytes()[..IV_LEN], &BASE[..]);
    }

    #[test]
    fn increment_reports_overflow() {
        let mut counter = IvCounter::new(&BASE);
        counter.extend_by_one_zero_byte();
        for _ in 0..255 {
            assert!(!counter.increment());
        }
        assert!(counter.increment());
        assert_eq!(counter.suffix(), &[0x00]);
    }
}
