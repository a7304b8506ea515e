//! Single-byte parity checksum
//!
//! XOR of every byte in the input. The fold is commutative and
//! associative, so `checksum(a ++ b) == checksum(a) ^ checksum(b)` and a
//! buffer can be fed to [`Checksum`] in any number of pieces.

/// Incremental parity accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Checksum {
    value: u8,
}

impl Checksum {
    /// Create an accumulator seeded at zero
    pub const fn new() -> Self {
        Self { value: 0 }
    }

    /// Fold more bytes into the checksum
    pub fn update(&mut self, data: &[u8]) {
        self.value = data.iter().fold(self.value, |acc, &b| acc ^ b);
    }

    /// Current checksum value
    pub fn finish(&self) -> u8 {
        self.value
    }
}

/// Compute the parity checksum of `data`
pub fn checksum(data: &[u8]) -> u8 {
    let mut sum = Checksum::new();
    sum.update(data);
    sum.finish()
}

/// Check `data` against an expected checksum
pub fn verify(data: &[u8], expected: u8) -> bool {
    checksum(data) == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_values() {
        assert_eq!(checksum(&[]), 0x00);
        assert_eq!(checksum(&[0x00, 0x01, 0x02, 0x03]), 0x00);
        assert_eq!(checksum(&[0xFF, 0xFF]), 0x00);
        assert_eq!(checksum(&[0x01, 0x02, 0x03]), 0x00);
        assert_eq!(checksum(&[0xA5]), 0xA5);
        assert_eq!(checksum(&[0xF0, 0x0F, 0x01]), 0xFE);
    }

    #[test]
    fn test_verify() {
        let data = [0x12, 0x34, 0x56];
        let sum = checksum(&data);
        assert!(verify(&data, sum));
        assert!(!verify(&data, sum.wrapping_add(1)));

        assert!(verify(&[], 0));
        assert!(!verify(&[], 1));
    }

    #[test]
    fn test_concatenation() {
        let a = [0xDE, 0xAD, 0xBE, 0xEF];
        let b = [0x01, 0x23, 0x45];
        let joined = [0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x23, 0x45];
        assert_eq!(checksum(&joined), checksum(&a) ^ checksum(&b));

        let mut sum = Checksum::new();
        sum.update(&a);
        sum.update(&b);
        assert_eq!(sum.finish(), checksum(&joined));
    }

    #[test]
    fn test_order_independent() {
        assert_eq!(checksum(&[0x11, 0x22, 0x44]), checksum(&[0x44, 0x11, 0x22]));
    }

    #[test]
    fn test_single_bit_flip_detected() {
        let data = [0x5A, 0x00, 0xC3, 0x7E];
        let original = checksum(&data);
        for byte in 0..data.len() {
            for bit in 0..8 {
                let mut flipped = data;
                flipped[byte] ^= 1 << bit;
                assert_ne!(checksum(&flipped), original);
            }
        }
    }
}
