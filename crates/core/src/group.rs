//! The base-85 group transform.
//!
//! Four bytes are read as a big-endian `u32` and written as five base-85
//! digits, most significant first. A partial trailing block of `k` bytes is
//! zero-padded on the right and only its first `k + 1` digits are kept.
//!
//! Decoding reverses this. A shortened group is padded with the highest
//! digit (84) before conversion, which rounds the value up into the range
//! whose top `k` bytes equal the original block, then only those `k` bytes
//! are kept.
//!
//! # Example
//! ```
//! use a85_core::group::{decode_digits, encode_word};
//!
//! let digits = encode_word([b'M', b'a', b'n', b' ']);
//! assert_eq!(digits, [24, 73, 80, 78, 61]);
//! assert_eq!(decode_digits(digits), Some(u32::from_be_bytes(*b"Man ")));
//! ```

/// Raw bytes per group.
pub const GROUP_BYTES: usize = 4;

/// Symbols per full group.
pub const GROUP_SYMBOLS: usize = 5;

/// Highest digit value, used to pad shortened groups.
pub const MAX_DIGIT: u8 = 84;

const BASE: u32 = 85;

/// Split a block into five base-85 digits, most significant first.
pub fn encode_word(block: [u8; GROUP_BYTES]) -> [u8; GROUP_SYMBOLS] {
    let mut word = u32::from_be_bytes(block);
    let mut digits = [0u8; GROUP_SYMBOLS];
    for digit in digits.iter_mut().rev() {
        *digit = (word % BASE) as u8;
        word /= BASE;
    }
    digits
}

/// Accumulate five digits into a 64-bit value without range checking.
#[inline]
pub fn accumulate(digits: [u8; GROUP_SYMBOLS]) -> u64 {
    digits
        .iter()
        .fold(0u64, |value, &digit| value * BASE as u64 + digit as u64)
}

/// Combine five digits into a word.
///
/// Returns `None` if the value does not fit in 32 bits.
pub fn decode_digits(digits: [u8; GROUP_SYMBOLS]) -> Option<u32> {
    u32::try_from(accumulate(digits)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_words() {
        assert_eq!(encode_word([0, 0, 0, 0]), [0, 0, 0, 0, 0]);
        // "s8W-!" in the default alphabet
        assert_eq!(encode_word([0xFF; 4]), [82, 23, 54, 12, 0]);
        // "!<N?+"
        assert_eq!(encode_word([1, 2, 3, 4]), [0, 27, 45, 30, 10]);
    }

    #[test]
    fn test_decode_max_word() {
        assert_eq!(decode_digits([82, 23, 54, 12, 0]), Some(u32::MAX));
    }

    #[test]
    fn test_decode_overflow() {
        // One past u32::MAX
        assert_eq!(decode_digits([82, 23, 54, 12, 1]), None);
        assert_eq!(decode_digits([84; 5]), None);
        assert_eq!(accumulate([84; 5]), 85u64.pow(5) - 1);
    }

    #[test]
    fn test_partial_groups_recover_prefix() {
        // Exhaustive over the top byte with a few trailing patterns
        for len in 1..GROUP_BYTES {
            for first in 0..=255u8 {
                let mut block = [0u8; GROUP_BYTES];
                block[0] = first;
                block[1..len].fill(0xFF);

                let mut padded = [MAX_DIGIT; GROUP_SYMBOLS];
                padded[..len + 1].copy_from_slice(&encode_word(block)[..len + 1]);
                let word = decode_digits(padded).expect("padded tail must fit in 32 bits");

                assert_eq!(&word.to_be_bytes()[..len], &block[..len]);
            }
        }
    }
}
