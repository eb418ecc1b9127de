//! Output alphabets.
//!
//! An alphabet is 85 digit symbols (positions 0–84) plus up to two
//! abbreviation symbols: position 85 stands for a 4-byte all-zero block and
//! position 86 for a 4-byte all-space block.
//!
//! # Sources
//!
//! | Source  | Digits                      | Abbreviations               |
//! |---------|-----------------------------|-----------------------------|
//! | Default | `'!'..='u'` (0x21–0x75)     | `'z'` zero, `'y'` space     |
//! | Z85     | ZeroMQ Z85 table            | always off                  |
//! | Custom  | first 85 bytes of a file    | bytes 86 and 87, if present |
//!
//! Abbreviations can be switched off by the caller but never switched on for
//! a source that does not provide the symbol.

use crate::error::{ConfigError, Result};

/// Number of digit symbols in every alphabet.
pub const DIGIT_COUNT: usize = 85;

/// Longest meaningful custom alphabet: 85 digits plus two abbreviations.
pub const MAX_ALPHABET_LEN: usize = DIGIT_COUNT + 2;

/// Position of the all-zero abbreviation symbol.
pub const ZERO_RUN_POSITION: usize = 85;

/// Position of the all-space abbreviation symbol.
pub const SPACE_RUN_POSITION: usize = 86;

const DEFAULT_ZERO_RUN: u8 = b'z';
const DEFAULT_SPACE_RUN: u8 = b'y';

/// ZeroMQ Z85 digit table.
pub const Z85_DIGITS: &[u8; DIGIT_COUNT] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ.-:+=^!/*?&<>()[]{}@%$#";

const fn default_digits() -> [u8; DIGIT_COUNT] {
    let mut digits = [0u8; DIGIT_COUNT];
    let mut i = 0;
    while i < DIGIT_COUNT {
        digits[i] = b'!' + i as u8;
        i += 1;
    }
    digits
}

/// Which run-length abbreviations are in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbbreviationFlags {
    /// Four `0x00` bytes collapse to one symbol
    pub zero: bool,
    /// Four `0x20` bytes collapse to one symbol
    pub space: bool,
}

impl AbbreviationFlags {
    pub const ALL: Self = Self {
        zero: true,
        space: true,
    };

    pub const NONE: Self = Self {
        zero: false,
        space: false,
    };
}

impl Default for AbbreviationFlags {
    fn default() -> Self {
        Self::ALL
    }
}

/// An immutable symbol table for encoding.
///
/// # Invariants
/// - `digits` always holds 85 entries
/// - `zero_run`/`space_run` are `Some` only when that abbreviation is enabled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    digits: [u8; DIGIT_COUNT],
    zero_run: Option<u8>,
    space_run: Option<u8>,
}

impl Alphabet {
    /// The default Ascii85 alphabet with the requested abbreviations.
    pub fn ascii85(requested: AbbreviationFlags) -> Self {
        Self {
            digits: default_digits(),
            zero_run: requested.zero.then_some(DEFAULT_ZERO_RUN),
            space_run: requested.space.then_some(DEFAULT_SPACE_RUN),
        }
    }

    /// The Z85 alphabet. Abbreviations are never available.
    pub fn z85() -> Self {
        Self {
            digits: *Z85_DIGITS,
            zero_run: None,
            space_run: None,
        }
    }

    /// Build an alphabet from raw bytes.
    ///
    /// Only the first 87 bytes are considered. An 85-byte alphabet disables
    /// both abbreviations, an 86-byte one disables the space abbreviation.
    ///
    /// # Errors
    /// `ConfigError::AlphabetTooShort` if fewer than 85 bytes are given.
    pub fn from_bytes(bytes: &[u8], requested: AbbreviationFlags) -> Result<Self> {
        if bytes.len() < DIGIT_COUNT {
            return Err(ConfigError::AlphabetTooShort {
                actual: bytes.len(),
            }
            .into());
        }

        let mut digits = [0u8; DIGIT_COUNT];
        digits.copy_from_slice(&bytes[..DIGIT_COUNT]);

        let zero_run = bytes
            .get(ZERO_RUN_POSITION)
            .copied()
            .filter(|_| requested.zero);
        let space_run = bytes
            .get(SPACE_RUN_POSITION)
            .copied()
            .filter(|_| requested.space);

        Ok(Self {
            digits,
            zero_run,
            space_run,
        })
    }

    /// Symbol for a digit value.
    ///
    /// `digit` must be below 85.
    #[inline]
    pub fn symbol(&self, digit: u32) -> u8 {
        self.digits[digit as usize]
    }

    pub fn digits(&self) -> &[u8; DIGIT_COUNT] {
        &self.digits
    }

    pub fn zero_run(&self) -> Option<u8> {
        self.zero_run
    }

    pub fn space_run(&self) -> Option<u8> {
        self.space_run
    }

    /// Abbreviations actually in effect for this alphabet.
    pub fn abbreviations(&self) -> AbbreviationFlags {
        AbbreviationFlags {
            zero: self.zero_run.is_some(),
            space: self.space_run.is_some(),
        }
    }

    /// Every present symbol with its position, digits first.
    pub fn positions(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        let runs = [
            self.zero_run.map(|s| (ZERO_RUN_POSITION, s)),
            self.space_run.map(|s| (SPACE_RUN_POSITION, s)),
        ];
        self.digits
            .iter()
            .copied()
            .enumerate()
            .chain(runs.into_iter().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_default_table() {
        let alphabet = Alphabet::ascii85(AbbreviationFlags::ALL);
        assert_eq!(alphabet.symbol(0), b'!');
        assert_eq!(alphabet.symbol(84), b'u');
        assert_eq!(alphabet.zero_run(), Some(b'z'));
        assert_eq!(alphabet.space_run(), Some(b'y'));
        assert_eq!(alphabet.positions().count(), 87);
    }

    #[test]
    fn test_default_table_without_abbreviations() {
        let alphabet = Alphabet::ascii85(AbbreviationFlags {
            zero: true,
            space: false,
        });
        assert_eq!(alphabet.zero_run(), Some(b'z'));
        assert_eq!(alphabet.space_run(), None);
        assert_eq!(alphabet.positions().count(), 86);
    }

    #[test]
    fn test_z85_has_no_abbreviations() {
        let alphabet = Alphabet::z85();
        assert_eq!(alphabet.abbreviations(), AbbreviationFlags::NONE);
        assert_eq!(alphabet.symbol(0), b'0');
        assert_eq!(alphabet.symbol(84), b'#');
    }

    #[test]
    fn test_custom_too_short() {
        let result = Alphabet::from_bytes(&[b'a'; 84], AbbreviationFlags::ALL);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::AlphabetTooShort { actual: 84 }))
        ));
    }

    #[test]
    fn test_custom_length_controls_abbreviations() {
        let mut bytes: Vec<u8> = (0x80..0x80 + 85).collect();

        let alphabet = Alphabet::from_bytes(&bytes, AbbreviationFlags::ALL).unwrap();
        assert_eq!(alphabet.abbreviations(), AbbreviationFlags::NONE);

        bytes.push(b'Z');
        let alphabet = Alphabet::from_bytes(&bytes, AbbreviationFlags::ALL).unwrap();
        assert_eq!(alphabet.zero_run(), Some(b'Z'));
        assert_eq!(alphabet.space_run(), None);

        bytes.push(b'S');
        let alphabet = Alphabet::from_bytes(&bytes, AbbreviationFlags::ALL).unwrap();
        assert_eq!(alphabet.zero_run(), Some(b'Z'));
        assert_eq!(alphabet.space_run(), Some(b'S'));

        // Trailing bytes past the space symbol are ignored
        bytes.push(b'X');
        let alphabet = Alphabet::from_bytes(&bytes, AbbreviationFlags::ALL).unwrap();
        assert_eq!(alphabet.positions().count(), MAX_ALPHABET_LEN);
    }

    #[test]
    fn test_custom_respects_disabled_abbreviations() {
        let bytes: Vec<u8> = (0x80..0x80 + 87).collect();
        let alphabet = Alphabet::from_bytes(
            &bytes,
            AbbreviationFlags {
                zero: false,
                space: true,
            },
        )
        .unwrap();
        assert_eq!(alphabet.zero_run(), None);
        assert_eq!(alphabet.space_run(), Some(0x80 + 86));
    }
}
