//! Reverse lookup from input bytes to alphabet symbols.

use tracing::warn;

use crate::alphabet::{Alphabet, SPACE_RUN_POSITION, ZERO_RUN_POSITION};
use crate::error::{ConfigError, Result};

/// A recognised input symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// Base-85 digit value, 0–84
    Digit(u8),
    /// Stands for four `0x00` bytes
    ZeroRun,
    /// Stands for four `0x20` bytes
    SpaceRun,
}

impl Symbol {
    fn from_position(position: usize) -> Self {
        match position {
            ZERO_RUN_POSITION => Symbol::ZeroRun,
            SPACE_RUN_POSITION => Symbol::SpaceRun,
            digit => Symbol::Digit(digit as u8),
        }
    }
}

/// Two alphabet positions that map to the same byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateSymbol {
    pub symbol: u8,
    /// Position that kept the byte
    pub first: usize,
    /// Position left unassigned
    pub second: usize,
}

/// Maps every byte value to a symbol or to nothing.
///
/// A table built from an alphabet with repeated symbols is ambiguous: it can
/// still be inspected but a decoder refuses it.
#[derive(Debug, Clone)]
pub struct DecodeTable {
    entries: [Option<Symbol>; 256],
    duplicates: Vec<DuplicateSymbol>,
}

impl DecodeTable {
    /// Build the lookup table for `alphabet`.
    ///
    /// Positions are assigned in order 0..=84, then the zero and space
    /// abbreviations. When a byte repeats, the earlier position keeps it.
    ///
    /// # Errors
    /// `ConfigError::AmbiguousAlphabet` on the first repeated byte if
    /// `decode_mode` is set. Otherwise repeats are only logged.
    pub fn build(alphabet: &Alphabet, decode_mode: bool) -> Result<Self> {
        let mut entries = [None; 256];
        let mut owners: [Option<usize>; 256] = [None; 256];
        let mut duplicates = Vec::new();

        for (position, symbol) in alphabet.positions() {
            let slot = symbol as usize;
            match owners[slot] {
                Some(first) => {
                    if decode_mode {
                        return Err(ConfigError::AmbiguousAlphabet {
                            symbol,
                            first,
                            second: position,
                        }
                        .into());
                    }
                    warn!(
                        symbol = %symbol.escape_ascii(),
                        first,
                        second = position,
                        "duplicate alphabet symbol; decoding with this alphabet is unsupported"
                    );
                    duplicates.push(DuplicateSymbol {
                        symbol,
                        first,
                        second: position,
                    });
                }
                None => {
                    owners[slot] = Some(position);
                    entries[slot] = Some(Symbol::from_position(position));
                }
            }
        }

        if entries[b'\n' as usize].is_some() {
            warn!("alphabet contains the line terminator; wrapped output will not decode");
        }

        Ok(Self {
            entries,
            duplicates,
        })
    }

    /// Look up one input byte.
    #[inline]
    pub fn get(&self, byte: u8) -> Option<Symbol> {
        self.entries[byte as usize]
    }

    pub fn duplicates(&self) -> &[DuplicateSymbol] {
        &self.duplicates
    }

    pub fn is_ambiguous(&self) -> bool {
        !self.duplicates.is_empty()
    }
}
