//! Filtered symbol buffer used by the decoder.
//!
//! Raw input is pushed through a [`DecodeTable`]: recognised symbols are
//! appended after the carried-over symbols, everything else is dropped on
//! the spot. A cursor walks the valid symbols; `compact` moves whatever is
//! left to the front so it becomes the carry for the next read cycle.
//!
//! # Invariants
//! - `cursor <= symbols.len()`
//! - only valid symbols are ever stored

use crate::decode_table::{DecodeTable, Symbol};
use crate::group::GROUP_SYMBOLS;

/// An owned, cursor-indexed buffer of decoded symbols.
#[derive(Debug, Clone)]
pub struct SymbolBuffer {
    symbols: Vec<Symbol>,
    /// Next unread symbol
    cursor: usize,
}

impl SymbolBuffer {
    /// Create a buffer sized for `capacity` input bytes plus a carry.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            symbols: Vec::with_capacity(capacity + GROUP_SYMBOLS),
            cursor: 0,
        }
    }

    /// Append the valid symbols of `input`.
    ///
    /// Returns the number of bytes dropped as noise.
    pub fn push_filtered(&mut self, input: &[u8], table: &DecodeTable) -> usize {
        let before = self.symbols.len();
        self.symbols
            .extend(input.iter().filter_map(|&byte| table.get(byte)));
        input.len() - (self.symbols.len() - before)
    }

    /// Symbols between the cursor and the end of valid data.
    pub fn remaining(&self) -> usize {
        self.symbols.len() - self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Next symbol without advancing.
    pub fn peek(&self) -> Option<Symbol> {
        self.symbols.get(self.cursor).copied()
    }

    /// Next symbol, advancing past it.
    pub fn read(&mut self) -> Option<Symbol> {
        let symbol = self.peek()?;
        self.cursor += 1;
        Some(symbol)
    }

    /// Skip `count` symbols, clamped to the end of valid data.
    pub fn advance(&mut self, count: usize) {
        self.cursor = (self.cursor + count).min(self.symbols.len());
    }

    /// Unread symbols as a slice.
    pub fn unread(&self) -> &[Symbol] {
        &self.symbols[self.cursor..]
    }

    /// Drop consumed symbols and move the rest to the front.
    pub fn compact(&mut self) {
        self.symbols.drain(..self.cursor);
        self.cursor = 0;
    }

    /// Empty the buffer, returning how many unread symbols were discarded.
    pub fn clear(&mut self) -> usize {
        let discarded = self.remaining();
        self.symbols.clear();
        self.cursor = 0;
        discarded
    }
}
