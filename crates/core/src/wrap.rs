//! Line-wrapping sink for encoded symbols.
//!
//! # Rules
//! - A `\n` is written before a symbol once `width` symbols sit on the
//!   current line, so no line ever ends with an empty break
//! - Abbreviation symbols count as one unit like any digit
//! - `width == 0` never breaks
//! - `finish` writes exactly one trailing `\n`

use std::io::Write;

use crate::error::{Error, Result};

/// Writes symbols to `inner`, breaking lines every `width` symbols.
///
/// # Invariants
/// - `column` never exceeds `width` when wrapping is enabled
#[derive(Debug)]
pub struct LineWrapper<W: Write> {
    inner: W,
    /// Symbols per line, 0 = unlimited
    width: usize,
    /// Symbols written since the last break
    column: usize,
    /// Symbols written in total
    written: u64,
    /// Line breaks written, including the trailing one
    breaks: u64,
}

impl<W: Write> LineWrapper<W> {
    pub fn new(inner: W, width: usize) -> Self {
        Self {
            inner,
            width,
            column: 0,
            written: 0,
            breaks: 0,
        }
    }

    /// Write one payload symbol.
    pub fn write_symbol(&mut self, symbol: u8) -> Result<()> {
        self.write_symbols(&[symbol])
    }

    /// Write a run of payload symbols, splitting across lines as needed.
    pub fn write_symbols(&mut self, mut symbols: &[u8]) -> Result<()> {
        if self.width == 0 {
            self.column += symbols.len();
            self.written += symbols.len() as u64;
            return self.inner.write_all(symbols).map_err(Error::write);
        }

        while !symbols.is_empty() {
            if self.column == self.width {
                self.inner.write_all(b"\n").map_err(Error::write)?;
                self.breaks += 1;
                self.column = 0;
            }

            let take = symbols.len().min(self.width - self.column);
            self.inner
                .write_all(&symbols[..take])
                .map_err(Error::write)?;
            self.column += take;
            self.written += take as u64;
            symbols = &symbols[take..];
        }

        Ok(())
    }

    /// Number of payload symbols written so far.
    pub fn symbols_written(&self) -> u64 {
        self.written
    }

    /// Number of line breaks written so far.
    pub fn breaks_written(&self) -> u64 {
        self.breaks
    }

    /// Write the trailing line terminator, flush, and hand back the sink.
    pub fn finish(mut self) -> Result<W> {
        self.inner.write_all(b"\n").map_err(Error::write)?;
        self.breaks += 1;
        self.inner.flush().map_err(Error::write)?;
        Ok(self.inner)
    }
}
