//! Streaming decoder with carry-over between read cycles.
//!
//! # Read cycle
//!
//! ```text
//!   carry (0-4)   new chunk, filtered
//! +-------------+---------------------------+
//! | s s         | s z s s s s s y y s s     |
//! +-------------+---------------------------+
//!   ^ cursor
//! ```
//!
//! 1. New input is filtered through the decode table and appended after
//!    the carry; noise bytes vanish here.
//! 2. Abbreviation symbols at the cursor expand to four bytes each.
//! 3. While at least five symbols remain, one group is decoded to four
//!    bytes, then step 2 runs again.
//! 4. The 0–4 leftover symbols move to the front and wait for the next
//!    chunk.
//!
//! At end of stream a non-empty carry of `n` symbols is padded with the
//! highest digit and yields `n - 1` bytes.
//!
//! # Memory Bounds
//!
//! The buffer never holds more than `capacity + 4` symbols: larger inputs
//! handed to [`Decoder::feed`] are processed in `capacity`-sized cycles.

use std::io::{ErrorKind, Read, Write};

use tracing::{debug, trace};

use crate::buffer::SymbolBuffer;
use crate::decode_table::{DecodeTable, Symbol};
use crate::error::{ConfigError, Error, FormatError, Result};
use crate::group::{accumulate, GROUP_BYTES, GROUP_SYMBOLS, MAX_DIGIT};
use crate::metrics::Metrics;

/// Input bytes consumed per read cycle unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 64 * 1024;

/// A single decode session.
///
/// Owns its carry buffer; the decode table is shared read-only.
#[derive(Debug)]
pub struct Decoder<'a> {
    table: &'a DecodeTable,
    buffer: SymbolBuffer,
    /// Maximum input bytes per cycle
    capacity: usize,
    metrics: Metrics,
}

impl<'a> Decoder<'a> {
    /// Start a session with the default cycle size.
    ///
    /// # Errors
    /// `ConfigError::AmbiguousAlphabet` if `table` was built from an
    /// alphabet with repeated symbols.
    pub fn new(table: &'a DecodeTable) -> Result<Self> {
        Self::with_capacity(table, DEFAULT_CAPACITY)
    }

    /// Start a session reading at most `capacity` bytes per cycle.
    pub fn with_capacity(table: &'a DecodeTable, capacity: usize) -> Result<Self> {
        if let Some(dup) = table.duplicates().first() {
            return Err(ConfigError::AmbiguousAlphabet {
                symbol: dup.symbol,
                first: dup.first,
                second: dup.second,
            }
            .into());
        }

        let capacity = capacity.max(1);
        Ok(Self {
            table,
            buffer: SymbolBuffer::with_capacity(capacity),
            capacity,
            metrics: Metrics::new(),
        })
    }

    /// Symbols carried over to the next cycle.
    pub fn carry_len(&self) -> usize {
        self.buffer.remaining()
    }

    /// Decode everything `reader` yields into `writer`, then finalize.
    ///
    /// # Errors
    /// Stream errors from either side, or a `FormatError` for malformed
    /// groups. Output written before the error stays written.
    pub fn decode<R: Read, W: Write>(mut self, mut reader: R, mut writer: W) -> Result<Metrics> {
        let mut chunk = vec![0u8; self.capacity];
        loop {
            let len = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::read(e)),
            };
            self.cycle(&chunk[..len], &mut writer)?;
        }
        self.finish(&mut writer)
    }

    /// Push a chunk of encoded text of any size.
    pub fn feed<W: Write>(&mut self, input: &[u8], out: &mut W) -> Result<()> {
        for chunk in input.chunks(self.capacity) {
            self.cycle(chunk, out)?;
        }
        Ok(())
    }

    /// Decode the carried-over tail and close the session.
    pub fn finish<W: Write>(mut self, out: &mut W) -> Result<Metrics> {
        let carry = self.buffer.remaining();
        if carry > 0 {
            let digits = self.group_digits(carry)?;
            self.emit(digits, carry - 1, out)?;
            self.metrics.tail_bytes = (carry - 1) as u64;
            if carry == 1 {
                debug!("single trailing symbol carries no data; discarded");
            }
        }
        self.buffer.clear();

        out.flush().map_err(Error::write)?;
        self.metrics.complete();

        debug!(
            input_bytes = self.metrics.input_bytes,
            output_bytes = self.metrics.output_bytes,
            groups = self.metrics.groups,
            skipped_bytes = self.metrics.skipped_bytes,
            read_cycles = self.metrics.read_cycles,
            "decode finished"
        );

        Ok(self.metrics)
    }

    /// One read cycle over at most `capacity` bytes.
    fn cycle<W: Write>(&mut self, chunk: &[u8], out: &mut W) -> Result<()> {
        self.metrics.read_cycles += 1;
        self.metrics.input_bytes += chunk.len() as u64;

        let skipped = self.buffer.push_filtered(chunk, self.table);
        if skipped > 0 {
            self.metrics.skipped_bytes += skipped as u64;
            trace!(skipped, "dropped bytes outside the alphabet");
        }

        self.expand_runs(out)?;
        while self.buffer.remaining() >= GROUP_SYMBOLS {
            let digits = self.group_digits(GROUP_SYMBOLS)?;
            self.buffer.advance(GROUP_SYMBOLS);
            self.emit(digits, GROUP_BYTES, out)?;
            self.metrics.groups += 1;
            self.expand_runs(out)?;
        }

        self.buffer.compact();
        trace!(carry = self.buffer.remaining(), "cycle done");
        Ok(())
    }

    /// Expand abbreviation symbols at the cursor until a digit or the end.
    fn expand_runs<W: Write>(&mut self, out: &mut W) -> Result<()> {
        while let Some(symbol) = self.buffer.peek() {
            let block = match symbol {
                Symbol::ZeroRun => {
                    self.metrics.zero_runs += 1;
                    [0x00; GROUP_BYTES]
                }
                Symbol::SpaceRun => {
                    self.metrics.space_runs += 1;
                    [0x20; GROUP_BYTES]
                }
                Symbol::Digit(_) => break,
            };
            self.buffer.advance(1);
            self.write(out, &block)?;
        }
        Ok(())
    }

    /// Digits of the next `len` symbols, padded with the highest digit.
    ///
    /// Does not advance the cursor.
    fn group_digits(&self, len: usize) -> Result<[u8; GROUP_SYMBOLS]> {
        let mut digits = [MAX_DIGIT; GROUP_SYMBOLS];
        for (digit, symbol) in digits.iter_mut().zip(&self.buffer.unread()[..len]) {
            *digit = match *symbol {
                Symbol::Digit(value) => value,
                Symbol::ZeroRun => return Err(self.abbreviation_in_group("zero-run")),
                Symbol::SpaceRun => return Err(self.abbreviation_in_group("space-run")),
            };
        }
        Ok(digits)
    }

    fn abbreviation_in_group(&self, run: &'static str) -> Error {
        FormatError::AbbreviationInGroup {
            run,
            offset: self.metrics.output_bytes,
        }
        .into()
    }

    /// Write the top `amount` bytes of a group value.
    fn emit<W: Write>(&mut self, digits: [u8; GROUP_SYMBOLS], amount: usize, out: &mut W) -> Result<()> {
        let value = accumulate(digits);
        let word = u32::try_from(value).map_err(|_| FormatError::GroupOverflow {
            value,
            offset: self.metrics.output_bytes,
        })?;
        self.write(out, &word.to_be_bytes()[..amount])
    }

    fn write<W: Write>(&mut self, out: &mut W, bytes: &[u8]) -> Result<()> {
        out.write_all(bytes).map_err(Error::write)?;
        self.metrics.output_bytes += bytes.len() as u64;
        Ok(())
    }
}
