//! Streaming encoder.
//!
//! Input is consumed four bytes at a time. Each block becomes either one
//! abbreviation symbol or a base-85 group; a final short block of `k` bytes
//! becomes `k + 1` symbols. All symbols pass through a [`LineWrapper`].

use std::io::{ErrorKind, Read, Write};

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::error::{Error, Result};
use crate::group::{encode_word, GROUP_BYTES, GROUP_SYMBOLS};
use crate::metrics::Metrics;
use crate::wrap::LineWrapper;

const ZERO_BLOCK: [u8; GROUP_BYTES] = [0x00; GROUP_BYTES];
const SPACE_BLOCK: [u8; GROUP_BYTES] = [0x20; GROUP_BYTES];

/// Encodes a byte stream with a fixed alphabet and wrap width.
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'a> {
    alphabet: &'a Alphabet,
    wrap_width: usize,
}

impl<'a> Encoder<'a> {
    pub fn new(alphabet: &'a Alphabet, wrap_width: usize) -> Self {
        Self {
            alphabet,
            wrap_width,
        }
    }

    /// Encode everything `reader` yields into `writer`.
    ///
    /// The output always ends with one line terminator and is flushed.
    ///
    /// # Errors
    /// `StreamError::Read`/`StreamError::Write` if either side fails.
    pub fn encode<R: Read, W: Write>(&self, mut reader: R, writer: W) -> Result<Metrics> {
        let mut metrics = Metrics::new();
        let mut out = LineWrapper::new(writer, self.wrap_width);

        loop {
            let mut block = [0u8; GROUP_BYTES];
            let len = read_block(&mut reader, &mut block)?;
            if len == 0 {
                break;
            }
            metrics.input_bytes += len as u64;

            self.encode_block(block, len, &mut out, &mut metrics)?;

            // A short block means the source is exhausted
            if len < GROUP_BYTES {
                break;
            }
        }

        // finish() adds the trailing terminator
        metrics.output_bytes = out.symbols_written() + out.breaks_written() + 1;
        out.finish()?;
        metrics.complete();

        debug!(
            input_bytes = metrics.input_bytes,
            output_bytes = metrics.output_bytes,
            groups = metrics.groups,
            zero_runs = metrics.zero_runs,
            space_runs = metrics.space_runs,
            "encode finished"
        );

        Ok(metrics)
    }

    /// Encode one block of `len` real bytes (the rest of `block` is zero).
    fn encode_block<W: Write>(
        &self,
        block: [u8; GROUP_BYTES],
        len: usize,
        out: &mut LineWrapper<W>,
        metrics: &mut Metrics,
    ) -> Result<()> {
        if len == GROUP_BYTES {
            if let Some(symbol) = self.abbreviation_for(&block) {
                if block == ZERO_BLOCK {
                    metrics.zero_runs += 1;
                } else {
                    metrics.space_runs += 1;
                }
                return out.write_symbol(symbol);
            }
            metrics.groups += 1;
        } else {
            metrics.tail_bytes = len as u64;
        }

        let digits = encode_word(block);
        let mut symbols = [0u8; GROUP_SYMBOLS];
        for (symbol, &digit) in symbols.iter_mut().zip(digits.iter()) {
            *symbol = self.alphabet.symbol(digit as u32);
        }

        out.write_symbols(&symbols[..len + 1])
    }

    fn abbreviation_for(&self, block: &[u8; GROUP_BYTES]) -> Option<u8> {
        match *block {
            ZERO_BLOCK => self.alphabet.zero_run(),
            SPACE_BLOCK => self.alphabet.space_run(),
            _ => None,
        }
    }
}

/// Fill `block` from `reader`, stopping early only at end of input.
///
/// Returns the number of bytes read.
fn read_block<R: Read>(reader: &mut R, block: &mut [u8; GROUP_BYTES]) -> Result<usize> {
    let mut filled = 0;
    while filled < GROUP_BYTES {
        match reader.read(&mut block[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::read(e)),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::AbbreviationFlags;

    fn encode_with(alphabet: &Alphabet, wrap: usize, data: &[u8]) -> String {
        let mut out = Vec::new();
        Encoder::new(alphabet, wrap).encode(data, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn encode(data: &[u8]) -> String {
        encode_with(&Alphabet::ascii85(AbbreviationFlags::ALL), 0, data)
    }

    #[test]
    fn test_zero_block_abbreviated() {
        assert_eq!(encode(&[0, 0, 0, 0]), "z\n");
        assert_eq!(encode(&[0; 16]), "zzzz\n");
    }

    #[test]
    fn test_space_block_abbreviated() {
        assert_eq!(encode(b"    "), "y\n");
    }

    #[test]
    fn test_abbreviations_disabled() {
        let alphabet = Alphabet::ascii85(AbbreviationFlags::NONE);
        assert_eq!(encode_with(&alphabet, 0, &[0; 4]), "!!!!!\n");
        assert_eq!(encode_with(&alphabet, 0, b"    "), "+<VdL\n");
    }

    #[test]
    fn test_partial_zero_block_not_abbreviated() {
        assert_eq!(encode(&[0, 0, 0]), "!!!!\n");
        assert_eq!(encode(&[0, 0, 0, 0, 1]), "z!<\n");
    }

    #[test]
    fn test_group_then_tail() {
        assert_eq!(encode(&[1, 2, 3, 4, 5]), "!<N?+\"T\n");
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(encode(b"M"), "9`\n");
        assert_eq!(encode(b"Ma"), "9jn\n");
        assert_eq!(encode(b"Man"), "9jqo\n");
        assert_eq!(encode(b"Man "), "9jqo^\n");
        assert_eq!(encode(b"Man X"), "9jqo^=9\n");
        assert_eq!(encode(&[0xFF; 4]), "s8W-!\n");
    }

    #[test]
    fn test_z85_reference_vector() {
        let data = [0x86, 0x4F, 0xD2, 0x6F, 0xB5, 0x59, 0xF7, 0x5B];
        assert_eq!(encode_with(&Alphabet::z85(), 0, &data), "HelloWorld\n");
        assert_eq!(encode_with(&Alphabet::z85(), 0, &[0; 4]), "00000\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(encode(b""), "\n");
    }

    #[test]
    fn test_wrap_counts_abbreviations() {
        let alphabet = Alphabet::ascii85(AbbreviationFlags::ALL);
        let data = [0u8; 4 * 7];
        assert_eq!(encode_with(&alphabet, 3, &data), "zzz\nzzz\nz\n");
    }

    #[test]
    fn test_wrap_splits_groups() {
        let alphabet = Alphabet::ascii85(AbbreviationFlags::ALL);
        assert_eq!(encode_with(&alphabet, 3, b"Man X"), "9jq\no^=\n9\n");
    }

    #[test]
    fn test_metrics() {
        let alphabet = Alphabet::ascii85(AbbreviationFlags::ALL);
        let mut out = Vec::new();
        let mut data = b"    ".to_vec();
        data.extend_from_slice(&[0; 4]);
        data.extend_from_slice(b"Man X");
        let metrics = Encoder::new(&alphabet, 4).encode(&data[..], &mut out).unwrap();

        assert_eq!(metrics.input_bytes, 13);
        assert_eq!(metrics.groups, 1);
        assert_eq!(metrics.zero_runs, 1);
        assert_eq!(metrics.space_runs, 1);
        assert_eq!(metrics.tail_bytes, 1);
        assert_eq!(metrics.output_bytes, out.len() as u64);
    }

    /// Reader that hands out one byte per call.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.0.split_first() {
                Some((&byte, rest)) if !buf.is_empty() => {
                    buf[0] = byte;
                    self.0 = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    #[test]
    fn test_short_reads_fill_blocks() {
        let alphabet = Alphabet::ascii85(AbbreviationFlags::ALL);
        let mut out = Vec::new();
        Encoder::new(&alphabet, 0)
            .encode(Trickle(&[0, 0, 0, 0, 1, 2, 3, 4, 5]), &mut out)
            .unwrap();
        assert_eq!(out, b"z!<N?+\"T\n");
    }
}
