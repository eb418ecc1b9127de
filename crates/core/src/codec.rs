//! The immutable codec built once per run.

use std::io::{Read, Write};

use crate::alphabet::Alphabet;
use crate::config::{CodecConfig, Mode};
use crate::decode::Decoder;
use crate::decode_table::DecodeTable;
use crate::encode::Encoder;
use crate::error::Result;
use crate::metrics::Metrics;

/// Alphabet, decode table and output format for a run.
///
/// Read-only after construction, so one value can serve any number of
/// sequential encode or decode sessions.
#[derive(Debug, Clone)]
pub struct Codec {
    mode: Mode,
    alphabet: Alphabet,
    table: DecodeTable,
    wrap_width: usize,
}

impl Codec {
    /// Load the alphabet and derive the decode table.
    ///
    /// # Errors
    /// Any alphabet error from [`CodecConfig::load_alphabet`], or
    /// `ConfigError::AmbiguousAlphabet` when decoding with repeated symbols.
    pub fn from_config(config: &CodecConfig) -> Result<Self> {
        let alphabet = config.load_alphabet()?;
        Self::new(config.mode, alphabet, config.wrap_width)
    }

    pub fn new(mode: Mode, alphabet: Alphabet, wrap_width: usize) -> Result<Self> {
        let table = DecodeTable::build(&alphabet, mode == Mode::Decode)?;
        Ok(Self {
            mode,
            alphabet,
            table,
            wrap_width,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn decode_table(&self) -> &DecodeTable {
        &self.table
    }

    pub fn wrap_width(&self) -> usize {
        self.wrap_width
    }

    /// Filter `reader` into `writer` in the configured direction.
    pub fn run<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<Metrics> {
        match self.mode {
            Mode::Encode => self.encode(reader, writer),
            Mode::Decode => self.decode(reader, writer),
        }
    }

    pub fn encode<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<Metrics> {
        Encoder::new(&self.alphabet, self.wrap_width).encode(reader, writer)
    }

    /// # Errors
    /// `ConfigError::AmbiguousAlphabet` if the alphabet repeats a symbol,
    /// plus everything [`Decoder::decode`] reports.
    pub fn decode<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<Metrics> {
        Decoder::new(&self.table)?.decode(reader, writer)
    }

    /// Encode an in-memory buffer.
    pub fn encode_to_vec(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(data.len() / 4 * 5 + 8);
        self.encode(data, &mut out)?;
        Ok(out)
    }

    /// Decode an in-memory buffer.
    pub fn decode_slice(&self, text: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(text.len() / 5 * 4 + 4);
        self.decode(text, &mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::AbbreviationFlags;
    use crate::error::{ConfigError, Error};

    #[test]
    fn test_scenarios() {
        let codec = Codec::from_config(&CodecConfig::default()).unwrap();

        assert_eq!(codec.encode_to_vec(&[0; 4]).unwrap(), b"z\n");
        assert_eq!(codec.encode_to_vec(&[0x20; 4]).unwrap(), b"y\n");
        assert_eq!(codec.encode_to_vec(&[1, 2, 3, 4, 5]).unwrap(), b"!<N?+\"T\n");

        assert_eq!(codec.decode_slice(b"z").unwrap(), [0; 4]);
        assert_eq!(codec.decode_slice(b"y").unwrap(), [0x20; 4]);
    }

    #[test]
    fn test_run_follows_mode() {
        let config = CodecConfig {
            mode: Mode::Decode,
            ..CodecConfig::default()
        };
        let codec = Codec::from_config(&config).unwrap();
        let mut out = Vec::new();
        codec.run(&b"9jqo^=9\n"[..], &mut out).unwrap();
        assert_eq!(out, b"Man X");
    }

    #[test]
    fn test_duplicate_alphabet_by_mode() {
        let mut bytes: Vec<u8> = (0x21..0x21 + 85).collect();
        bytes[84] = bytes[0];
        let alphabet = Alphabet::from_bytes(&bytes, AbbreviationFlags::ALL).unwrap();

        assert!(matches!(
            Codec::new(Mode::Decode, alphabet.clone(), 0),
            Err(Error::Config(ConfigError::AmbiguousAlphabet { .. }))
        ));

        let codec = Codec::new(Mode::Encode, alphabet, 0).unwrap();
        assert!(codec.decode_table().is_ambiguous());
        assert_eq!(codec.encode_to_vec(b"Man ").unwrap(), b"9jqo^\n");
        assert!(codec.decode_slice(b"9jqo^").is_err());
    }
}
