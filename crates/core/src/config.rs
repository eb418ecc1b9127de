//! Codec configuration.
//!
//! A `CodecConfig` is plain data produced by whatever front end drives the
//! codec. It is turned into an immutable [`Codec`](crate::codec::Codec)
//! once, before any data flows.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::alphabet::{AbbreviationFlags, Alphabet, MAX_ALPHABET_LEN};
use crate::error::{ConfigError, Result};

/// Direction of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Binary in, text out
    #[default]
    Encode,
    /// Text in, binary out
    Decode,
}

/// Where the alphabet comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AlphabetSource {
    /// `'!'..='u'` with `z`/`y` abbreviations
    #[default]
    Default,
    /// ZeroMQ Z85 table, never abbreviated
    Z85,
    /// Raw bytes read from a file
    Custom(PathBuf),
}

/// Everything the codec needs to know about a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    pub mode: Mode,

    /// Symbols per output line, 0 = no wrapping
    pub wrap_width: usize,

    pub alphabet: AlphabetSource,

    /// Never abbreviate all-zero blocks
    pub disable_zero_abbrev: bool,

    /// Never abbreviate all-space blocks
    pub disable_space_abbrev: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Encode,
            wrap_width: 0,
            alphabet: AlphabetSource::Default,
            disable_zero_abbrev: false,
            disable_space_abbrev: false,
        }
    }
}

impl CodecConfig {
    /// Abbreviations the caller asked for, before the alphabet has a say.
    pub fn requested_abbreviations(&self) -> AbbreviationFlags {
        AbbreviationFlags {
            zero: !self.disable_zero_abbrev,
            space: !self.disable_space_abbrev,
        }
    }

    /// Build the alphabet named by this configuration.
    ///
    /// # Errors
    /// - `ConfigError::AlphabetSource` if a custom file cannot be read
    /// - `ConfigError::AlphabetTooShort` if it holds fewer than 85 bytes
    pub fn load_alphabet(&self) -> Result<Alphabet> {
        let requested = self.requested_abbreviations();
        match &self.alphabet {
            AlphabetSource::Default => Ok(Alphabet::ascii85(requested)),
            AlphabetSource::Z85 => Ok(Alphabet::z85()),
            AlphabetSource::Custom(path) => {
                let bytes = read_alphabet_file(path)?;
                Alphabet::from_bytes(&bytes, requested)
            }
        }
    }
}

/// Read at most the first 87 bytes of an alphabet file.
fn read_alphabet_file(path: &Path) -> Result<Vec<u8>> {
    let source_error = |source| ConfigError::AlphabetSource {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(source_error)?;
    let mut bytes = Vec::with_capacity(MAX_ALPHABET_LEN);
    file.take(MAX_ALPHABET_LEN as u64)
        .read_to_end(&mut bytes)
        .map_err(source_error)?;
    Ok(bytes)
}
