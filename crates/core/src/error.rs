//! Error types for the a85 codec.
//!
//! All operations return structured errors rather than panicking.
//! Every failure is fatal for the run that hit it; bytes already written to
//! the sink stay written. Noise bytes met while decoding are not errors at
//! all and never show up here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// Each variant corresponds to a failure domain:
/// - Config: detected before any data is streamed
/// - Stream: the input source or output sink failed
/// - Format: the encoded text cannot be decoded
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration or alphabet
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Reading the input or writing the output failed
    #[error("stream error: {0}")]
    Stream(#[from] StreamError),

    /// Malformed encoded data
    #[error("format error: {0}")]
    Format(#[from] FormatError),
}

/// Configuration errors, raised before streaming starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown flag, missing flag value or surplus positional argument
    #[error("{0}")]
    InvalidArgument(String),

    /// Wrap width is not a non-negative integer
    #[error("invalid wrap width: {0:?}")]
    InvalidWrap(String),

    /// Custom alphabet file could not be opened or read
    #[error("cannot read alphabet {}: {source}", path.display())]
    AlphabetSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Custom alphabet holds fewer than the 85 required symbols
    #[error("alphabet too short: need at least 85 symbols, got {actual}")]
    AlphabetTooShort { actual: usize },

    /// Two alphabet positions share a byte, so decoding would be ambiguous
    #[error("ambiguous alphabet: symbol {symbol:#04x} appears at positions {first} and {second}")]
    AmbiguousAlphabet { symbol: u8, first: usize, second: usize },
}

/// I/O failures on the data streams.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Input or output path could not be opened
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading from the input source failed
    #[error("read failed: {0}")]
    Read(#[source] io::Error),

    /// Writing to the output sink failed
    #[error("write failed: {0}")]
    Write(#[source] io::Error),
}

/// Decode-time format errors.
///
/// `offset` is the output byte position where the group would have started.
#[derive(Debug, Error)]
pub enum FormatError {
    /// An abbreviation symbol showed up between the digits of a group
    #[error("{run} abbreviation symbol inside a group at output offset {offset}")]
    AbbreviationInGroup { run: &'static str, offset: u64 },

    /// The five digits of a group add up to more than 32 bits
    #[error("group value {value} out of range at output offset {offset}")]
    GroupOverflow { value: u64, offset: u64 },
}

impl Error {
    /// Wrap an I/O error raised while reading input.
    pub fn read(err: io::Error) -> Self {
        Error::Stream(StreamError::Read(err))
    }

    /// Wrap an I/O error raised while writing output.
    pub fn write(err: io::Error) -> Self {
        Error::Stream(StreamError::Write(err))
    }
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: Error = ConfigError::AlphabetTooShort { actual: 12 }.into();
        assert!(matches!(
            err,
            Error::Config(ConfigError::AlphabetTooShort { actual: 12 })
        ));
        assert_eq!(
            err.to_string(),
            "configuration error: alphabet too short: need at least 85 symbols, got 12"
        );
    }

    #[test]
    fn test_stream_helpers() {
        let err = Error::write(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        assert!(matches!(err, Error::Stream(StreamError::Write(_))));

        let err = Error::read(io::Error::new(io::ErrorKind::Other, "gone"));
        assert_eq!(err.to_string(), "stream error: read failed: gone");
    }

    #[test]
    fn test_ambiguous_alphabet_message() {
        let err = ConfigError::AmbiguousAlphabet {
            symbol: b'A',
            first: 3,
            second: 40,
        };
        assert_eq!(
            err.to_string(),
            "ambiguous alphabet: symbol 0x41 appears at positions 3 and 40"
        );
    }
}
