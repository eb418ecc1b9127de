//! a85-core: streaming Base85/Ascii85 codec engine
//!
//! This library converts arbitrary binary data to printable text and back:
//! - Every 4 bytes become 5 symbols from an 85-symbol alphabet
//! - All-zero and all-space blocks may collapse to a single symbol
//! - Encoded output is wrapped at a fixed line width
//! - Decoding skips noise and carries partial groups across reads
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `alphabet`: Default, Z85 and custom symbol tables
//! - `decode_table`: Byte to symbol lookup with duplicate detection
//! - `group`: The 4-byte ↔ 5-digit transform
//! - `wrap`: Line-wrapping output sink
//! - `encode`: Streaming encoder
//! - `buffer`: Filtered symbol buffer with carry
//! - `decode`: Streaming decoder
//! - `config` / `codec`: Run configuration and the immutable codec
//! - `metrics`: Observable run statistics
//!
//! # Example
//! ```
//! use a85_core::{Codec, CodecConfig};
//!
//! let codec = Codec::from_config(&CodecConfig::default()).unwrap();
//! let text = codec.encode_to_vec(b"Man X").unwrap();
//! assert_eq!(text, b"9jqo^=9\n");
//! assert_eq!(codec.decode_slice(&text).unwrap(), b"Man X");
//! ```
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and returned
//! - **Bounded memory**: Decoding holds one read cycle plus a 4-symbol carry
//! - **Immutable setup**: Alphabets and tables are built once and shared

pub mod alphabet;
pub mod buffer;
pub mod codec;
pub mod config;
pub mod decode;
pub mod decode_table;
pub mod encode;
pub mod error;
pub mod group;
pub mod metrics;
pub mod wrap;

// Re-export commonly used types
pub use alphabet::{AbbreviationFlags, Alphabet};
pub use codec::Codec;
pub use config::{AlphabetSource, CodecConfig, Mode};
pub use decode::Decoder;
pub use decode_table::DecodeTable;
pub use encode::Encoder;
pub use error::{Error, Result};
pub use metrics::Metrics;
