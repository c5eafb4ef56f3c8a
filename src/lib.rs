//! ipmrs
//!
//! Streaming inverse probability of matching (IPM) for Rust.
//!
//! The IPM of a text is the inverse of the probability that two distinct
//! character positions, picked uniformly at random, hold the same character:
//!
//! ```text
//! IPM = N * (N - 1) / sum over characters c of count(c) * (count(c) - 1)
//! ```
//!
//! `ipmrs` computes it as an exactly reduced fraction for files of any size
//! and in any encoding the decoder capability knows, in one pass:
//!
//! **Read bytes → decode code points → count → reduce**
//!
//! The crate intentionally:
//! - does NOT hold decoded text in memory
//! - does NOT guess encodings
//! - does NOT approximate: any lossy or invalid byte sequence is an error
//!
//! # Example
//!
//! ```no_run
//! use ipmrs::{compute_ipm, IpmConfig, IpmError};
//!
//! fn main() -> Result<(), IpmError> {
//!     let config = IpmConfig::default().with_source_encoding("ISO-8859-2");
//!     let report = compute_ipm("novel.txt", &config)?;
//!
//!     println!("{} = {}", report.ipm, report.ipm.float_display());
//!     Ok(())
//! }
//! ```
//!
//! # Custom decoders
//!
//! The pipeline is generic over [`Codec`]. Any stateful byte → code point
//! converter can be plugged into [`compute_ipm_with`] or
//! [`count_occurrences`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod codec;
mod config;
mod decoder;
mod display;
mod error;
mod occurrence;
mod pipeline;
mod reader;
mod reduce;

mod buffer; // internal (fixed-capacity read buffer)

//
// Public surface
//

pub use codec::{
    Codec, CodePoint, Conversion, ConvertError, INTERNAL_ENCODING, Reencode, WhatwgCodec,
    WhatwgDecoder, WhatwgEncoder,
};
pub use config::{
    DEFAULT_DISPLAY_ENCODING, DEFAULT_READ_CAPACITY, DEFAULT_SOURCE_ENCODING, IpmConfig,
    MAX_READ_CAPACITY,
};
pub use decoder::{IncrementalDecoder, MAX_CARRY};
pub use display::{Occurrence, render_occurrences};
pub use error::{DecodeFailure, IpmError, NoMatchReason};
pub use occurrence::OccurrenceTable;
pub use pipeline::{IpmReport, compute_ipm, compute_ipm_with, count_occurrences};
pub use reader::ByteReader;
pub use reduce::{FLOAT_PRECISION, Ipm, Significant, gcd};
