//! The decoder capability.
//!
//! The pipeline never touches a concrete character-set library. It talks to
//! a [`Codec`], which opens conversion contexts between a named encoding and
//! the internal code-point representation:
//!
//! - [`Conversion`] - bytes in a source encoding -> code points, stateful
//!   across calls
//! - [`Reencode`] - code points -> bytes in a display encoding
//!
//! [`WhatwgCodec`] is the built-in implementation backed by `encoding_rs`.

mod whatwg;

use thiserror::Error;

use crate::error::{DecodeFailure, IpmError};

pub use whatwg::{WhatwgCodec, WhatwgDecoder, WhatwgEncoder};

/// The internal fixed-width code point.
///
/// A `char` holds every Unicode scalar value in 32 bits, which is the
/// narrowest fixed width covering the whole target alphabet.
pub type CodePoint = char;

/// Name of the internal encoding, as reported in diagnostics.
pub const INTERNAL_ENCODING: &str = "UCS-4";

/// Failures reported by a conversion context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The input holds a sequence that is invalid in the source encoding.
    #[error("invalid sequence of {len} byte(s) at input index {at}")]
    InvalidSequence {
        /// Index into the input slice where the sequence starts.
        at: usize,
        /// Length of the sequence.
        len: usize,
    },

    /// The conversion would have replaced characters with substitutes.
    #[error("{count} character(s) would be converted in a non-reversible way")]
    Lossy {
        /// Number of affected characters.
        count: usize,
    },

    /// The stream ended inside a multi-byte sequence.
    #[error("{remaining} byte(s) do not form a complete character")]
    Incomplete {
        /// Number of dangling bytes.
        remaining: usize,
    },

    /// The output size cannot be represented.
    #[error("output size exceeds addressable memory")]
    Capacity,

    /// The context was used after the end of its stream.
    #[error("conversion used after end of stream")]
    Finished,

    /// The context could not be released cleanly.
    #[error("{0}")]
    Close(String),
}

impl ConvertError {
    /// Lifts a context failure into the pipeline error taxonomy.
    ///
    /// `offset` is the stream position of the first byte handed to the
    /// failing call.
    pub(crate) fn into_ipm_error(self, offset: u64) -> IpmError {
        match self {
            ConvertError::InvalidSequence { at, len } => IpmError::Decode {
                kind: DecodeFailure::InvalidSequence { len },
                offset: offset + at as u64,
            },
            ConvertError::Lossy { count } => IpmError::Decode {
                kind: DecodeFailure::Lossy { count },
                offset,
            },
            ConvertError::Incomplete { remaining } => IpmError::Decode {
                kind: DecodeFailure::Incomplete { remaining },
                offset,
            },
            ConvertError::Capacity => IpmError::Overflow {
                stage: "conversion buffer size",
            },
            ConvertError::Finished | ConvertError::Close(_) => IpmError::ResourceRelease {
                message: self.to_string(),
            },
        }
    }
}

/// An open conversion context from a source encoding to code points.
///
/// The context may keep partial sequences between calls. Whatever it does
/// not keep must be left unconsumed: the return value of [`convert`] is the
/// number of input bytes consumed, and the caller prepends the rest to the
/// next call.
///
/// [`convert`]: Conversion::convert
pub trait Conversion {
    /// Converts `input`, appending whole code points to `output`.
    ///
    /// `last` marks the final call for the stream. Returns the number of
    /// input bytes consumed.
    fn convert(
        &mut self,
        input: &[u8],
        output: &mut Vec<CodePoint>,
        last: bool,
    ) -> Result<usize, ConvertError>;

    /// Releases the context.
    fn close(self) -> Result<(), ConvertError>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// An open conversion context from code points to a display encoding.
pub trait Reencode {
    /// Encodes a single code point, appending its bytes to `output`.
    ///
    /// On error nothing is appended.
    fn encode(&mut self, code_point: CodePoint, output: &mut Vec<u8>) -> Result<(), ConvertError>;

    /// Releases the context.
    fn close(self) -> Result<(), ConvertError>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// A source of conversion contexts.
pub trait Codec {
    /// Context type produced by [`Codec::open_decoder`].
    type Decoder: Conversion;

    /// Context type produced by [`Codec::open_encoder`].
    type Encoder: Reencode;

    /// Opens a context converting from `label` to code points.
    fn open_decoder(&self, label: &str) -> Result<Self::Decoder, IpmError>;

    /// Opens a context converting from code points to `label`.
    fn open_encoder(&self, label: &str) -> Result<Self::Encoder, IpmError>;
}
