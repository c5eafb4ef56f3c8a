//! The Incremental Decoder - converts consecutive chunks into code points.
//!
//! A multi-byte character can straddle two reads. Whatever trailing bytes
//! the conversion context leaves unconsumed are carried over and stitched
//! in front of the next chunk, so the decoded sequence does not depend on
//! where the chunk boundaries fall.
//!
//! # Example
//!
//! ```
//! use ipmrs::{Codec, IncrementalDecoder, WhatwgCodec};
//!
//! let euro = "€".as_bytes();
//! let mut decoder = IncrementalDecoder::new(WhatwgCodec.open_decoder("UTF-8")?);
//! let mut out = Vec::new();
//!
//! decoder.push(&euro[..1], &mut out)?;
//! decoder.push(&euro[1..], &mut out)?;
//! decoder.finish(&mut out)?;
//!
//! assert_eq!(out, vec!['€']);
//! # Ok::<(), ipmrs::IpmError>(())
//! ```

use bytes::{Buf, BytesMut};

use crate::codec::{CodePoint, ConvertError, Conversion};
use crate::error::{DecodeFailure, IpmError};

/// Upper bound on carried bytes.
///
/// Longer than any multi-byte sequence of any supported encoding. A carry
/// that grows past this is not a split character but malformed input.
pub const MAX_CARRY: usize = 16;

/// A decoder that turns a chunked byte stream into code points.
///
/// `IncrementalDecoder` owns one conversion context for the whole stream and
/// never recreates it, since that would discard partial sequences buffered
/// inside the context.
///
/// # Streaming API
///
/// - Call `push()` with each chunk in stream order
/// - Call `finish()` once after the last chunk
/// - Call `close()` to release the conversion context
///
/// After `finish()` any further `push()` is an error.
#[derive(Debug)]
pub struct IncrementalDecoder<D> {
    conversion: D,
    carry: BytesMut,
    offset: u64,
    decoded: u64,
    finished: bool,
}

impl<D: Conversion> IncrementalDecoder<D> {
    /// Creates a decoder around an open conversion context.
    pub fn new(conversion: D) -> Self {
        Self {
            conversion,
            carry: BytesMut::with_capacity(2 * MAX_CARRY),
            offset: 0,
            decoded: 0,
            finished: false,
        }
    }

    /// Decodes `chunk`, appending whole code points to `out`.
    ///
    /// Returns the number of code points appended.
    ///
    /// # Processing Flow
    ///
    /// 1. If bytes were carried from the previous chunk, stitch them to the
    ///    head of `chunk` and convert until the carried sequence completes
    /// 2. Convert the rest of `chunk` directly, without copying it
    /// 3. Keep any unconsumed tail as the new carry
    pub fn push(&mut self, chunk: &[u8], out: &mut Vec<CodePoint>) -> Result<usize, IpmError> {
        if self.finished {
            return Err(ConvertError::Finished.into_ipm_error(self.offset));
        }

        let before = out.len();
        let mut rest = chunk;

        if !self.carry.is_empty() {
            let carried = self.carry.len();
            let take = rest.len().min(MAX_CARRY);
            self.carry.extend_from_slice(&rest[..take]);

            let consumed = self.convert_carry(out, false)?;
            if consumed < carried {
                // Still inside the carried sequence
                if take < rest.len() || self.carry.len() > MAX_CARRY {
                    return Err(self.overlong_carry());
                }
                return Ok(self.appended(out, before));
            }

            let used = consumed - carried;
            self.carry.clear();
            rest = &rest[used..];
        }

        let consumed = self
            .conversion
            .convert(rest, out, false)
            .map_err(|e| e.into_ipm_error(self.offset))?;
        self.offset += consumed as u64;

        let tail = &rest[consumed..];
        self.carry.extend_from_slice(tail);
        if self.carry.len() > MAX_CARRY {
            return Err(self.overlong_carry());
        }

        Ok(self.appended(out, before))
    }

    /// Flushes the conversion context at end of input.
    ///
    /// Carried bytes that still do not form a whole code point are a
    /// [`DecodeFailure::Incomplete`] error.
    pub fn finish(&mut self, out: &mut Vec<CodePoint>) -> Result<usize, IpmError> {
        if self.finished {
            return Ok(0);
        }

        let before = out.len();
        self.convert_carry(out, true)?;
        self.finished = true;

        if !self.carry.is_empty() {
            return Err(IpmError::Decode {
                kind: DecodeFailure::Incomplete {
                    remaining: self.carry.len(),
                },
                offset: self.offset,
            });
        }

        Ok(self.appended(out, before))
    }

    /// Releases the conversion context.
    ///
    /// Failures are reported as [`IpmError::ResourceRelease`].
    pub fn close(self) -> Result<(), IpmError> {
        self.conversion
            .close()
            .map_err(|e| IpmError::ResourceRelease {
                message: e.to_string(),
            })
    }

    /// Returns the number of bytes consumed by the conversion so far.
    ///
    /// This is also the stream position of the first carried byte.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the number of code points produced so far.
    pub fn decoded(&self) -> u64 {
        self.decoded
    }

    /// Returns the number of bytes waiting for the rest of their sequence.
    pub fn carried(&self) -> usize {
        self.carry.len()
    }

    /// Returns true once `finish()` has run.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Converts the carry buffer, dropping whatever the context consumed.
    fn convert_carry(&mut self, out: &mut Vec<CodePoint>, last: bool) -> Result<usize, IpmError> {
        let consumed = self
            .conversion
            .convert(&self.carry, out, last)
            .map_err(|e| e.into_ipm_error(self.offset))?;
        self.offset += consumed as u64;
        self.carry.advance(consumed);
        Ok(consumed)
    }

    fn overlong_carry(&self) -> IpmError {
        IpmError::Decode {
            kind: DecodeFailure::InvalidSequence {
                len: self.carry.len(),
            },
            offset: self.offset,
        }
    }

    fn appended(&mut self, out: &[CodePoint], before: usize) -> usize {
        let n = out.len() - before;
        self.decoded += n as u64;
        n
    }
}
