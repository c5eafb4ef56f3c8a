//! The Byte Reader - pulls fixed-size chunks of raw bytes from a reader.

use std::io::Read;

use bytes::Bytes;

use crate::buffer::ReadBuffer;
use crate::error::IpmError;

/// An iterator that yields raw byte chunks from a reader.
///
/// Each chunk holds between 1 and `capacity` bytes. A zero-length read ends
/// the sequence. The iterator is forward-only and cannot be restarted; after
/// end of file or the first error it keeps returning `None`.
///
/// # Example
///
/// ```
/// use ipmrs::ByteReader;
/// use std::io::Cursor;
///
/// let chunks: Vec<_> = ByteReader::new(Cursor::new(b"hello world"), 4)
///     .collect::<Result<_, _>>()?;
///
/// assert_eq!(chunks.len(), 3);
/// assert_eq!(&chunks[2][..], b"rld");
/// # Ok::<(), ipmrs::IpmError>(())
/// ```
#[derive(Debug)]
pub struct ByteReader<R> {
    reader: R,
    buffer: ReadBuffer,
    bytes_read: u64,
    finished: bool,
}

impl<R: Read> ByteReader<R> {
    /// Creates a new byte reader pulling at most `capacity` bytes per chunk.
    ///
    /// A `capacity` of zero is treated as one.
    pub fn new(reader: R, capacity: usize) -> Self {
        Self {
            reader,
            buffer: ReadBuffer::with_capacity(capacity.max(1)),
            bytes_read: 0,
            finished: false,
        }
    }

    /// Returns the total number of bytes read so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Returns the maximum chunk size.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Consumes the iterator, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Iterator for ByteReader<R> {
    type Item = Result<Bytes, IpmError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.buffer.read_from(&mut self.reader) {
            Ok(Some(chunk)) => {
                self.bytes_read += chunk.len() as u64;
                Some(Ok(chunk))
            }
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(IpmError::Read(e)))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for ByteReader<R> {}
