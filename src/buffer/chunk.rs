//! Fixed-capacity read buffer backed by `BytesMut`.

use std::io::{self, Read};

use bytes::{Bytes, BytesMut};

/// A reusable byte buffer sized once per run.
///
/// Every successful read is split off as a frozen [`Bytes`]. Once the caller
/// drops that chunk, the next read reclaims the same allocation instead of
/// allocating again.
#[derive(Debug)]
pub(crate) struct ReadBuffer {
    data: BytesMut,
    capacity: usize,
}

impl ReadBuffer {
    /// Creates a buffer that reads at most `capacity` bytes at a time.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            data: BytesMut::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns the maximum number of bytes a single read may produce.
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Performs one read from `reader`.
    ///
    /// Returns `Ok(None)` on end of file. Interrupted reads are retried.
    pub(crate) fn read_from<R: Read>(&mut self, reader: &mut R) -> io::Result<Option<Bytes>> {
        self.data.clear();
        self.data.reserve(self.capacity);
        self.data.resize(self.capacity, 0);

        loop {
            match reader.read(&mut self.data[..]) {
                Ok(0) => {
                    self.data.clear();
                    return Ok(None);
                }
                Ok(n) => {
                    self.data.truncate(n);
                    return Ok(Some(self.data.split().freeze()));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.data.clear();
                    return Err(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_up_to_capacity() {
        let mut buf = ReadBuffer::with_capacity(4);
        let mut reader = Cursor::new(b"abcdefghij".to_vec());

        let mut chunks = Vec::new();
        while let Some(chunk) = buf.read_from(&mut reader).unwrap() {
            assert!(chunk.len() <= buf.capacity());
            chunks.push(chunk);
        }

        assert_eq!(chunks.len(), 3);
        assert_eq!(&chunks[0][..], b"abcd");
        assert_eq!(&chunks[2][..], b"ij");
    }

    #[test]
    fn test_empty_reader() {
        let mut buf = ReadBuffer::with_capacity(16);
        let mut reader = Cursor::new(Vec::new());
        assert!(buf.read_from(&mut reader).unwrap().is_none());
    }

    #[test]
    fn test_chunks_survive_buffer_reuse() {
        let mut buf = ReadBuffer::with_capacity(2);
        let mut reader = Cursor::new(b"xyzw".to_vec());

        let first = buf.read_from(&mut reader).unwrap().unwrap();
        let second = buf.read_from(&mut reader).unwrap().unwrap();

        // The first chunk is still alive, so the second must not overwrite it
        assert_eq!(&first[..], b"xy");
        assert_eq!(&second[..], b"zw");
    }

    struct Interrupting {
        interrupted: bool,
    }

    impl Read for Interrupting {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            buf[0] = b'q';
            Ok(1)
        }
    }

    #[test]
    fn test_interrupted_read_is_retried() {
        let mut buf = ReadBuffer::with_capacity(8);
        let mut reader = Interrupting { interrupted: false };
        let chunk = buf.read_from(&mut reader).unwrap().unwrap();
        assert_eq!(&chunk[..], b"q");
    }
}
