//! Sequential chunk reading.
//!
//! - [`ByteReader`] - Lazy, forward-only iterator of byte chunks from a [`std::io::Read`] source

mod iter;

pub use iter::ByteReader;
