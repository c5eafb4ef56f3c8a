//! Incremental decoding of byte chunks into code points.
//!
//! - [`IncrementalDecoder`] - Stateful decoder with `push()`/`finish()` API

mod incremental;

pub use incremental::{IncrementalDecoder, MAX_CARRY};
