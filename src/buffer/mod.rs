//! Internal buffer management.
//!
//! This module provides the fixed-capacity read buffer reused for every
//! chunk of a run. It is an implementation detail and not part of the
//! public API.

mod chunk;

pub(crate) use chunk::ReadBuffer;
