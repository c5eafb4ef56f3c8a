//! Diagnostic re-encoding of the occurrence table.
//!
//! - [`Occurrence`] - One distinct character with its display bytes and count
//! - [`render_occurrences`] - Re-encodes every table entry through a second context

mod occurrence;

pub use occurrence::{Occurrence, render_occurrences};
