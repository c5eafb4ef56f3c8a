//! Orchestration of a full IPM run.
//!
//! - [`compute_ipm`] - File path in, report out, using the built-in codec
//! - [`compute_ipm_with`] - Any reader, any [`Codec`](crate::Codec)
//! - [`count_occurrences`] - Just the streaming read/decode/count stage
//! - [`IpmReport`] - The result of a successful run

mod report;
mod run;

pub use report::IpmReport;
pub use run::{compute_ipm, compute_ipm_with, count_occurrences};
