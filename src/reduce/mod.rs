//! The IPM Reducer.
//!
//! - [`Ipm`] - Exact, reduced `numerator / denominator` fraction
//! - [`gcd`] - Euclid's algorithm
//! - [`Significant`] - Fixed significant-digit float rendering

mod format;
mod fraction;

pub use format::Significant;
pub use fraction::{FLOAT_PRECISION, Ipm, gcd};
