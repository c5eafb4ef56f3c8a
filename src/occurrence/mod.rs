//! Occurrence counting.
//!
//! - [`OccurrenceTable`] - Code point to count mapping, accumulated chunk by chunk

mod table;

pub use table::OccurrenceTable;
