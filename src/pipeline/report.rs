//! The outcome of a successful run.

use std::io::{self, Write};

use crate::display::Occurrence;
use crate::reduce::Ipm;

/// Everything a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct IpmReport {
    /// The source encoding label the input was decoded from.
    pub source_encoding: String,
    /// Raw bytes read from the input.
    pub bytes_read: u64,
    /// Number of decoded code points (N).
    pub total: u64,
    /// Number of distinct code points.
    pub alphabet_size: usize,
    /// The reduced fraction.
    pub ipm: Ipm,
    /// Per-character lines, when requested.
    pub occurrences: Option<Vec<Occurrence>>,
}

impl IpmReport {
    /// Returns the reduced `(numerator, denominator)` pair.
    pub fn fraction(&self) -> (u128, u128) {
        (self.ipm.numerator(), self.ipm.denominator())
    }

    /// Returns the floating-point IPM.
    pub fn as_f64(&self) -> f64 {
        self.ipm.as_f64()
    }

    /// Writes the human-readable report.
    ///
    /// Occurrence lines, if present, come first, followed by a blank line and
    /// the summary.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        if let Some(lines) = &self.occurrences {
            for line in lines {
                line.write_line(w)?;
            }
            writeln!(w)?;
        }

        writeln!(w, "Total characters read:\t{}", self.total)?;
        writeln!(w, "Alphabet size:\t{}", self.alphabet_size)?;
        writeln!(w, "The computed IPM (fraction):\t{}", self.ipm)?;
        writeln!(
            w,
            "The computed IPM (floating point):\t{}",
            self.ipm.float_display()
        )
    }
}
