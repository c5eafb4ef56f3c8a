//! The Diagnostic Re-encoder.

use std::fmt;
use std::io::{self, Write};

use crate::codec::{CodePoint, ConvertError, Reencode};
use crate::error::{DecodeFailure, IpmError};
use crate::occurrence::OccurrenceTable;

/// A distinct character ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Occurrence {
    /// The character.
    pub code_point: CodePoint,
    /// The character encoded in the display encoding.
    pub display: Vec<u8>,
    /// How often the character occurred.
    pub count: u64,
}

impl Occurrence {
    /// Returns the numeric code point value.
    pub fn code(&self) -> u32 {
        u32::from(self.code_point)
    }

    /// Writes the line `'<display>'\t(<code>)\t<count>` to `w`.
    ///
    /// The display bytes are written verbatim, in the display encoding.
    pub fn write_line<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(b"'")?;
        w.write_all(&self.display)?;
        writeln!(w, "'\t({})\t{}", self.code(), self.count)
    }
}

impl fmt::Display for Occurrence {
    /// Lossy view for logs; use [`Occurrence::write_line`] for faithful output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}'\t({})\t{}",
            String::from_utf8_lossy(&self.display),
            self.code(),
            self.count
        )
    }
}

/// Re-encodes every entry of `table` with `encoder`, in ascending code-point
/// order.
///
/// Each code point is encoded independently. A failure on any of them aborts
/// the whole report with [`IpmError::Reencode`].
pub fn render_occurrences<E: Reencode>(
    encoder: &mut E,
    table: &OccurrenceTable,
) -> Result<Vec<Occurrence>, IpmError> {
    let entries = table.sorted();
    let mut lines = Vec::with_capacity(entries.len());

    for (code_point, count) in entries {
        let mut display = Vec::with_capacity(4);
        encoder
            .encode(code_point, &mut display)
            .map_err(|e| reencode_error(e, code_point))?;
        lines.push(Occurrence {
            code_point,
            display,
            count,
        });
    }

    Ok(lines)
}

fn reencode_error(err: ConvertError, code_point: CodePoint) -> IpmError {
    let kind = match err {
        ConvertError::InvalidSequence { len, .. } => DecodeFailure::InvalidSequence { len },
        ConvertError::Lossy { count } => DecodeFailure::Lossy { count },
        ConvertError::Incomplete { remaining } => DecodeFailure::Incomplete { remaining },
        other => return other.into_ipm_error(0),
    };
    IpmError::Reencode {
        kind,
        code_point: u32::from(code_point),
    }
}
