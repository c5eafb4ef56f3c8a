//! Error types for ipmrs.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while computing an IPM.
///
/// A run either produces exactly one fraction or stops at the first error.
/// Every variant belongs to one failing stage (see [`IpmError::stage`]) and
/// maps to a distinct process exit code (see [`IpmError::exit_code`]).
#[derive(Debug, Error)]
pub enum IpmError {
    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// The input file could not be opened.
    #[error("cannot open '{}': {source}", path.display())]
    FileOpen {
        /// The path that was attempted.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// The encoding label is not known to the decoder capability.
    #[error("unsupported encoding '{label}'")]
    UnsupportedEncoding {
        /// The label as given by the caller.
        label: String,
    },

    /// The decoder capability refused to open a conversion context.
    #[error("cannot open conversion for '{label}': {message}")]
    DecoderOpen {
        /// The encoding label.
        label: String,
        /// Why the context could not be opened.
        message: String,
    },

    /// An I/O error occurred while reading input data.
    #[error("read error: {0}")]
    Read(#[from] io::Error),

    /// Input bytes could not be converted into code points.
    #[error("decode error at byte {offset}: {kind}")]
    Decode {
        /// What went wrong.
        kind: DecodeFailure,
        /// Byte position in the stream where the failure was detected.
        offset: u64,
    },

    /// A code point could not be re-encoded for the occurrence report.
    #[error("cannot display U+{code_point:04X}: {kind}")]
    Reencode {
        /// What went wrong.
        kind: DecodeFailure,
        /// The code point being displayed.
        code_point: u32,
    },

    /// An occurrence counter could not be incremented.
    #[error("occurrence count overflow for U+{code_point:04X}")]
    Accumulation {
        /// The code point whose counter would have wrapped.
        code_point: u32,
    },

    /// No two positions hold the same character.
    #[error("no matching pairs: {reason}")]
    NoMatchingPairs {
        /// Why the denominator is zero.
        reason: NoMatchReason,
    },

    /// Exact arithmetic would have overflowed.
    #[error("arithmetic overflow while computing {stage}")]
    Overflow {
        /// Which quantity overflowed.
        stage: &'static str,
    },

    /// A conversion context failed to release its resources.
    #[error("resource release failed: {message}")]
    ResourceRelease {
        /// Description reported by the context.
        message: String,
    },
}

/// The ways a conversion can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeFailure {
    /// A byte sequence is not valid in the source encoding.
    #[error("invalid sequence of {len} byte(s)")]
    InvalidSequence {
        /// Length of the offending sequence.
        len: usize,
    },

    /// The conversion would have substituted characters.
    #[error("{count} character(s) converted in a non-reversible way")]
    Lossy {
        /// Number of characters that could not be mapped faithfully.
        count: usize,
    },

    /// Input ended in the middle of a multi-byte sequence.
    #[error("{remaining} trailing byte(s) do not form a complete character")]
    Incomplete {
        /// Number of bytes left over.
        remaining: usize,
    },
}

/// Why an occurrence table has no matching pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NoMatchReason {
    /// Zero or one character was decoded.
    #[error("fewer than two characters in input")]
    TooFewCharacters,

    /// Every character in the input is different.
    #[error("each character in the input is different")]
    AllDistinct,
}

impl IpmError {
    /// Returns the name of the pipeline stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            IpmError::InvalidConfig { .. } => "configuration",
            IpmError::FileOpen { .. } => "open",
            IpmError::UnsupportedEncoding { .. } | IpmError::DecoderOpen { .. } => "decoder open",
            IpmError::Read(_) => "read",
            IpmError::Decode { .. } => "decode",
            IpmError::Reencode { .. } => "display",
            IpmError::Accumulation { .. } => "accumulate",
            IpmError::NoMatchingPairs { .. } | IpmError::Overflow { .. } => "reduce",
            IpmError::ResourceRelease { .. } => "release",
        }
    }

    /// Returns the process exit code for this error category.
    pub fn exit_code(&self) -> u8 {
        match self {
            IpmError::InvalidConfig { .. } => 2,
            IpmError::FileOpen { .. } => 3,
            IpmError::UnsupportedEncoding { .. } | IpmError::DecoderOpen { .. } => 4,
            IpmError::Read(_) => 5,
            IpmError::Decode { .. } | IpmError::Reencode { .. } => 6,
            IpmError::Accumulation { .. } => 7,
            IpmError::NoMatchingPairs { .. } => 8,
            IpmError::Overflow { .. } => 9,
            IpmError::ResourceRelease { .. } => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "test");
        let err: IpmError = io_err.into();
        assert!(matches!(err, IpmError::Read(_)));
        assert_eq!(err.stage(), "read");
    }

    #[test]
    fn test_display() {
        let err = IpmError::Decode {
            kind: DecodeFailure::Incomplete { remaining: 2 },
            offset: 10,
        };
        let s = err.to_string();
        assert!(s.contains("byte 10"));
        assert!(s.contains("2 trailing byte(s)"));

        let err = IpmError::Accumulation { code_point: 0x61 };
        assert!(err.to_string().contains("U+0061"));
    }

    #[test]
    fn test_exit_codes_are_distinct_per_category() {
        let errors = [
            IpmError::InvalidConfig { message: "x" },
            IpmError::FileOpen {
                path: PathBuf::from("missing"),
                source: io::Error::from(io::ErrorKind::NotFound),
            },
            IpmError::UnsupportedEncoding {
                label: "x".into(),
            },
            IpmError::Read(io::Error::from(io::ErrorKind::Other)),
            IpmError::Decode {
                kind: DecodeFailure::Lossy { count: 1 },
                offset: 0,
            },
            IpmError::Accumulation { code_point: 0 },
            IpmError::NoMatchingPairs {
                reason: NoMatchReason::AllDistinct,
            },
            IpmError::Overflow { stage: "numerator" },
            IpmError::ResourceRelease {
                message: "x".into(),
            },
        ];

        let mut codes: Vec<u8> = errors.iter().map(IpmError::exit_code).collect();
        assert!(codes.iter().all(|&c| c != 0 && c != 1));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_unsupported_and_open_share_stage() {
        let a = IpmError::UnsupportedEncoding {
            label: "nope".into(),
        };
        let b = IpmError::DecoderOpen {
            label: "utf-16le".into(),
            message: "no encoder".into(),
        };
        assert_eq!(a.stage(), b.stage());
        assert_eq!(a.exit_code(), b.exit_code());
    }
}
