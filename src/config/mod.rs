//! Configuration for an IPM run.
//!
//! [`IpmConfig`] controls which encoding the input is decoded from, how large
//! each read is, and whether per-character occurrences are reported.
//!
//! # Example
//!
//! ```
//! use ipmrs::IpmConfig;
//!
//! let config = IpmConfig::new("Shift_JIS", 64 * 1024)?
//!     .with_show_occurrences(true);
//!
//! assert_eq!(config.source_encoding(), "Shift_JIS");
//! # Ok::<(), ipmrs::IpmError>(())
//! ```

use crate::error::IpmError;

/// Default source encoding label.
pub const DEFAULT_SOURCE_ENCODING: &str = "UTF-8";

/// Default encoding used to print characters.
pub const DEFAULT_DISPLAY_ENCODING: &str = "UTF-8";

/// Default read capacity (8 MiB).
pub const DEFAULT_READ_CAPACITY: usize = 8 * 1024 * 1024;

/// Largest accepted read capacity (1 GiB).
pub const MAX_READ_CAPACITY: usize = 1024 * 1024 * 1024;

/// Configuration for computing the inverse probability of matching.
///
/// - `source_encoding` - label of the encoding the input is written in
/// - `read_capacity` - maximum number of bytes pulled per read
/// - `show_occurrences` - whether to re-encode and report every distinct
///   character with its count
/// - `display_encoding` - encoding used for that report
///
/// # Example
///
/// ```
/// use ipmrs::IpmConfig;
///
/// let config = IpmConfig::default()
///     .with_source_encoding("windows-1250")
///     .with_read_capacity(4096);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IpmConfig {
    source_encoding: String,
    display_encoding: String,
    read_capacity: usize,
    show_occurrences: bool,
}

impl IpmConfig {
    /// Creates a new configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IpmError::InvalidConfig`] if the encoding label is blank or
    /// the read capacity is zero or above [`MAX_READ_CAPACITY`].
    pub fn new(source_encoding: impl Into<String>, read_capacity: usize) -> Result<Self, IpmError> {
        let config = Self {
            source_encoding: source_encoding.into(),
            display_encoding: DEFAULT_DISPLAY_ENCODING.to_string(),
            read_capacity,
            show_occurrences: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the source encoding label.
    pub fn with_source_encoding(mut self, label: impl Into<String>) -> Self {
        self.source_encoding = label.into();
        self
    }

    /// Sets the display encoding label.
    pub fn with_display_encoding(mut self, label: impl Into<String>) -> Self {
        self.display_encoding = label.into();
        self
    }

    /// Sets the read capacity in bytes.
    ///
    /// Note: This does not validate the configuration. Use [`IpmConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_read_capacity(mut self, capacity: usize) -> Self {
        self.read_capacity = capacity;
        self
    }

    /// Enables or disables the per-character occurrence report.
    pub fn with_show_occurrences(mut self, show: bool) -> Self {
        self.show_occurrences = show;
        self
    }

    /// Returns the source encoding label.
    pub fn source_encoding(&self) -> &str {
        &self.source_encoding
    }

    /// Returns the display encoding label.
    pub fn display_encoding(&self) -> &str {
        &self.display_encoding
    }

    /// Returns the read capacity in bytes.
    pub fn read_capacity(&self) -> usize {
        self.read_capacity
    }

    /// Returns whether occurrences are reported.
    pub fn show_occurrences(&self) -> bool {
        self.show_occurrences
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), IpmError> {
        if self.source_encoding.trim().is_empty() {
            return Err(IpmError::InvalidConfig {
                message: "source encoding must not be empty",
            });
        }

        if self.display_encoding.trim().is_empty() {
            return Err(IpmError::InvalidConfig {
                message: "display encoding must not be empty",
            });
        }

        if self.read_capacity == 0 {
            return Err(IpmError::InvalidConfig {
                message: "read capacity must be non-zero",
            });
        }

        if self.read_capacity > MAX_READ_CAPACITY {
            return Err(IpmError::InvalidConfig {
                message: "read capacity cannot exceed 1 GiB",
            });
        }

        Ok(())
    }
}

impl Default for IpmConfig {
    fn default() -> Self {
        Self {
            source_encoding: DEFAULT_SOURCE_ENCODING.to_string(),
            display_encoding: DEFAULT_DISPLAY_ENCODING.to_string(),
            read_capacity: DEFAULT_READ_CAPACITY,
            show_occurrences: false,
        }
    }
}
