//! Significant-digit float rendering.

use std::fmt;

/// A float rendered with a fixed number of significant digits.
///
/// Follows the `%g` convention: fixed notation unless the decimal exponent
/// is below -4 or at least the precision, in which case scientific notation
/// with a signed, two-digit exponent is used. Trailing zeros are dropped.
///
/// # Example
///
/// ```
/// use ipmrs::Significant;
///
/// assert_eq!(Significant::new(3.0, 10).to_string(), "3");
/// assert_eq!(Significant::new(4.0 / 3.0, 10).to_string(), "1.333333333");
/// assert_eq!(Significant::new(1.5e12, 10).to_string(), "1.5e+12");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Significant {
    value: f64,
    precision: usize,
}

impl Significant {
    /// Wraps `value` for rendering with `precision` significant digits.
    ///
    /// A precision of zero is treated as one.
    pub fn new(value: f64, precision: usize) -> Self {
        Self {
            value,
            precision: precision.max(1),
        }
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

impl fmt::Display for Significant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.value;
        if !v.is_finite() {
            return write!(f, "{v}");
        }
        if v == 0.0 {
            return f.write_str("0");
        }

        let p = self.precision;
        // Round first, so 9.9999999999 becomes 1e1 before picking a notation
        let sci = format!("{:.*e}", p - 1, v);
        let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
        let exp: i32 = exp.parse().unwrap_or(0);

        if exp < -4 || exp >= p as i32 {
            let sign = if exp < 0 { '-' } else { '+' };
            write!(f, "{}e{}{:02}", trim_fraction(mantissa), sign, exp.unsigned_abs())
        } else {
            let decimals = (p as i32 - 1 - exp) as usize;
            let fixed = format!("{:.*}", decimals, v);
            f.write_str(trim_fraction(&fixed))
        }
    }
}
