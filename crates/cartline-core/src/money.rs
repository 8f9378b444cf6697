//! # Money Module
//!
//! Display formatting for monetary values.
//!
//! ## Why Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Line items carry fractional quantities and percentage rates, so       │
//! │  integer cents are not enough either.                                  │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal::Decimal                                    │
//! │    All arithmetic is exact base-10. Rounding happens exactly once,     │
//! │    here, when a value is turned into a display string.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cartline_core::money::{format_number, FormatOverrides, NumberFormat};
//! use rust_decimal::Decimal;
//!
//! let value = Decimal::new(12345, 1); // 1234.5
//! assert_eq!(format_number(value, 2, ".", ","), "1,234.50");
//!
//! // European style through per-call overrides
//! let eu = FormatOverrides::new().decimal_point(",").thousand_separator(".");
//! assert_eq!(NumberFormat::default().format_with(value, &eu), "1.234,50");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_DECIMALS, DEFAULT_DECIMAL_POINT, DEFAULT_THOUSAND_SEPARATOR, MAX_DECIMALS};

// =============================================================================
// Number Format
// =============================================================================

/// Default formatting rules for every formatted accessor.
///
/// ## Fallback Chain
/// ```text
/// per-call override (FormatOverrides)
///      │ unset?
///      ▼
/// NumberFormat from CartConfig (supplied by the embedding cart)
///      │ unset in config file?
///      ▼
/// serde defaults: 2 decimals, ".", ","
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberFormat {
    /// Digits after the decimal point.
    #[serde(default = "default_decimals")]
    pub decimals: u32,

    /// Separator between the integer and fractional parts.
    #[serde(default = "default_decimal_point")]
    pub decimal_point: String,

    /// Separator inserted between groups of three integer digits.
    #[serde(default = "default_thousand_separator")]
    pub thousand_separator: String,
}

fn default_decimals() -> u32 {
    DEFAULT_DECIMALS
}

fn default_decimal_point() -> String {
    DEFAULT_DECIMAL_POINT.to_string()
}

fn default_thousand_separator() -> String {
    DEFAULT_THOUSAND_SEPARATOR.to_string()
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat {
            decimals: default_decimals(),
            decimal_point: default_decimal_point(),
            thousand_separator: default_thousand_separator(),
        }
    }
}

impl NumberFormat {
    /// Formats a value with these rules.
    pub fn format(&self, value: Decimal) -> String {
        format_number(
            value,
            self.decimals,
            &self.decimal_point,
            &self.thousand_separator,
        )
    }

    /// Formats a value, letting any field set in `overrides` win.
    pub fn format_with(&self, value: Decimal, overrides: &FormatOverrides) -> String {
        format_number(
            value,
            overrides.decimals.unwrap_or(self.decimals),
            overrides
                .decimal_point
                .as_deref()
                .unwrap_or(&self.decimal_point),
            overrides
                .thousand_separator
                .as_deref()
                .unwrap_or(&self.thousand_separator),
        )
    }
}

// =============================================================================
// Per-call Overrides
// =============================================================================

/// Optional per-call formatting arguments.
///
/// Every unset field falls back to the configured [`NumberFormat`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatOverrides {
    pub decimals: Option<u32>,
    pub decimal_point: Option<String>,
    pub thousand_separator: Option<String>,
}

impl FormatOverrides {
    /// No overrides: use the configured format as-is.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decimals(mut self, decimals: u32) -> Self {
        self.decimals = Some(decimals);
        self
    }

    pub fn decimal_point(mut self, point: impl Into<String>) -> Self {
        self.decimal_point = Some(point.into());
        self
    }

    pub fn thousand_separator(mut self, separator: impl Into<String>) -> Self {
        self.thousand_separator = Some(separator.into());
        self
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Formats a number with grouped thousands.
///
/// ## Rules
/// - Rounds half away from zero to `decimals` places (`2.345` → `2.35`)
/// - `decimals` above 28 is clamped (Decimal's maximum scale)
/// - No decimal point is written when `decimals` is 0
/// - A value that rounds to zero never carries a minus sign
///
/// ## Example
/// ```rust
/// use cartline_core::money::format_number;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_number(Decimal::new(12345, 1), 2, ".", ","), "1,234.50");
/// assert_eq!(format_number(Decimal::new(-1000000, 0), 0, ".", " "), "-1 000 000");
/// ```
pub fn format_number(
    value: Decimal,
    decimals: u32,
    decimal_point: &str,
    thousand_separator: &str,
) -> String {
    let decimals = decimals.min(MAX_DECIMALS);

    let mut rounded =
        value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    // rescale stops short when the integer part leaves no room; padded below
    rounded.rescale(decimals);
    let digits = rounded.abs().to_string();

    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (digits.as_str(), ""),
    };

    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(integer, thousand_separator));
    if decimals > 0 {
        out.push_str(decimal_point);
        out.push_str(fraction);
        for _ in fraction.len()..decimals as usize {
            out.push('0');
        }
    }
    out
}

fn group_thousands(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + (len / 3) * separator.len());

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }

    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_basic() {
        assert_eq!(format_number(dec!(1234.5), 2, ".", ","), "1,234.50");
        assert_eq!(format_number(dec!(0), 2, ".", ","), "0.00");
        assert_eq!(format_number(dec!(999), 2, ".", ","), "999.00");
        assert_eq!(format_number(dec!(1000), 2, ".", ","), "1,000.00");
    }

    #[test]
    fn test_format_large_values() {
        assert_eq!(
            format_number(dec!(1234567.891), 2, ".", ","),
            "1,234,567.89"
        );
        assert_eq!(format_number(dec!(100000), 0, ".", ","), "100,000");
    }

    #[test]
    fn test_format_rounds_half_away_from_zero() {
        assert_eq!(format_number(dec!(2.345), 2, ".", ","), "2.35");
        assert_eq!(format_number(dec!(2.5), 0, ".", ","), "3");
        assert_eq!(format_number(dec!(-2.5), 0, ".", ","), "-3");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_number(dec!(-1234.5), 2, ".", ","), "-1,234.50");
        // Rounds to zero: no sign
        assert_eq!(format_number(dec!(-0.001), 2, ".", ","), "0.00");
    }

    #[test]
    fn test_format_custom_separators() {
        assert_eq!(format_number(dec!(1234.5), 2, ",", "."), "1.234,50");
        assert_eq!(format_number(dec!(1234.5), 3, ".", ""), "1234.500");
        assert_eq!(format_number(dec!(1234567), 0, ".", "'"), "1'234'567");
    }

    #[test]
    fn test_format_clamps_decimals() {
        let formatted = format_number(dec!(1), 40, ".", ",");
        let (_, fraction) = formatted.split_once('.').unwrap();
        assert_eq!(fraction.len(), MAX_DECIMALS as usize);
    }

    #[test]
    fn test_format_pads_when_scale_is_capped() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(27), 0);
        let expected = format!("1{}.00", ",000".repeat(9));
        assert_eq!(format_number(huge, 2, ".", ","), expected);

        let formatted = format_number(dec!(12.5), 28, ".", ",");
        assert_eq!(formatted, format!("12.5{}", "0".repeat(27)));
    }

    #[test]
    fn test_number_format_overrides() {
        let format = NumberFormat::default();
        assert_eq!(format.format(dec!(1234.5)), "1,234.50");

        let overrides = FormatOverrides::new().decimals(1);
        assert_eq!(format.format_with(dec!(1234.56), &overrides), "1,234.6");

        let overrides = FormatOverrides::new()
            .decimal_point(",")
            .thousand_separator(" ");
        assert_eq!(format.format_with(dec!(1234.5), &overrides), "1 234,50");
    }

    #[test]
    fn test_number_format_deserialize_defaults() {
        let format: NumberFormat = serde_json::from_str(r#"{"decimals": 3}"#).unwrap();
        assert_eq!(format.decimals, 3);
        assert_eq!(format.decimal_point, ".");
        assert_eq!(format.thousand_separator, ",");
    }
}
