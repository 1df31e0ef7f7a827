//! # Domain Types
//!
//! Core domain types for barcode normalization.
//!
//! ## Type Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  raw: Option<&str>  ──cleaning──►  CleanDigits  ──classify──►  ...      │
//! │  " 4006-381333931"                 "4006381333931"                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Normalization                               │   │
//! │  │  Passthrough { gtin }         8/12/13/14 digits, returned as-is │   │
//! │  │  Synthesized { source, gtin } 11 digits → prefix + tail + check │   │
//! │  │  NoResult { reason }          everything else                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   GtinPrefix    │   │      Gtin       │   │   GtinFormat    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  3 digits       │   │  8/12/13/14     │   │  Gtin8, Gtin12  │       │
//! │  │  "748"          │   │  digits         │   │  Gtin13, Gtin14 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::check_digit::has_valid_check_digit;
use crate::error::ValidationError;
use crate::validation::{validate_gtin, validate_gtin_prefix, ValidationResult};
use crate::DEFAULT_GTIN_PREFIX;

// =============================================================================
// GTIN Prefix
// =============================================================================

/// The 3-digit company prefix used when synthesizing a GTIN-14 from an
/// 11-digit internal code.
///
/// Changing the prefix changes every synthesized identifier, so it must stay
/// stable for the lifetime of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GtinPrefix(String);

impl GtinPrefix {
    /// Creates a prefix, trimming surrounding whitespace.
    ///
    /// ## Example
    /// ```rust
    /// use gtin_core::GtinPrefix;
    ///
    /// assert_eq!(GtinPrefix::new("748").unwrap().as_str(), "748");
    /// assert!(GtinPrefix::new("74").is_err());
    /// ```
    pub fn new(prefix: &str) -> ValidationResult<Self> {
        validate_gtin_prefix(prefix)?;
        Ok(GtinPrefix(prefix.trim().to_string()))
    }

    /// Returns the prefix digits.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for GtinPrefix {
    fn default() -> Self {
        GtinPrefix(DEFAULT_GTIN_PREFIX.to_string())
    }
}

impl FromStr for GtinPrefix {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GtinPrefix::new(s)
    }
}

impl TryFrom<String> for GtinPrefix {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        GtinPrefix::new(&value)
    }
}

impl From<GtinPrefix> for String {
    fn from(prefix: GtinPrefix) -> Self {
        prefix.0
    }
}

impl fmt::Display for GtinPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Clean Digits
// =============================================================================

/// The digit-only projection of a raw barcode.
///
/// Only ASCII `0`-`9` survive; every other character is dropped and the
/// order of the remaining digits is preserved. May be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CleanDigits(String);

impl CleanDigits {
    /// Strips every non-digit character from `raw`.
    ///
    /// ## Example
    /// ```rust
    /// use gtin_core::CleanDigits;
    ///
    /// assert_eq!(CleanDigits::from_raw("12-34 5678901").as_str(), "12345678901");
    /// ```
    pub fn from_raw(raw: &str) -> Self {
        CleanDigits(raw.chars().filter(char::is_ascii_digit).collect())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every digit is `0`. Vacuously true for the empty string.
    pub fn is_all_zero(&self) -> bool {
        self.0.bytes().all(|b| b == b'0')
    }

    /// The last `n` digits (or all of them if there are fewer than `n`).
    pub fn last_n(&self, n: usize) -> &str {
        &self.0[self.0.len().saturating_sub(n)..]
    }
}

impl fmt::Display for CleanDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// GTIN Format
// =============================================================================

/// The four canonical GS1 GTIN lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum GtinFormat {
    /// EAN-8
    Gtin8,
    /// UPC-A
    Gtin12,
    /// EAN-13
    Gtin13,
    /// Case / logistics code
    Gtin14,
}

impl GtinFormat {
    /// Maps a digit count to its format, if it is a standard length.
    pub const fn from_len(len: usize) -> Option<Self> {
        match len {
            8 => Some(GtinFormat::Gtin8),
            12 => Some(GtinFormat::Gtin12),
            13 => Some(GtinFormat::Gtin13),
            14 => Some(GtinFormat::Gtin14),
            _ => None,
        }
    }

    /// Number of digits including the check digit.
    pub const fn digit_count(&self) -> usize {
        match self {
            GtinFormat::Gtin8 => 8,
            GtinFormat::Gtin12 => 12,
            GtinFormat::Gtin13 => 13,
            GtinFormat::Gtin14 => 14,
        }
    }
}

impl fmt::Display for GtinFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GTIN-{}", self.digit_count())
    }
}

// =============================================================================
// GTIN
// =============================================================================

/// A Global Trade Item Number: 8, 12, 13 or 14 ASCII digits.
///
/// ## Check Digit Guarantee
/// Values built by [`Gtin::parse`] or by 11-digit synthesis always carry a
/// valid Mod-10 check digit. Values passed through from the catalog under the
/// default trust policy only guarantee digits and length; see
/// [`Gtin::has_valid_check_digit`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(try_from = "String", into = "String")]
pub struct Gtin(String);

impl Gtin {
    /// Strictly parses a canonical GTIN. No cleaning is performed.
    ///
    /// ## Example
    /// ```rust
    /// use gtin_core::{Gtin, GtinFormat};
    ///
    /// let gtin = Gtin::parse("4006381333931").unwrap();
    /// assert_eq!(gtin.format(), GtinFormat::Gtin13);
    /// assert!(Gtin::parse("4006381333932").is_err()); // bad check digit
    /// ```
    pub fn parse(code: &str) -> ValidationResult<Self> {
        validate_gtin(code)?;
        Ok(Gtin(code.to_string()))
    }

    /// Wraps digits whose shape (ASCII digits, standard length) the caller has
    /// already established.
    pub(crate) fn from_digits_unchecked(digits: String) -> Self {
        debug_assert!(GtinFormat::from_len(digits.len()).is_some());
        debug_assert!(digits.bytes().all(|b| b.is_ascii_digit()));
        Gtin(digits)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn format(&self) -> GtinFormat {
        match self.0.len() {
            8 => GtinFormat::Gtin8,
            12 => GtinFormat::Gtin12,
            13 => GtinFormat::Gtin13,
            _ => GtinFormat::Gtin14,
        }
    }

    /// The final digit.
    pub fn check_digit(&self) -> u8 {
        self.0.as_bytes()[self.0.len() - 1] - b'0'
    }

    pub fn has_valid_check_digit(&self) -> bool {
        has_valid_check_digit(&self.0)
    }
}

impl TryFrom<String> for Gtin {
    type Error = ValidationError;

    /// Accepts any standard-length digit string, mirroring what the trusting
    /// normalizer can emit. Use [`Gtin::parse`] to also verify the check digit.
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidFormat {
                field: "gtin".to_string(),
                reason: "must contain only digits 0-9".to_string(),
            });
        }
        if GtinFormat::from_len(value.len()).is_none() {
            return Err(ValidationError::InvalidLength {
                field: "gtin".to_string(),
                expected: "8, 12, 13 or 14".to_string(),
                actual: value.len(),
            });
        }
        Ok(Gtin(value))
    }
}

impl From<Gtin> for String {
    fn from(gtin: Gtin) -> Self {
        gtin.0
    }
}

impl AsRef<str> for Gtin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Gtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Normalization Result
// =============================================================================

/// Why a raw barcode produced no GTIN.
///
/// None of these are failures: the product is simply declared as having no
/// unique trade identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum NoResultReason {
    /// No barcode at all (missing or empty string).
    Absent,
    /// The barcode contained no digits.
    NoDigits,
    /// Every digit is zero: a placeholder, not a real identifier.
    AllZero,
    /// The digit count matches no GTIN rule.
    UnsupportedLength { length: usize },
    /// Standard length, but the check digit is wrong (verify policy only).
    CheckDigitMismatch { expected: u8, found: u8 },
}

impl fmt::Display for NoResultReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoResultReason::Absent => write!(f, "no barcode"),
            NoResultReason::NoDigits => write!(f, "barcode contains no digits"),
            NoResultReason::AllZero => write!(f, "barcode is all zeros"),
            NoResultReason::UnsupportedLength { length } => {
                write!(f, "{length} digits (must be 8, 11, 12, 13 or 14)")
            }
            NoResultReason::CheckDigitMismatch { expected, found } => {
                write!(f, "check digit {found} should be {expected}")
            }
        }
    }
}

/// The classification of a single raw barcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Normalization {
    /// A standard-length code returned unchanged.
    Passthrough { gtin: Gtin },
    /// An 11-digit internal code embedded under the configured prefix.
    Synthesized {
        /// The cleaned 11 digits the GTIN was built from.
        source: String,
        gtin: Gtin,
    },
    /// No canonical GTIN could be derived.
    NoResult { reason: NoResultReason },
}

impl Normalization {
    /// The resulting GTIN, if any.
    pub fn gtin(&self) -> Option<&Gtin> {
        match self {
            Normalization::Passthrough { gtin } | Normalization::Synthesized { gtin, .. } => {
                Some(gtin)
            }
            Normalization::NoResult { .. } => None,
        }
    }

    pub fn into_gtin(self) -> Option<Gtin> {
        match self {
            Normalization::Passthrough { gtin } | Normalization::Synthesized { gtin, .. } => {
                Some(gtin)
            }
            Normalization::NoResult { .. } => None,
        }
    }

    #[inline]
    pub fn is_no_result(&self) -> bool {
        matches!(self, Normalization::NoResult { .. })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_default_and_parse() {
        assert_eq!(GtinPrefix::default().as_str(), "748");
        assert_eq!("840".parse::<GtinPrefix>().unwrap().as_str(), "840");
        assert_eq!(GtinPrefix::new(" 012 ").unwrap().as_str(), "012");
        assert!("84".parse::<GtinPrefix>().is_err());
        assert!("abc".parse::<GtinPrefix>().is_err());
    }

    #[test]
    fn test_prefix_serde() {
        let prefix: GtinPrefix = serde_json::from_str("\"750\"").unwrap();
        assert_eq!(prefix.as_str(), "750");
        assert_eq!(serde_json::to_string(&prefix).unwrap(), "\"750\"");
        assert!(serde_json::from_str::<GtinPrefix>("\"75\"").is_err());
    }

    #[test]
    fn test_clean_digits() {
        assert_eq!(CleanDigits::from_raw("12-34 5678901").as_str(), "12345678901");
        assert_eq!(CleanDigits::from_raw("  400638 1333931\n").as_str(), "4006381333931");
        assert_eq!(CleanDigits::from_raw("EAN: 9-638507-4").as_str(), "96385074");
        assert!(CleanDigits::from_raw("N/A").is_empty());
    }

    #[test]
    fn test_clean_digits_ignores_non_ascii_digits() {
        // Arabic-Indic digits and superscripts are not GS1 digits
        assert_eq!(CleanDigits::from_raw("١٢٣4²5").as_str(), "45");
    }

    #[test]
    fn test_clean_digits_all_zero() {
        assert!(CleanDigits::from_raw("0").is_all_zero());
        assert!(CleanDigits::from_raw("000-000").is_all_zero());
        assert!(CleanDigits::from_raw("").is_all_zero());
        assert!(!CleanDigits::from_raw("0001").is_all_zero());
    }

    #[test]
    fn test_clean_digits_last_n() {
        let clean = CleanDigits::from_raw("12345678901");
        assert_eq!(clean.last_n(10), "2345678901");
        assert_eq!(clean.last_n(20), "12345678901");
    }

    #[test]
    fn test_gtin_format() {
        assert_eq!(GtinFormat::from_len(8), Some(GtinFormat::Gtin8));
        assert_eq!(GtinFormat::from_len(11), None);
        assert_eq!(GtinFormat::Gtin14.digit_count(), 14);
        assert_eq!(GtinFormat::Gtin12.to_string(), "GTIN-12");
    }

    #[test]
    fn test_gtin_parse() {
        let gtin = Gtin::parse("036000291452").unwrap();
        assert_eq!(gtin.format(), GtinFormat::Gtin12);
        assert_eq!(gtin.check_digit(), 2);
        assert!(gtin.has_valid_check_digit());

        assert!(Gtin::parse("12345678901").is_err());
        assert!(Gtin::parse(" 4006381333931").is_err());
    }

    #[test]
    fn test_gtin_deserialize_accepts_untrusted_check_digit() {
        // What the trusting normalizer emits must round-trip through JSON.
        let gtin: Gtin = serde_json::from_str("\"4006381333932\"").unwrap();
        assert!(!gtin.has_valid_check_digit());
        assert!(serde_json::from_str::<Gtin>("\"12345\"").is_err());
        assert!(serde_json::from_str::<Gtin>("\"4006381X33931\"").is_err());
    }

    #[test]
    fn test_normalization_wire_shape() {
        let synthesized = Normalization::Synthesized {
            source: "12345678901".to_string(),
            gtin: Gtin::parse("74823456789016").unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&synthesized).unwrap(),
            serde_json::json!({
                "kind": "synthesized",
                "source": "12345678901",
                "gtin": "74823456789016"
            })
        );

        let none = Normalization::NoResult {
            reason: NoResultReason::UnsupportedLength { length: 3 },
        };
        assert_eq!(
            serde_json::to_value(&none).unwrap(),
            serde_json::json!({
                "kind": "no_result",
                "reason": { "code": "unsupported_length", "length": 3 }
            })
        );
        assert!(none.is_no_result());
        assert_eq!(none.gtin(), None);
    }

    #[test]
    fn test_no_result_reason_display() {
        assert_eq!(NoResultReason::AllZero.to_string(), "barcode is all zeros");
        assert_eq!(
            NoResultReason::UnsupportedLength { length: 10 }.to_string(),
            "10 digits (must be 8, 11, 12, 13 or 14)"
        );
    }
}
