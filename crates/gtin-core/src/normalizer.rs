//! # Normalizer Module
//!
//! Turns raw catalog barcodes into canonical GTINs.
//!
//! ## Decision Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    classify(raw)                                        │
//! │                                                                         │
//! │  raw missing or ""? ────────────────────────► NoResult(Absent)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  strip non-digits → CleanDigits                                        │
//! │       │                                                                 │
//! │       ├── no digits left? ──────────────────► NoResult(NoDigits)        │
//! │       ├── all '0'? ─────────────────────────► NoResult(AllZero)         │
//! │       │                                                                 │
//! │       ├── 11 digits? ──► prefix + last 10 + check digit                 │
//! │       │                  ───────────────────► Synthesized (GTIN-14)     │
//! │       │                                                                 │
//! │       ├── 8/12/13/14 digits?                                            │
//! │       │     ├── Trust (default) ────────────► Passthrough (unchanged)   │
//! │       │     └── Verify: check digit ok? ────► Passthrough               │
//! │       │                 otherwise ──────────► NoResult(CheckDigit...)   │
//! │       │                                                                 │
//! │       └── any other length ─────────────────► NoResult(Unsupported...)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Known Limitations
//! - Under [`PassthroughPolicy::Trust`] a standard-length code with a wrong
//!   check digit is returned as-is. Downstream feeds may reject it.
//! - Synthesis keeps only the last 10 of the 11 source digits. Two codes that
//!   differ only in their first digit map to the same GTIN-14.
//!
//! ## Usage
//! ```rust
//! use gtin_core::{GtinNormalizer, GtinPrefix};
//!
//! let normalizer = GtinNormalizer::with_prefix(GtinPrefix::new("748").unwrap());
//!
//! let gtin = normalizer.normalize(Some("12345678901")).unwrap();
//! assert_eq!(gtin.as_str(), "74823456789016");
//!
//! assert_eq!(normalizer.normalize(None), None);
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::check_digit::{compute_check_digit, gs1_check_digit};
use crate::error::ValidationError;
use crate::types::{CleanDigits, Gtin, GtinPrefix, NoResultReason, Normalization};
use crate::validation::is_standard_length;
use crate::{SYNTHESIS_SOURCE_LEN, SYNTHESIS_TAIL_LEN};

// =============================================================================
// Configuration
// =============================================================================

/// What to do with codes that already have a standard GTIN length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassthroughPolicy {
    /// Return the digits unchanged without looking at the check digit.
    #[default]
    Trust,

    /// Only pass codes whose check digit is correct.
    Verify,
}

impl std::fmt::Display for PassthroughPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PassthroughPolicy::Trust => write!(f, "trust"),
            PassthroughPolicy::Verify => write!(f, "verify"),
        }
    }
}

impl FromStr for PassthroughPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trust" => Ok(PassthroughPolicy::Trust),
            "verify" | "strict" => Ok(PassthroughPolicy::Verify),
            other => Err(ValidationError::InvalidFormat {
                field: "passthrough".to_string(),
                reason: format!("unknown policy '{}', expected trust or verify", other),
            }),
        }
    }
}

/// Normalizer settings, built once at startup and shared by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Prefix embedded in GTIN-14 codes synthesized from 11-digit input.
    pub prefix: GtinPrefix,

    /// Handling of codes that are already 8, 12, 13 or 14 digits.
    pub passthrough: PassthroughPolicy,
}

// =============================================================================
// GTIN Normalizer
// =============================================================================

/// Validates, cleans and, for 11-digit internal codes, synthesizes GTINs.
///
/// Holds only immutable configuration; share it freely across threads.
#[derive(Debug, Clone, Default)]
pub struct GtinNormalizer {
    config: NormalizerConfig,
}

impl GtinNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        GtinNormalizer { config }
    }

    /// A normalizer with the given prefix and the default trust policy.
    pub fn with_prefix(prefix: GtinPrefix) -> Self {
        GtinNormalizer::new(NormalizerConfig {
            prefix,
            ..NormalizerConfig::default()
        })
    }

    #[inline]
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Classifies a raw barcode. Never fails.
    ///
    /// ## Example
    /// ```rust
    /// use gtin_core::{GtinNormalizer, NoResultReason, Normalization};
    ///
    /// let normalizer = GtinNormalizer::default();
    /// assert_eq!(
    ///     normalizer.classify(Some("123")),
    ///     Normalization::NoResult {
    ///         reason: NoResultReason::UnsupportedLength { length: 3 }
    ///     }
    /// );
    /// ```
    pub fn classify(&self, raw: Option<&str>) -> Normalization {
        classify_with(raw, &self.config.prefix, self.config.passthrough)
    }

    /// Returns the canonical GTIN for `raw`, or `None` if none can be derived.
    #[inline]
    pub fn normalize(&self, raw: Option<&str>) -> Option<Gtin> {
        self.classify(raw).into_gtin()
    }
}

// =============================================================================
// Free Functions
// =============================================================================

/// Normalizes a raw barcode with the trust passthrough policy.
///
/// ## Example
/// ```rust
/// use gtin_core::{normalize, GtinPrefix};
///
/// let prefix = GtinPrefix::default();
/// assert_eq!(
///     normalize(Some("4006381333931"), &prefix).unwrap().as_str(),
///     "4006381333931"
/// );
/// assert_eq!(normalize(Some("0000000"), &prefix), None);
/// ```
pub fn normalize(raw: Option<&str>, prefix: &GtinPrefix) -> Option<Gtin> {
    classify_with(raw, prefix, PassthroughPolicy::Trust).into_gtin()
}

/// Embeds an 11-digit internal code under `prefix` as a GTIN-14.
///
/// The first source digit is dropped: the result is
/// `prefix (3) + last 10 digits + check digit (1)`.
///
/// # Panics
///
/// Panics if `clean11` is not exactly 11 digits.
pub fn synthesize_gtin14(clean11: &CleanDigits, prefix: &GtinPrefix) -> Gtin {
    assert_eq!(
        clean11.len(),
        SYNTHESIS_SOURCE_LEN,
        "synthesize_gtin14 requires exactly {} digits",
        SYNTHESIS_SOURCE_LEN
    );

    let mut digits = String::with_capacity(prefix.as_str().len() + SYNTHESIS_TAIL_LEN + 1);
    digits.push_str(prefix.as_str());
    digits.push_str(clean11.last_n(SYNTHESIS_TAIL_LEN));

    let check = compute_check_digit(&digits);
    digits.push(char::from(b'0' + check));

    Gtin::from_digits_unchecked(digits)
}

fn classify_with(raw: Option<&str>, prefix: &GtinPrefix, policy: PassthroughPolicy) -> Normalization {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return no_result(NoResultReason::Absent);
    };

    let clean = CleanDigits::from_raw(raw);

    if clean.is_empty() {
        return no_result(NoResultReason::NoDigits);
    }

    if clean.is_all_zero() {
        return no_result(NoResultReason::AllZero);
    }

    if clean.len() == SYNTHESIS_SOURCE_LEN {
        let gtin = synthesize_gtin14(&clean, prefix);
        return Normalization::Synthesized {
            source: clean.as_str().to_string(),
            gtin,
        };
    }

    if !is_standard_length(clean.len()) {
        return no_result(NoResultReason::UnsupportedLength {
            length: clean.len(),
        });
    }

    if policy == PassthroughPolicy::Verify {
        let (body, last) = clean.as_str().split_at(clean.len() - 1);
        let found = last.as_bytes()[0] - b'0';
        match gs1_check_digit(body) {
            Some(expected) if expected != found => {
                return no_result(NoResultReason::CheckDigitMismatch { expected, found });
            }
            _ => {}
        }
    }

    Normalization::Passthrough {
        gtin: Gtin::from_digits_unchecked(clean.as_str().to_string()),
    }
}

#[inline]
fn no_result(reason: NoResultReason) -> Normalization {
    Normalization::NoResult { reason }
}

// =============================================================================
// Unit Tests
// =============================================================================
