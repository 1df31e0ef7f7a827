//! # Validation Module
//!
//! Strict validators for configuration and already-canonical GTINs.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Startup: GTIN prefix from configuration                               │
//! │  └── validate_gtin_prefix ── hard error, the process refuses to start  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Per barcode: GtinNormalizer                                           │
//! │  └── never fails, classifies into passthrough / synthesized / none     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Strict parse: Gtin::parse (THIS MODULE: validate_gtin)                │
//! │  └── for identifiers that must already be canonical                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use gtin_core::validation::{validate_gtin, validate_gtin_prefix};
//! use gtin_core::GtinFormat;
//!
//! validate_gtin_prefix("748").unwrap();
//! assert_eq!(validate_gtin("4006381333931").unwrap(), GtinFormat::Gtin13);
//! ```

use crate::check_digit::gs1_check_digit;
use crate::error::ValidationError;
use crate::types::GtinFormat;
use crate::{GTIN_PREFIX_LEN, STANDARD_GTIN_LENGTHS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Returns true for the canonical GS1 lengths: 8, 12, 13, 14.
#[inline]
pub fn is_standard_length(len: usize) -> bool {
    STANDARD_GTIN_LENGTHS.contains(&len)
}

// =============================================================================
// Prefix Validator
// =============================================================================

/// Validates a GTIN prefix used for 11-digit synthesis.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be exactly 3 characters
/// - Must contain only ASCII digits
///
/// ## Example
/// ```rust
/// use gtin_core::validation::validate_gtin_prefix;
///
/// assert!(validate_gtin_prefix("748").is_ok());
/// assert!(validate_gtin_prefix("74").is_err());
/// assert!(validate_gtin_prefix("7a8").is_err());
/// ```
pub fn validate_gtin_prefix(prefix: &str) -> ValidationResult<()> {
    let prefix = prefix.trim();

    if prefix.is_empty() {
        return Err(ValidationError::Required {
            field: "gtin_prefix".to_string(),
        });
    }

    if !prefix.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "gtin_prefix".to_string(),
            reason: "must contain only digits 0-9".to_string(),
        });
    }

    if prefix.len() != GTIN_PREFIX_LEN {
        return Err(ValidationError::InvalidLength {
            field: "gtin_prefix".to_string(),
            expected: GTIN_PREFIX_LEN.to_string(),
            actual: prefix.len(),
        });
    }

    Ok(())
}

// =============================================================================
// GTIN Validator
// =============================================================================

/// Validates a canonical GTIN, returning its format.
///
/// ## Rules
/// - Must not be empty
/// - Must contain only ASCII digits (no cleaning is performed)
/// - Must be 8, 12, 13 or 14 digits long
/// - The last digit must be the GS1 Mod-10 check digit of the others
pub fn validate_gtin(code: &str) -> ValidationResult<GtinFormat> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "gtin".to_string(),
        });
    }

    if !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "gtin".to_string(),
            reason: "must contain only digits 0-9".to_string(),
        });
    }

    let format = GtinFormat::from_len(code.len()).ok_or_else(|| ValidationError::InvalidLength {
        field: "gtin".to_string(),
        expected: "8, 12, 13 or 14".to_string(),
        actual: code.len(),
    })?;

    let (body, last) = code.split_at(code.len() - 1);
    let found = last.as_bytes()[0] - b'0';
    let Some(expected) = gs1_check_digit(body) else {
        return Err(ValidationError::InvalidFormat {
            field: "gtin".to_string(),
            reason: "missing check digit body".to_string(),
        });
    };
    if expected != found {
        return Err(ValidationError::CheckDigitMismatch { expected, found });
    }

    Ok(format)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_standard_length() {
        for len in [8, 12, 13, 14] {
            assert!(is_standard_length(len));
        }
        for len in [0, 1, 7, 9, 10, 11, 15, 20] {
            assert!(!is_standard_length(len));
        }
    }

    #[test]
    fn test_validate_gtin_prefix() {
        assert!(validate_gtin_prefix("748").is_ok());
        assert!(validate_gtin_prefix("000").is_ok());
        assert!(validate_gtin_prefix(" 840 ").is_ok());

        assert!(matches!(
            validate_gtin_prefix(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_gtin_prefix("   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_gtin_prefix("74"),
            Err(ValidationError::InvalidLength { actual: 2, .. })
        ));
        assert!(matches!(
            validate_gtin_prefix("7480"),
            Err(ValidationError::InvalidLength { actual: 4, .. })
        ));
        assert!(matches!(
            validate_gtin_prefix("7-8"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_gtin() {
        assert_eq!(validate_gtin("96385074"), Ok(GtinFormat::Gtin8));
        assert_eq!(validate_gtin("036000291452"), Ok(GtinFormat::Gtin12));
        assert_eq!(validate_gtin("4006381333931"), Ok(GtinFormat::Gtin13));
        assert_eq!(validate_gtin("74823456789016"), Ok(GtinFormat::Gtin14));
    }

    #[test]
    fn test_validate_gtin_rejections() {
        assert!(matches!(
            validate_gtin(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_gtin("4006-381333931"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            validate_gtin("12345678901"),
            Err(ValidationError::InvalidLength { actual: 11, .. })
        ));
        assert_eq!(
            validate_gtin("4006381333932"),
            Err(ValidationError::CheckDigitMismatch {
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn test_validate_gtin_multibyte_input() {
        assert!(matches!(
            validate_gtin("40063813339é"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            validate_gtin_prefix("7é"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}
