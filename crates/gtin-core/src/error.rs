//! # Error Types
//!
//! Domain-specific error types for gtin-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gtin-core errors (this file)                                          │
//! │  ├── CoreError        - Contract violations on strict APIs             │
//! │  └── ValidationError  - Prefix / GTIN input validation failures        │
//! │                                                                         │
//! │  gtin-cli errors (app)                                                 │
//! │  └── ConfigError      - Bad environment / flag values                  │
//! │                                                                         │
//! │  NOT an error: a barcode that yields no GTIN. That is a                 │
//! │  `Normalization::NoResult`, returned as a value.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, expected vs actual)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by the strict (fallible) entry points of the crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Input handed to the check digit routine does not meet its contract.
    ///
    /// ## When This Occurs
    /// - `try_compute_check_digit` called with 12 or 14 digits instead of 13
    /// - The input contains a non-digit character
    #[error("Check digit input must be exactly {expected_len} ASCII digits: {reason}")]
    CheckDigitInput { expected_len: usize, reason: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Returned when a GTIN prefix or a strictly-parsed GTIN is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field does not have the required number of characters.
    #[error("{field} must be {expected} characters, got {actual}")]
    InvalidLength {
        field: String,
        expected: String,
        actual: usize,
    },

    /// Invalid format (e.g. letters in a prefix).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// The final digit of a GTIN does not match its Mod-10 check digit.
    #[error("check digit mismatch: expected {expected}, found {found}")]
    CheckDigitMismatch { expected: u8, found: u8 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
