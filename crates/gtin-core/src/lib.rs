//! # gtin-core: Pure GTIN Normalization
//!
//! This crate turns the barcodes found in product catalogs into canonical,
//! GS1-compliant GTINs, or decides that no GTIN can be produced. It contains
//! pure functions only: no I/O, no environment access, no global state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Sync Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Catalog extraction (external)                      │   │
//! │  │        product.barcode: Option<String>, default_code            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ gtin-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌───────────┐ │   │
//! │  │   │   types   │  │ normalizer │  │check_digit│  │identifier │ │   │
//! │  │   │  Gtin     │  │ classify   │  │  Mod-10   │  │  gtins /  │ │   │
//! │  │   │  Prefix   │  │ synthesize │  │  verify   │  │  flag     │ │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └───────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO ENVIRONMENT • PURE FUNCTIONS                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           Product transformation / feed upload (external)       │   │
//! │  │        gtins: [..]  or  identifierExists: false                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Gtin, GtinPrefix, CleanDigits, Normalization)
//! - [`normalizer`] - Cleaning, classification and GTIN-14 synthesis
//! - [`check_digit`] - GS1 Mod-10 arithmetic
//! - [`identifier`] - Feed identifier block (GTIN or identifier-absent flag)
//! - [`validation`] - Strict validators for prefixes and canonical GTINs
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use gtin_core::{GtinNormalizer, GtinPrefix, ProductIdentifiers};
//!
//! // Built once at startup from configuration
//! let normalizer = GtinNormalizer::with_prefix(GtinPrefix::new("748").unwrap());
//!
//! let result = normalizer.classify(Some("12-34 5678901"));
//! assert_eq!(result.gtin().unwrap().as_str(), "74823456789016");
//!
//! let ids = ProductIdentifiers::from_normalization(&result, None);
//! assert!(ids.has_gtin());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod check_digit;
pub mod error;
pub mod identifier;
pub mod normalizer;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use check_digit::{compute_check_digit, has_valid_check_digit};
pub use error::{CoreError, CoreResult, ValidationError};
pub use identifier::ProductIdentifiers;
pub use normalizer::{normalize, synthesize_gtin14, GtinNormalizer, NormalizerConfig, PassthroughPolicy};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Prefix used when the deployment does not configure one.
pub const DEFAULT_GTIN_PREFIX: &str = "748";

/// Number of digits in a GTIN prefix.
pub const GTIN_PREFIX_LEN: usize = 3;

/// Length of the non-standard internal codes that get a synthesized GTIN-14.
pub const SYNTHESIS_SOURCE_LEN: usize = 11;

/// How many trailing source digits survive synthesis.
pub const SYNTHESIS_TAIL_LEN: usize = 10;

/// Length of the base the check digit is computed over during synthesis.
pub const GTIN13_BASE_LEN: usize = GTIN_PREFIX_LEN + SYNTHESIS_TAIL_LEN;

/// Canonical GS1 GTIN lengths.
pub const STANDARD_GTIN_LENGTHS: [usize; 4] = [8, 12, 13, 14];
