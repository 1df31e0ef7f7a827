//! # Product Identifiers
//!
//! The identifier block a product feed expects for one product.
//!
//! Feeds require exactly one of: a GTIN, or an explicit statement that the
//! product has no unique trade identifier.
//!
//! ```text
//! Normalization::Passthrough / Synthesized ──► { "gtins": ["..."] }
//! Normalization::NoResult                  ──► { "identifierExists": false }
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Gtin, Normalization};

/// Feed-facing identifiers for a single product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductIdentifiers {
    /// Zero or one GTIN.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gtins: Vec<Gtin>,

    /// Manufacturer part number (the catalog's internal reference code).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub mpn: Option<String>,

    /// `Some(false)` when there is no GTIN; omitted otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub identifier_exists: Option<bool>,
}

impl ProductIdentifiers {
    /// Builds the identifier block from a normalization result.
    ///
    /// A blank `mpn` is ignored; a present one is trimmed.
    ///
    /// ## Example
    /// ```rust
    /// use gtin_core::{GtinNormalizer, ProductIdentifiers};
    ///
    /// let normalizer = GtinNormalizer::default();
    ///
    /// let ids = ProductIdentifiers::from_normalization(&normalizer.classify(None), None);
    /// assert_eq!(ids.identifier_exists, Some(false));
    /// assert!(ids.gtins.is_empty());
    /// ```
    pub fn from_normalization(normalization: &Normalization, mpn: Option<&str>) -> Self {
        let mpn = mpn
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);

        match normalization.gtin() {
            Some(gtin) => ProductIdentifiers {
                gtins: vec![gtin.clone()],
                mpn,
                identifier_exists: None,
            },
            None => ProductIdentifiers {
                gtins: Vec::new(),
                mpn,
                identifier_exists: Some(false),
            },
        }
    }

    #[inline]
    pub fn has_gtin(&self) -> bool {
        !self.gtins.is_empty()
    }

    #[inline]
    pub fn declares_identifier_absent(&self) -> bool {
        self.identifier_exists == Some(false)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GtinNormalizer, GtinPrefix};
    use serde_json::json;

    fn normalizer() -> GtinNormalizer {
        GtinNormalizer::with_prefix(GtinPrefix::new("748").unwrap())
    }

    #[test]
    fn test_exactly_one_of_gtin_or_flag() {
        let normalizer = normalizer();
        for raw in [None, Some(""), Some("0"), Some("123"), Some("12345678901"), Some("4006381333931")] {
            let ids = ProductIdentifiers::from_normalization(&normalizer.classify(raw), None);
            assert_ne!(ids.has_gtin(), ids.declares_identifier_absent(), "input {raw:?}");
        }
    }

    #[test]
    fn test_gtin_wire_shape() {
        let ids = ProductIdentifiers::from_normalization(
            &normalizer().classify(Some("12345678901")),
            Some("  PIANO-88  "),
        );
        assert_eq!(
            serde_json::to_value(&ids).unwrap(),
            json!({ "gtins": ["74823456789016"], "mpn": "PIANO-88" })
        );
    }

    #[test]
    fn test_identifier_absent_wire_shape() {
        let ids = ProductIdentifiers::from_normalization(&normalizer().classify(Some("123")), Some(""));
        assert_eq!(
            serde_json::to_value(&ids).unwrap(),
            json!({ "identifierExists": false })
        );
    }

    #[test]
    fn test_mpn_does_not_replace_flag() {
        let ids = ProductIdentifiers::from_normalization(&normalizer().classify(None), Some("REF-1"));
        assert_eq!(ids.mpn.as_deref(), Some("REF-1"));
        assert!(ids.declares_identifier_absent());
    }
}
