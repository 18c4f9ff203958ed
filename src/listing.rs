//! Normalized product listings.

use serde::{Deserialize, Serialize};

/// One normalized product record produced by an adapter for a query.
///
/// For any listing that is not an error marker: `name` is non-empty, `link`
/// is an absolute URL, `price` is a currency-formatted string, and `picture`
/// is absolute or empty (consumers substitute a placeholder image).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub site: String,
    pub name: String,
    pub price: String,
    pub link: String,
    pub picture: String,
}

/// Prefix marking a row as a per-source failure rather than a product.
pub const ERROR_PREFIX: &str = "ERROR: ";

impl Listing {
    /// Synthesize the single error marker for a failed source. Only the
    /// aggregator calls this; adapters never emit error rows.
    pub fn source_error(site: &str, message: &str) -> Self {
        Self {
            site: site.to_string(),
            name: format!("{ERROR_PREFIX}{message}"),
            price: "N/A".to_string(),
            link: String::new(),
            picture: String::new(),
        }
    }

    /// Whether this row is a synthesized error marker.
    pub fn is_error(&self) -> bool {
        self.name.starts_with(ERROR_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_rows_carry_the_sentinel_shape() {
        let row = Listing::source_error("HobbyHolics", "fetch failed (503)");
        assert_eq!(row.site, "HobbyHolics");
        assert_eq!(row.name, "ERROR: fetch failed (503)");
        assert_eq!(row.price, "N/A");
        assert!(row.link.is_empty());
        assert!(row.picture.is_empty());
        assert!(row.is_error());
    }

    #[test]
    fn product_rows_are_not_errors() {
        let row = Listing {
            site: "Robots4Less".into(),
            name: "MG Strike Freedom Gundam".into(),
            price: "$39.99".into(),
            link: "https://r4lus.com/products/strike-freedom".into(),
            picture: String::new(),
        };
        assert!(!row.is_error());
    }
}
