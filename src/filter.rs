//! Post-aggregation term filter.

use crate::listing::Listing;
use crate::query::QueryString;

/// Keep listings whose name contains every query token, case-insensitively.
///
/// Applied uniformly to the merged list — error rows are not special-cased,
/// so a synthesized "ERROR: …" name that misses a token drops out like any
/// other row. An empty token set retains everything.
pub fn retain_matching(listings: Vec<Listing>, query: &QueryString) -> Vec<Listing> {
    let tokens = query.tokens();
    if tokens.is_empty() {
        return listings;
    }
    listings
        .into_iter()
        .filter(|listing| {
            let name = listing.name.to_lowercase();
            tokens.iter().all(|token| name.contains(token.as_str()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SearchQuery;

    fn listing(name: &str) -> Listing {
        Listing {
            site: "Robots4Less".into(),
            name: name.into(),
            price: "$10.00".into(),
            link: "https://r4lus.com/p/1".into(),
            picture: String::new(),
        }
    }

    #[test]
    fn every_token_must_appear_in_the_name() {
        let query = SearchQuery::new(Some("MG"), "Strike Freedom")
            .normalize()
            .unwrap();
        let kept = retain_matching(
            vec![
                listing("MG Strike Freedom Gundam"),
                listing("MG Freedom Gundam"),
            ],
            &query,
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "MG Strike Freedom Gundam");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let query = SearchQuery::new(None, "zaku").normalize().unwrap();
        let kept = retain_matching(vec![listing("HG ZAKU II")], &query);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn error_rows_are_filtered_like_any_other() {
        let query = SearchQuery::new(Some("MG"), "Strike Freedom")
            .normalize()
            .unwrap();
        let kept = retain_matching(
            vec![Listing::source_error("Brookhurst", "fetch failed (502)")],
            &query,
        );
        assert!(kept.is_empty());
    }
}
