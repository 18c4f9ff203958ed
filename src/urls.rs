//! URL normalization helpers shared by all adapters.

use url::form_urlencoded;

/// Resolve a possibly-relative `raw` URL against a source origin.
///
/// Absolute URLs pass through unchanged, protocol-relative (`//…`) URLs get
/// an `https:` prefix, anything else is prefixed with the origin. Empty
/// input stays empty so callers can treat "no picture" uniformly.
pub fn absolutize(origin: &str, raw: &str) -> String {
    if raw.is_empty() || raw.starts_with("http") {
        raw.to_string()
    } else if raw.starts_with("//") {
        format!("https:{raw}")
    } else {
        format!("{origin}{raw}")
    }
}

/// Percent-encode a query value for a search URL.
pub fn encode_query(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
