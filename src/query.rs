//! Query normalization.
//!
//! A search is an optional grade code plus a required free-text model name.
//! The two are joined into one query string; each adapter encodes that
//! string for its own transport.

use serde::Deserialize;

/// Grade codes offered by the presentation layer (web form, CLI). The
/// server never validates `grade` against this set.
pub const GRADE_CODES: &[&str] = &["HG", "RG", "MG", "PG", "SD", "RE", "FM", "EG"];

/// Raw search parameters as they arrive at the request boundary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub grade: Option<String>,
    pub model: Option<String>,
}

impl SearchQuery {
    pub fn new(grade: Option<&str>, model: &str) -> Self {
        Self {
            grade: grade.map(str::to_string),
            model: Some(model.to_string()),
        }
    }

    /// Build the combined query string, or `None` when the model is missing
    /// or blank. `None` short-circuits the whole pipeline: no adapter is
    /// invoked and the caller answers with a client error.
    pub fn normalize(&self) -> Option<QueryString> {
        let model = self.model.as_deref().unwrap_or("").trim();
        if model.is_empty() {
            return None;
        }
        let grade = self.grade.as_deref().unwrap_or("").trim();
        let combined = [grade, model]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        Some(QueryString(combined))
    }
}

/// The normalized query — non-empty parts joined by single spaces.
/// Immutable once built; lives for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryString(String);

impl QueryString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased whitespace tokens, used by the post-filter.
    pub fn tokens(&self) -> Vec<String> {
        self.0
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

impl std::fmt::Display for QueryString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
