//! Facet vocabulary model (themes and tags).
//!
//! # Invariants
//! - Theme and tag ids live in separate id spaces and are never compared.
//! - Theme filtering is always OR; only tags honor `MatchMode::And`.

use serde::{Deserialize, Serialize};

/// Store-assigned facet identifier, scoped to one [`FacetKind`].
pub type FacetId = i64;

/// The two independent facet dimensions a poem can be linked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    Theme,
    Tag,
}

impl FacetKind {
    /// Stable lowercase label used in logs and diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::Tag => "tag",
        }
    }
}

/// How a multi-facet selection matches poems within one dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Poem is linked to at least one selected facet.
    #[default]
    Or,
    /// Poem is linked to every selected facet.
    And,
}

impl MatchMode {
    /// Parses a `tag_match` parameter value.
    ///
    /// Anything other than `and` (case-insensitive) falls back to `Or`.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(|value| value.trim().to_ascii_lowercase()) {
            Some(value) if value == "and" => Self::And,
            _ => Self::Or,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Or => "or",
            Self::And => "and",
        }
    }
}

/// One entry of a theme or tag vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    pub id: FacetId,
    /// Display name shown in filter UIs.
    pub name: String,
    /// URL-safe identifier used in request parameters.
    pub slug: String,
}

#[cfg(test)]
mod tests {
    use super::MatchMode;

    #[test]
    fn match_mode_defaults_to_or_for_unknown_values() {
        assert_eq!(MatchMode::parse_lenient(None), MatchMode::Or);
        assert_eq!(MatchMode::parse_lenient(Some("")), MatchMode::Or);
        assert_eq!(MatchMode::parse_lenient(Some("xor")), MatchMode::Or);
        assert_eq!(MatchMode::parse_lenient(Some("or")), MatchMode::Or);
    }

    #[test]
    fn match_mode_accepts_and_case_insensitively() {
        assert_eq!(MatchMode::parse_lenient(Some("and")), MatchMode::And);
        assert_eq!(MatchMode::parse_lenient(Some(" AND ")), MatchMode::And);
    }
}
