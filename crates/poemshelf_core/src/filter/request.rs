//! Listing request parameters.
//!
//! Parameters come from the routing layer as loose key/value pairs. Parsing
//! never fails: malformed values fall back to defaults.

use crate::filter::pagination::normalize_page;
use crate::model::facet::{FacetKind, MatchMode};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

pub const PAGE_PARAM: &str = "page";
pub const THEME_PARAM: &str = "theme";
pub const TAG_PARAM: &str = "tag";
pub const TAG_MATCH_PARAM: &str = "tag_match";

/// Normalized filter + page selection for one listing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRequest {
    /// Requested theme slugs in request order. Always OR-matched.
    pub themes: Vec<String>,
    /// Requested tag slugs in request order.
    pub tags: Vec<String>,
    pub tag_match: MatchMode,
    /// 1-based page number.
    pub page: u32,
}

impl Default for FilterRequest {
    fn default() -> Self {
        Self {
            themes: Vec::new(),
            tags: Vec::new(),
            tag_match: MatchMode::Or,
            page: 1,
        }
    }
}

impl FilterRequest {
    /// Builds a request from repeated key/value parameters.
    ///
    /// - `theme` / `tag` may repeat; blank values are ignored.
    /// - The first `page` and `tag_match` values win.
    /// - Unknown keys are ignored.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut request = Self::default();
        let mut page: Option<&str> = None;
        let mut tag_match: Option<&str> = None;

        for (key, value) in pairs {
            match key {
                THEME_PARAM => push_slug(&mut request.themes, value),
                TAG_PARAM => push_slug(&mut request.tags, value),
                PAGE_PARAM if page.is_none() => page = Some(value),
                TAG_MATCH_PARAM if tag_match.is_none() => tag_match = Some(value),
                _ => {}
            }
        }

        request.page = normalize_page(page);
        request.tag_match = MatchMode::parse_lenient(tag_match);
        request
    }

    /// Builds a request from a form-urlencoded query string such as
    /// `theme=love&tag=short&page=2`.
    ///
    /// A leading `?` is accepted. Keys and values are percent-decoded and `+`
    /// reads as a space; keys without `=` are treated as empty values.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        Self::from_pairs(pairs.iter().map(|(key, value)| (key.as_str(), value.as_str())))
    }

    /// Requested slugs for one facet dimension.
    pub fn slugs(&self, kind: FacetKind) -> &[String] {
        match kind {
            FacetKind::Theme => &self.themes,
            FacetKind::Tag => &self.tags,
        }
    }

    /// Match mode applied to one facet dimension. Themes are always `Or`.
    pub fn match_mode(&self, kind: FacetKind) -> MatchMode {
        match kind {
            FacetKind::Theme => MatchMode::Or,
            FacetKind::Tag => self.tag_match,
        }
    }
}

fn push_slug(target: &mut Vec<String>, value: &str) {
    let trimmed = value.trim();
    if !trimmed.is_empty() {
        target.push(trimmed.to_string());
    }
}
