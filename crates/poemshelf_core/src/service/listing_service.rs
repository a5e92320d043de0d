//! Filtered, paginated poem listing.
//!
//! # Responsibility
//! - Run per-dimension facet filtering, combine the dimensions and fetch one
//!   page of poems together with both facet vocabularies.
//! - Convert every failure into a degraded but well-formed listing.
//!
//! # Invariants
//! - Theme and tag filtering run concurrently with each other and with both
//!   vocabulary side-loads; each dimension resolves before it expands.
//! - Every branch is joined before any result is inspected, and one failed
//!   branch degrades the whole listing. Partial results never leak.
//! - `list_poems` never returns an error and never panics on store failure.

use crate::filter::combine::{combine_dimensions, Dimension};
use crate::filter::expand::expand_membership;
use crate::filter::pagination::{page_range, total_pages, DEFAULT_PAGE_SIZE};
use crate::filter::request::FilterRequest;
use crate::filter::resolve::resolve_facet_ids;
use crate::model::facet::{Facet, FacetKind};
use crate::model::poem::Poem;
use crate::repo::store::PoemStore;
use crate::repo::{StoreError, StoreResult};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::thread::{self, ScopedJoinHandle};
use std::time::Instant;

/// Diagnostic attached to a degraded listing.
pub const LISTING_FAILED_MESSAGE: &str = "Server error. Please check logs for details.";

/// Listing envelope handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoemListing {
    /// Poems on the requested page, ordered by id.
    pub records: Vec<Poem>,
    /// Full theme vocabulary, independent of the active filter.
    pub themes: Vec<Facet>,
    /// Full tag vocabulary, independent of the active filter.
    pub tags: Vec<Facet>,
    pub current_page: u32,
    /// At least 1 on success; 0 only on a degraded listing.
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PoemListing {
    fn degraded(message: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            themes: Vec::new(),
            tags: Vec::new(),
            current_page: 1,
            total_pages: 0,
            error: Some(message.into()),
        }
    }

    /// Returns whether this listing is the failure fallback.
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug)]
enum ListingError {
    Store(StoreError),
    BranchPanicked(&'static str),
}

impl ListingError {
    fn code(&self) -> &'static str {
        match self {
            Self::Store(_) => "store_failed",
            Self::BranchPanicked(_) => "branch_panicked",
        }
    }
}

impl Display for ListingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::BranchPanicked(branch) => write!(f, "listing branch `{branch}` panicked"),
        }
    }
}

impl Error for ListingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::BranchPanicked(_) => None,
        }
    }
}

impl From<StoreError> for ListingError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Listing service over an injected store.
pub struct ListingService<S: PoemStore> {
    store: S,
    page_size: u32,
}

impl<S: PoemStore> ListingService<S> {
    /// Creates a service listing [`DEFAULT_PAGE_SIZE`] poems per page.
    pub fn new(store: S) -> Self {
        Self::with_page_size(store, DEFAULT_PAGE_SIZE)
    }

    /// Creates a service with a custom page size (0 is treated as 1).
    pub fn with_page_size(store: S, page_size: u32) -> Self {
        Self {
            store,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Lists one page of poems matching `request`.
    ///
    /// On any store failure returns an empty listing for page 1 with
    /// `total_pages == 0` and [`LISTING_FAILED_MESSAGE`] as diagnostic.
    pub fn list_poems(&self, request: &FilterRequest) -> PoemListing {
        let started_at = Instant::now();
        info!(
            "event=poem_listing module=service status=start page={} themes={} tags={} tag_match={}",
            request.page,
            request.themes.len(),
            request.tags.len(),
            request.tag_match.as_str()
        );

        match self.try_list(request) {
            Ok(listing) => {
                info!(
                    "event=poem_listing module=service status=ok duration_ms={} records={} total_pages={}",
                    started_at.elapsed().as_millis(),
                    listing.records.len(),
                    listing.total_pages
                );
                listing
            }
            Err(err) => {
                error!(
                    "event=poem_listing module=service status=error duration_ms={} error_code={} error={}",
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                PoemListing::degraded(LISTING_FAILED_MESSAGE)
            }
        }
    }

    fn try_list(&self, request: &FilterRequest) -> Result<PoemListing, ListingError> {
        let store = &self.store;
        let range = page_range(request.page, self.page_size);

        let (records, themes, tags) = thread::scope(|scope| {
            let themes = scope.spawn(move || store.fetch_facet_vocabulary(FacetKind::Theme));
            let tags = scope.spawn(move || store.fetch_facet_vocabulary(FacetKind::Tag));
            let theme_filter =
                scope.spawn(move || filter_dimension(store, request, FacetKind::Theme));
            let tag_filter = scope.spawn(move || filter_dimension(store, request, FacetKind::Tag));

            let records = match (
                join_branch(theme_filter, "theme_filter"),
                join_branch(tag_filter, "tag_filter"),
            ) {
                (Ok(theme_dimension), Ok(tag_dimension)) => {
                    let outcome = combine_dimensions([theme_dimension, tag_dimension]);
                    debug!(
                        "event=poem_filter module=service status=ok unfiltered={} restricted={}",
                        outcome.is_unfiltered(),
                        outcome.restricted_len().unwrap_or(0)
                    );
                    let fetch = scope.spawn(move || store.fetch_records(&outcome, range));
                    join_branch(fetch, "records")
                }
                (Err(err), _) | (_, Err(err)) => Err(err),
            };

            (
                records,
                join_branch(themes, "theme_vocabulary"),
                join_branch(tags, "tag_vocabulary"),
            )
        });

        let page = records?;
        Ok(PoemListing {
            records: page.poems,
            themes: themes?,
            tags: tags?,
            current_page: request.page,
            total_pages: total_pages(page.total_count, self.page_size),
            error: None,
        })
    }
}

fn filter_dimension<S: PoemStore + ?Sized>(
    store: &S,
    request: &FilterRequest,
    kind: FacetKind,
) -> StoreResult<Dimension> {
    let slugs = request.slugs(kind);
    if slugs.is_empty() {
        return Ok(Dimension::Absent);
    }

    let facet_ids = resolve_facet_ids(store, kind, slugs)?;
    let poem_ids = expand_membership(store, kind, &facet_ids, request.match_mode(kind))?;
    Ok(Dimension::Requested(poem_ids))
}

fn join_branch<T>(
    handle: ScopedJoinHandle<'_, StoreResult<T>>,
    branch: &'static str,
) -> Result<T, ListingError> {
    handle
        .join()
        .map_err(|_| ListingError::BranchPanicked(branch))?
        .map_err(ListingError::Store)
}
