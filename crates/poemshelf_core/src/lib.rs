//! Core logic for poemshelf: faceted poem listing over a relational catalog.
//!
//! Facet slugs are resolved to ids, expanded into poem-id sets per dimension,
//! intersected, and applied to a paginated poem query that runs alongside the
//! facet vocabulary side-loads.

pub mod db;
pub mod filter;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use filter::combine::{combine_dimensions, Dimension, FilterOutcome};
pub use filter::expand::{expand_membership, match_links};
pub use filter::pagination::{
    normalize_page, page_range, total_pages, PageRange, DEFAULT_PAGE_SIZE,
};
pub use filter::request::FilterRequest;
pub use filter::resolve::resolve_facet_ids;
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::facet::{Facet, FacetId, FacetKind, MatchMode};
pub use model::poem::{Poem, PoemCounts, PoemId, PoemSummary, Poet, PoetId, PoetRef};
pub use repo::sqlite_store::SqlitePoemStore;
pub use repo::store::{CatalogStore, PoemPage, PoemStore};
pub use repo::{StoreError, StoreResult};
pub use service::catalog_service::{CatalogError, CatalogService, PoetPage};
pub use service::listing_service::{ListingService, PoemListing, LISTING_FAILED_MESSAGE};
