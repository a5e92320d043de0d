//! Read capabilities consumed by the listing and catalog services.
//!
//! Both traits are implemented by [`SqlitePoemStore`](super::sqlite_store::SqlitePoemStore);
//! tests provide their own doubles.

use crate::filter::combine::FilterOutcome;
use crate::filter::pagination::PageRange;
use crate::model::facet::{Facet, FacetId, FacetKind, MatchMode};
use crate::model::poem::{Poem, PoemId, PoemSummary, Poet, PoetId};
use crate::repo::StoreResult;
use std::collections::BTreeSet;

/// One page of poems plus the row count of the whole (restricted) query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoemPage {
    pub poems: Vec<Poem>,
    pub total_count: u64,
}

/// Capabilities behind filtered poem listing.
///
/// `Sync` because the listing service fans independent reads out to
/// concurrent branches sharing one store.
pub trait PoemStore: Sync {
    /// Maps facet slugs of one kind to ids. Unknown slugs are dropped.
    fn resolve_identifiers(&self, kind: FacetKind, slugs: &[String])
        -> StoreResult<BTreeSet<FacetId>>;

    /// Returns poems linked to any (`Or`) or all (`And`) of `facet_ids`.
    fn records_linked_to(
        &self,
        kind: FacetKind,
        facet_ids: &BTreeSet<FacetId>,
        mode: MatchMode,
    ) -> StoreResult<BTreeSet<PoemId>>;

    /// Fetches the poems inside `range` (ordered by id) under `outcome`.
    fn fetch_records(&self, outcome: &FilterOutcome, range: PageRange) -> StoreResult<PoemPage>;

    /// Returns the full vocabulary of one facet kind, ordered by id.
    fn fetch_facet_vocabulary(&self, kind: FacetKind) -> StoreResult<Vec<Facet>>;
}

/// Single-entity lookups for poet and poem pages.
pub trait CatalogStore {
    fn list_poets(&self) -> StoreResult<Vec<Poet>>;
    fn find_poet_by_slug(&self, slug: &str) -> StoreResult<Option<Poet>>;
    /// Poems written by `poet_id`, ordered by id.
    fn poems_by_poet(&self, poet_id: PoetId) -> StoreResult<Vec<PoemSummary>>;
    fn find_poem_by_slug(&self, slug: &str) -> StoreResult<Option<Poem>>;
}

impl<S: PoemStore + ?Sized> PoemStore for &S {
    fn resolve_identifiers(
        &self,
        kind: FacetKind,
        slugs: &[String],
    ) -> StoreResult<BTreeSet<FacetId>> {
        (**self).resolve_identifiers(kind, slugs)
    }

    fn records_linked_to(
        &self,
        kind: FacetKind,
        facet_ids: &BTreeSet<FacetId>,
        mode: MatchMode,
    ) -> StoreResult<BTreeSet<PoemId>> {
        (**self).records_linked_to(kind, facet_ids, mode)
    }

    fn fetch_records(&self, outcome: &FilterOutcome, range: PageRange) -> StoreResult<PoemPage> {
        (**self).fetch_records(outcome, range)
    }

    fn fetch_facet_vocabulary(&self, kind: FacetKind) -> StoreResult<Vec<Facet>> {
        (**self).fetch_facet_vocabulary(kind)
    }
}

impl<S: CatalogStore + ?Sized> CatalogStore for &S {
    fn list_poets(&self) -> StoreResult<Vec<Poet>> {
        (**self).list_poets()
    }

    fn find_poet_by_slug(&self, slug: &str) -> StoreResult<Option<Poet>> {
        (**self).find_poet_by_slug(slug)
    }

    fn poems_by_poet(&self, poet_id: PoetId) -> StoreResult<Vec<PoemSummary>> {
        (**self).poems_by_poet(poet_id)
    }

    fn find_poem_by_slug(&self, slug: &str) -> StoreResult<Option<Poem>> {
        (**self).find_poem_by_slug(slug)
    }
}
