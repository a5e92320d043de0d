//! Facet id -> poem id expansion for one dimension.

use crate::model::facet::{FacetId, FacetKind, MatchMode};
use crate::model::poem::PoemId;
use crate::repo::store::PoemStore;
use crate::repo::StoreResult;
use std::collections::{BTreeMap, BTreeSet};

/// Returns the poems satisfying one facet dimension.
///
/// An empty `facet_ids` set (every requested slug was unknown) yields an empty
/// poem set without touching the store; it never means "all poems".
pub fn expand_membership<S: PoemStore + ?Sized>(
    store: &S,
    kind: FacetKind,
    facet_ids: &BTreeSet<FacetId>,
    mode: MatchMode,
) -> StoreResult<BTreeSet<PoemId>> {
    if facet_ids.is_empty() {
        return Ok(BTreeSet::new());
    }
    store.records_linked_to(kind, facet_ids, mode)
}

/// Evaluates a match mode over in-memory `(poem_id, facet_id)` links.
///
/// Links whose facet is not in `facet_ids` are ignored; duplicate links count
/// once. Used by stores that hold the whole link table in memory.
pub fn match_links<I>(links: I, facet_ids: &BTreeSet<FacetId>, mode: MatchMode) -> BTreeSet<PoemId>
where
    I: IntoIterator<Item = (PoemId, FacetId)>,
{
    if facet_ids.is_empty() {
        return BTreeSet::new();
    }

    let mut matched: BTreeMap<PoemId, BTreeSet<FacetId>> = BTreeMap::new();
    for (poem_id, facet_id) in links {
        if facet_ids.contains(&facet_id) {
            matched.entry(poem_id).or_default().insert(facet_id);
        }
    }

    matched
        .into_iter()
        .filter(|(_, linked)| match mode {
            MatchMode::Or => true,
            MatchMode::And => linked.len() == facet_ids.len(),
        })
        .map(|(poem_id, _)| poem_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::match_links;
    use crate::model::facet::MatchMode;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn ids(values: &[i64]) -> BTreeSet<i64> {
        values.iter().copied().collect()
    }

    #[test]
    fn or_mode_collapses_duplicate_poems() {
        let links = [(1, 10), (1, 11), (2, 11), (3, 12)];
        assert_eq!(
            match_links(links, &ids(&[10, 11]), MatchMode::Or),
            ids(&[1, 2])
        );
    }

    #[test]
    fn and_mode_requires_every_facet() {
        let links = [(1, 10), (1, 11), (2, 11), (2, 11), (3, 10)];
        assert_eq!(
            match_links(links, &ids(&[10, 11]), MatchMode::And),
            ids(&[1])
        );
    }

    #[test]
    fn empty_facet_set_matches_nothing() {
        let links = [(1, 10)];
        assert!(match_links(links, &BTreeSet::new(), MatchMode::Or).is_empty());
        assert!(match_links(links, &BTreeSet::new(), MatchMode::And).is_empty());
    }

    proptest! {
        #[test]
        fn and_results_are_subset_of_or_results(
            links in proptest::collection::vec((0i64..20, 0i64..6), 0..80),
            selected in proptest::collection::btree_set(0i64..6, 1..4),
        ) {
            let or = match_links(links.iter().copied(), &selected, MatchMode::Or);
            let and = match_links(links.iter().copied(), &selected, MatchMode::And);
            prop_assert!(and.is_subset(&or));
        }
    }
}
