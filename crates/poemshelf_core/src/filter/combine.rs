//! Folding per-dimension poem sets into one filter outcome.

use crate::model::poem::PoemId;
use std::collections::BTreeSet;

/// Result of filtering along one facet dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dimension {
    /// The request did not mention this dimension.
    Absent,
    /// The request selected facets here; these poems satisfy them.
    Requested(BTreeSet<PoemId>),
}

/// Final poem-id restriction applied to the listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// No dimension was requested; list every poem.
    Unfiltered,
    /// Only these poems qualify. Empty means no poem qualifies.
    Restricted(BTreeSet<PoemId>),
}

impl FilterOutcome {
    pub fn is_unfiltered(&self) -> bool {
        matches!(self, Self::Unfiltered)
    }

    /// Number of poems the restriction admits, `None` when unfiltered.
    pub fn restricted_len(&self) -> Option<usize> {
        match self {
            Self::Unfiltered => None,
            Self::Restricted(ids) => Some(ids.len()),
        }
    }
}

/// Intersects every requested dimension; absent dimensions are skipped.
///
/// Order-independent. With nothing requested the outcome is
/// [`FilterOutcome::Unfiltered`]; a single requested dimension passes through
/// unchanged, even when empty.
pub fn combine_dimensions<I>(dimensions: I) -> FilterOutcome
where
    I: IntoIterator<Item = Dimension>,
{
    dimensions
        .into_iter()
        .fold(FilterOutcome::Unfiltered, |outcome, dimension| {
            match (outcome, dimension) {
                (outcome, Dimension::Absent) => outcome,
                (FilterOutcome::Unfiltered, Dimension::Requested(ids)) => {
                    FilterOutcome::Restricted(ids)
                }
                (FilterOutcome::Restricted(current), Dimension::Requested(ids)) => {
                    FilterOutcome::Restricted(current.intersection(&ids).copied().collect())
                }
            }
        })
}

#[cfg(test)]
mod tests {
    use super::{combine_dimensions, Dimension, FilterOutcome};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn requested(values: &[i64]) -> Dimension {
        Dimension::Requested(values.iter().copied().collect())
    }

    #[test]
    fn no_dimensions_is_unfiltered() {
        assert_eq!(combine_dimensions(std::iter::empty()), FilterOutcome::Unfiltered);
        assert_eq!(
            combine_dimensions([Dimension::Absent, Dimension::Absent]),
            FilterOutcome::Unfiltered
        );
    }

    #[test]
    fn single_dimension_passes_through() {
        assert_eq!(
            combine_dimensions([Dimension::Absent, requested(&[3, 1])]),
            FilterOutcome::Restricted([1, 3].into_iter().collect())
        );
    }

    #[test]
    fn requested_but_empty_dimension_restricts_to_nothing() {
        let outcome = combine_dimensions([requested(&[]), Dimension::Absent]);
        assert_eq!(outcome, FilterOutcome::Restricted(BTreeSet::new()));
        assert!(!outcome.is_unfiltered());
        assert_eq!(outcome.restricted_len(), Some(0));
    }

    #[test]
    fn empty_dimension_absorbs_intersection() {
        assert_eq!(
            combine_dimensions([requested(&[1, 2]), requested(&[]), requested(&[2])]),
            FilterOutcome::Restricted(BTreeSet::new())
        );
    }

    #[test]
    fn three_dimensions_intersect() {
        assert_eq!(
            combine_dimensions([requested(&[1, 2, 3]), requested(&[2, 3]), requested(&[3, 4])]),
            FilterOutcome::Restricted([3].into_iter().collect())
        );
    }

    proptest! {
        #[test]
        fn intersection_is_commutative(
            left in proptest::collection::btree_set(0i64..50, 0..20),
            right in proptest::collection::btree_set(0i64..50, 0..20),
        ) {
            let forward = combine_dimensions([
                Dimension::Requested(left.clone()),
                Dimension::Requested(right.clone()),
            ]);
            let backward = combine_dimensions([
                Dimension::Requested(right),
                Dimension::Requested(left),
            ]);
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn single_requested_dimension_is_identity(
            ids in proptest::collection::btree_set(0i64..50, 0..20),
        ) {
            prop_assert_eq!(
                combine_dimensions([Dimension::Requested(ids.clone())]),
                FilterOutcome::Restricted(ids)
            );
        }
    }
}
