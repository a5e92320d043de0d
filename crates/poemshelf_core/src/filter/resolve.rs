//! Facet slug -> facet id resolution.

use crate::model::facet::{FacetId, FacetKind};
use crate::repo::store::PoemStore;
use crate::repo::StoreResult;
use log::debug;
use std::collections::BTreeSet;

/// Resolves requested slugs of one facet kind to store ids.
///
/// Unknown slugs are dropped, so the result may be smaller than the input.
/// Callers only invoke this for dimensions that were actually requested.
///
/// # Errors
/// - Store errors are returned unchanged; there is no retry.
pub fn resolve_facet_ids<S: PoemStore + ?Sized>(
    store: &S,
    kind: FacetKind,
    slugs: &[String],
) -> StoreResult<BTreeSet<FacetId>> {
    let ids = store.resolve_identifiers(kind, slugs)?;
    if ids.len() < slugs.len() {
        debug!(
            "event=facet_resolve module=filter status=partial kind={} requested={} resolved={}",
            kind.as_str(),
            slugs.len(),
            ids.len()
        );
    }
    Ok(ids)
}
