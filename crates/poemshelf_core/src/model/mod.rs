//! Read models for the poem catalog.
//!
//! # Responsibility
//! - Define the typed shapes rows are mapped into at the store boundary.
//! - Keep facet kinds and match modes explicit so dimensions never mix.
//!
//! # Invariants
//! - Every poem, poet and facet is identified by a store-assigned integer id.
//! - Slugs are unique within their entity kind.

pub mod facet;
pub mod poem;
