//! Facet filter resolution and set combination.
//!
//! # Responsibility
//! - Normalize raw listing parameters into a [`FilterRequest`](request::FilterRequest).
//! - Turn facet slugs into poem-id sets per dimension and fold the dimensions
//!   into one [`FilterOutcome`](combine::FilterOutcome).
//! - Plan page ranges and total page counts.
//!
//! # Invariants
//! - An absent dimension never restricts; a requested dimension that matches
//!   nothing restricts to nothing.
//! - `MatchMode::And` never yields more poems than `MatchMode::Or` for the
//!   same facet ids.

pub mod combine;
pub mod expand;
pub mod pagination;
pub mod request;
pub mod resolve;
