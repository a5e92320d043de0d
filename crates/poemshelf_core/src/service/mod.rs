//! Use-case services over the store traits.
//!
//! # Responsibility
//! - Orchestrate store reads into listing and catalog use-cases.
//! - Keep CLI/web layers decoupled from storage details.

pub mod catalog_service;
pub mod listing_service;
