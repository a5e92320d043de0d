//! Poet directory and single-entity lookups.
//!
//! # Responsibility
//! - List poets, show one poet with their poems, show one poem.
//! - Report unknown slugs as not-found, distinct from store failures.

use crate::model::poem::{Poem, PoemSummary, Poet};
use crate::repo::store::CatalogStore;
use crate::repo::StoreError;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for catalog lookups.
#[derive(Debug)]
pub enum CatalogError {
    /// No poet has this slug.
    PoetNotFound(String),
    /// No poem has this slug.
    PoemNotFound(String),
    Store(StoreError),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PoetNotFound(_) | Self::PoemNotFound(_))
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PoetNotFound(slug) => write!(f, "poet not found: `{slug}`"),
            Self::PoemNotFound(slug) => write!(f, "poem not found: `{slug}`"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for CatalogError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// A poet together with the poems attributed to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoetPage {
    pub poet: Poet,
    /// Ordered by poem id.
    pub poems: Vec<PoemSummary>,
}

/// Catalog service facade over a [`CatalogStore`].
pub struct CatalogService<S: CatalogStore> {
    store: S,
}

impl<S: CatalogStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists every poet ordered by id.
    pub fn list_poets(&self) -> Result<Vec<Poet>, CatalogError> {
        let poets = self.store.list_poets().map_err(|err| {
            log_lookup_error("poets", &err);
            CatalogError::from(err)
        })?;
        info!(
            "event=catalog_lookup module=service status=ok target=poets rows={}",
            poets.len()
        );
        Ok(poets)
    }

    /// Loads one poet by slug plus summaries of their poems.
    ///
    /// # Errors
    /// - `PoetNotFound` for an unknown or blank slug.
    /// - `Store` when either read fails.
    pub fn poet_with_poems(&self, slug: &str) -> Result<PoetPage, CatalogError> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(CatalogError::PoetNotFound(slug.to_string()));
        }

        let poet = self
            .store
            .find_poet_by_slug(slug)
            .and_then(|poet| match poet {
                Some(poet) => self
                    .store
                    .poems_by_poet(poet.id)
                    .map(|poems| Some(PoetPage { poet, poems })),
                None => Ok(None),
            })
            .map_err(|err| {
                log_lookup_error("poet", &err);
                CatalogError::from(err)
            })?;

        match poet {
            Some(page) => {
                info!(
                    "event=catalog_lookup module=service status=ok target=poet poems={}",
                    page.poems.len()
                );
                Ok(page)
            }
            None => {
                info!("event=catalog_lookup module=service status=not_found target=poet");
                Err(CatalogError::PoetNotFound(slug.to_string()))
            }
        }
    }

    /// Loads one poem by slug with its poet reference.
    pub fn poem_by_slug(&self, slug: &str) -> Result<Poem, CatalogError> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(CatalogError::PoemNotFound(slug.to_string()));
        }

        let poem = self.store.find_poem_by_slug(slug).map_err(|err| {
            log_lookup_error("poem", &err);
            CatalogError::from(err)
        })?;
        poem.ok_or_else(|| {
            info!("event=catalog_lookup module=service status=not_found target=poem");
            CatalogError::PoemNotFound(slug.to_string())
        })
    }
}

fn log_lookup_error(target: &str, err: &StoreError) {
    error!(
        "event=catalog_lookup module=service status=error target={} error={}",
        target, err
    );
}
