//! Poem and poet read models.
//!
//! # Invariants
//! - `PoemCounts` is always a JSON object. Its values are carried untouched;
//!   only malformed JSON or a non-object in `poems.counts` is rejected at the
//!   store boundary.
//! - A poem's poet reference is optional (orphaned poems are still listed).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Store-assigned poem identifier.
pub type PoemId = i64;

/// Store-assigned poet identifier.
pub type PoetId = i64;

/// Denormalized counters kept alongside each poem (lines, words, ...).
///
/// Keys and value shapes are owned by whoever writes the catalog; this crate
/// only carries them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoemCounts(pub Map<String, Value>);

impl PoemCounts {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Integer counter under `key`; `None` when absent or not an integer.
    pub fn counter(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_i64)
    }
}

/// The slice of a poet a poem listing needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoetRef {
    pub slug: String,
    pub poet_name: String,
}

/// Full poem record as listed and shown on detail pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poem {
    pub id: PoemId,
    pub title: String,
    pub slug: String,
    /// Poem body text.
    pub contents: String,
    pub counts: PoemCounts,
    pub poet: Option<PoetRef>,
}

/// Poem row without body, used on a poet's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemSummary {
    pub id: PoemId,
    pub title: String,
    pub slug: String,
    pub counts: PoemCounts,
}

/// Poet directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poet {
    pub id: PoetId,
    pub poet_name: String,
    pub slug: String,
}
