//! SQLite-backed implementation of [`PoemStore`] and [`CatalogStore`].
//!
//! # Responsibility
//! - Translate facet/membership/listing reads into SQL over the catalog schema.
//! - Map rows into typed models, rejecting malformed persisted data.
//!
//! # Invariants
//! - Id and slug lists are bound as one JSON array parameter and expanded with
//!   `json_each`, so list length never hits SQLite's bind-variable limit.
//! - `FilterOutcome::Restricted` with an empty set matches no rows.
//! - Listing order is `poems.id ASC` so pages are stable.
//! - All access to the single connection is serialized behind a mutex.

use super::store::{CatalogStore, PoemPage, PoemStore};
use super::{StoreError, StoreResult};
use crate::filter::combine::FilterOutcome;
use crate::filter::pagination::PageRange;
use crate::model::facet::{Facet, FacetId, FacetKind, MatchMode};
use crate::model::poem::{Poem, PoemCounts, PoemId, PoemSummary, Poet, PoetId, PoetRef};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Mutex;

const REQUIRED_TABLES: [&str; 6] = [
    "poet",
    "poems",
    "themes",
    "tags",
    "poem_themes",
    "poem_tags",
];

const POEM_SELECT_SQL: &str = "SELECT
    p.id,
    p.title,
    p.slug,
    p.contents,
    p.counts,
    pt.slug AS poet_slug,
    pt.poet_name AS poet_name
FROM poems p
LEFT JOIN poet pt ON pt.id = p.poet_id";

/// Catalog store over one migrated SQLite connection.
pub struct SqlitePoemStore {
    conn: Mutex<Connection>,
}

impl SqlitePoemStore {
    /// Wraps a migrated connection after checking the catalog tables exist.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        ensure_catalog_ready(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> StoreResult<T>) -> StoreResult<T> {
        let guard = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        f(&guard)
    }
}

impl PoemStore for SqlitePoemStore {
    fn resolve_identifiers(
        &self,
        kind: FacetKind,
        slugs: &[String],
    ) -> StoreResult<BTreeSet<FacetId>> {
        if slugs.is_empty() {
            return Ok(BTreeSet::new());
        }

        let slugs_json = json_array(slugs)?;
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT id
                 FROM {}
                 WHERE slug IN (SELECT value FROM json_each(?1));",
                facet_table(kind)
            ))?;
            let mut rows = stmt.query([slugs_json.as_str()])?;
            let mut ids = BTreeSet::new();
            while let Some(row) = rows.next()? {
                ids.insert(row.get::<_, FacetId>(0)?);
            }
            Ok(ids)
        })
    }

    fn records_linked_to(
        &self,
        kind: FacetKind,
        facet_ids: &BTreeSet<FacetId>,
        mode: MatchMode,
    ) -> StoreResult<BTreeSet<PoemId>> {
        if facet_ids.is_empty() {
            return Ok(BTreeSet::new());
        }

        let ids_json = json_array(facet_ids)?;
        let link_table = link_table(kind);
        let link_column = link_column(kind);
        self.with_conn(|conn| {
            let mut bind_values = vec![Value::Text(ids_json)];
            let sql = match mode {
                MatchMode::Or => format!(
                    "SELECT DISTINCT poem_id
                     FROM {link_table}
                     WHERE {link_column} IN (SELECT value FROM json_each(?));"
                ),
                MatchMode::And => {
                    bind_values.push(Value::Integer(count_to_i64(facet_ids.len() as u64)));
                    format!(
                        "SELECT poem_id
                         FROM {link_table}
                         WHERE {link_column} IN (SELECT value FROM json_each(?))
                         GROUP BY poem_id
                         HAVING COUNT(DISTINCT {link_column}) = ?;"
                    )
                }
            };

            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(bind_values))?;
            let mut poem_ids = BTreeSet::new();
            while let Some(row) = rows.next()? {
                poem_ids.insert(row.get::<_, PoemId>(0)?);
            }
            Ok(poem_ids)
        })
    }

    fn fetch_records(&self, outcome: &FilterOutcome, range: PageRange) -> StoreResult<PoemPage> {
        let mut where_sql = String::new();
        let mut bind_values: Vec<Value> = Vec::new();
        match outcome {
            FilterOutcome::Unfiltered => {}
            FilterOutcome::Restricted(ids) if ids.is_empty() => {
                where_sql.push_str(" WHERE 0");
            }
            FilterOutcome::Restricted(ids) => {
                where_sql.push_str(" WHERE p.id IN (SELECT value FROM json_each(?))");
                bind_values.push(Value::Text(json_array(ids)?));
            }
        }

        self.with_conn(|conn| {
            let total_count: i64 = conn.query_row(
                &format!("SELECT COUNT(*) FROM poems p{where_sql};"),
                params_from_iter(bind_values.iter()),
                |row| row.get(0),
            )?;

            let mut page_values = bind_values.clone();
            page_values.push(Value::Integer(count_to_i64(range.row_count())));
            page_values.push(Value::Integer(count_to_i64(range.from)));
            let mut stmt = conn.prepare(&format!(
                "{POEM_SELECT_SQL}{where_sql} ORDER BY p.id ASC LIMIT ? OFFSET ?;"
            ))?;
            let mut rows = stmt.query(params_from_iter(page_values))?;
            let mut poems = Vec::new();
            while let Some(row) = rows.next()? {
                poems.push(parse_poem_row(row)?);
            }

            Ok(PoemPage {
                poems,
                total_count: u64::try_from(total_count).unwrap_or(0),
            })
        })
    }

    fn fetch_facet_vocabulary(&self, kind: FacetKind) -> StoreResult<Vec<Facet>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT id, name, slug FROM {} ORDER BY id ASC;",
                facet_table(kind)
            ))?;
            let mut rows = stmt.query([])?;
            let mut facets = Vec::new();
            while let Some(row) = rows.next()? {
                facets.push(Facet {
                    id: row.get("id")?,
                    name: row.get("name")?,
                    slug: row.get("slug")?,
                });
            }
            Ok(facets)
        })
    }
}

impl CatalogStore for SqlitePoemStore {
    fn list_poets(&self) -> StoreResult<Vec<Poet>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, poet_name, slug FROM poet ORDER BY id ASC;")?;
            let mut rows = stmt.query([])?;
            let mut poets = Vec::new();
            while let Some(row) = rows.next()? {
                poets.push(parse_poet_row(row)?);
            }
            Ok(poets)
        })
    }

    fn find_poet_by_slug(&self, slug: &str) -> StoreResult<Option<Poet>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, poet_name, slug FROM poet WHERE slug = ?1;")?;
            let mut rows = stmt.query([slug])?;
            match rows.next()? {
                Some(row) => Ok(Some(parse_poet_row(row)?)),
                None => Ok(None),
            }
        })
    }

    fn poems_by_poet(&self, poet_id: PoetId) -> StoreResult<Vec<PoemSummary>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, slug, counts
                 FROM poems
                 WHERE poet_id = ?1
                 ORDER BY id ASC;",
            )?;
            let mut rows = stmt.query(params![poet_id])?;
            let mut poems = Vec::new();
            while let Some(row) = rows.next()? {
                let id: PoemId = row.get("id")?;
                poems.push(PoemSummary {
                    id,
                    title: row.get("title")?,
                    slug: row.get("slug")?,
                    counts: parse_counts(id, &row.get::<_, String>("counts")?)?,
                });
            }
            Ok(poems)
        })
    }

    fn find_poem_by_slug(&self, slug: &str) -> StoreResult<Option<Poem>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{POEM_SELECT_SQL} WHERE p.slug = ?1;"))?;
            let mut rows = stmt.query([slug])?;
            match rows.next()? {
                Some(row) => Ok(Some(parse_poem_row(row)?)),
                None => Ok(None),
            }
        })
    }
}

fn parse_poem_row(row: &Row<'_>) -> StoreResult<Poem> {
    let id: PoemId = row.get("id")?;
    let counts_text: String = row.get("counts")?;
    let poet_slug: Option<String> = row.get("poet_slug")?;
    let poet_name: Option<String> = row.get("poet_name")?;
    let poet = match (poet_slug, poet_name) {
        (Some(slug), Some(poet_name)) => Some(PoetRef { slug, poet_name }),
        _ => None,
    };

    Ok(Poem {
        id,
        title: row.get("title")?,
        slug: row.get("slug")?,
        contents: row.get("contents")?,
        counts: parse_counts(id, &counts_text)?,
        poet,
    })
}

fn parse_poet_row(row: &Row<'_>) -> StoreResult<Poet> {
    Ok(Poet {
        id: row.get("id")?,
        poet_name: row.get("poet_name")?,
        slug: row.get("slug")?,
    })
}

fn parse_counts(poem_id: PoemId, value: &str) -> StoreResult<PoemCounts> {
    serde_json::from_str(value).map_err(|err| {
        StoreError::InvalidData(format!(
            "invalid counts `{value}` in poems.counts for poem {poem_id}: {err}"
        ))
    })
}

fn json_array<T: Serialize + ?Sized>(values: &T) -> StoreResult<String> {
    serde_json::to_string(values)
        .map_err(|err| StoreError::InvalidData(format!("cannot encode bind list: {err}")))
}

fn count_to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn facet_table(kind: FacetKind) -> &'static str {
    match kind {
        FacetKind::Theme => "themes",
        FacetKind::Tag => "tags",
    }
}

fn link_table(kind: FacetKind) -> &'static str {
    match kind {
        FacetKind::Theme => "poem_themes",
        FacetKind::Tag => "poem_tags",
    }
}

fn link_column(kind: FacetKind) -> &'static str {
    match kind {
        FacetKind::Theme => "theme_id",
        FacetKind::Tag => "tag_id",
    }
}

fn ensure_catalog_ready(conn: &Connection) -> StoreResult<()> {
    for table in REQUIRED_TABLES {
        if !table_exists(conn, table)? {
            return Err(StoreError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

#[cfg(test)]
mod tests {
    use super::{SqlitePoemStore, StoreError};
    use rusqlite::Connection;

    #[test]
    fn try_new_rejects_connection_without_catalog_schema() {
        let conn = Connection::open_in_memory().expect("in-memory sqlite should open");
        let err = SqlitePoemStore::try_new(conn)
            .err()
            .expect("bare connection must be rejected");
        assert!(matches!(err, StoreError::MissingRequiredTable("poet")));
    }
}
