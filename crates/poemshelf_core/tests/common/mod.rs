#![allow(dead_code)]

use poemshelf_core::db::open_db_in_memory;
use poemshelf_core::SqlitePoemStore;
use rusqlite::{params, Connection};

pub const LOVE: &str = "love";
pub const DEATH: &str = "death";
pub const SHORT: &str = "short";
pub const NATURE: &str = "nature";
pub const LONG: &str = "long";

/// Six poems, two poets, three themes, three tags.
///
/// | id | poet | themes      | tags          |
/// |----|------|-------------|---------------|
/// | 1  | 1    | love        | short, nature |
/// | 2  | 1    | death       | long          |
/// | 3  | 2    | love        | long, nature  |
/// | 4  | 2    | death       | short         |
/// | 5  | 1    | love, death | short         |
/// | 6  | -    | -           | -             |
pub fn seed_catalog(conn: &Connection) {
    conn.execute_batch(
        "INSERT INTO poet (id, poet_name, slug) VALUES
            (1, 'Emily Dickinson', 'emily-dickinson'),
            (2, 'Walt Whitman', 'walt-whitman'),
            (3, 'Unpublished Poet', 'unpublished-poet');

         INSERT INTO themes (id, name, slug) VALUES
            (1, 'Love', 'love'),
            (2, 'Death', 'death'),
            (3, 'Time', 'time');

         INSERT INTO tags (id, name, slug) VALUES
            (1, 'Short', 'short'),
            (2, 'Nature', 'nature'),
            (3, 'Long', 'long');

         INSERT INTO poems (id, title, slug, contents, counts, poet_id) VALUES
            (1, 'Wild Nights', 'wild-nights', 'Wild nights - Wild nights!', '{\"lines\":12,\"words\":54}', 1),
            (2, 'Because I could not stop for Death', 'because-i-could-not-stop', 'Because I could not stop', '{\"lines\":24}', 1),
            (3, 'Song of Myself', 'song-of-myself', 'I celebrate myself', '{\"lines\":1346}', 2),
            (4, 'O Captain! My Captain!', 'o-captain', 'O Captain! my Captain!', '{\"lines\":24}', 2),
            (5, 'I felt a Funeral, in my Brain', 'i-felt-a-funeral', 'I felt a Funeral', '{\"lines\":20}', 1),
            (6, 'Untitled Fragment', 'untitled-fragment', '', '{}', NULL);

         INSERT INTO poem_themes (poem_id, theme_id) VALUES
            (1, 1), (2, 2), (3, 1), (4, 2), (5, 1), (5, 2);

         INSERT INTO poem_tags (poem_id, tag_id) VALUES
            (1, 1), (1, 2), (2, 3), (3, 3), (3, 2), (4, 1), (5, 1);",
    )
    .unwrap();
}

/// Inserts `count` unlinked poems with ids starting at 1.
pub fn seed_bulk_poems(conn: &mut Connection, count: i64) {
    let tx = conn.transaction().unwrap();
    for id in 1..=count {
        tx.execute(
            "INSERT INTO poems (id, title, slug, contents, counts) VALUES (?1, ?2, ?3, '', '{}');",
            params![id, format!("Poem {id}"), format!("poem-{id}")],
        )
        .unwrap();
    }
    tx.commit().unwrap();
}

pub fn seeded_store() -> SqlitePoemStore {
    let conn = open_db_in_memory().unwrap();
    seed_catalog(&conn);
    SqlitePoemStore::try_new(conn).unwrap()
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
