//! Command-line front end for a poemshelf catalog database.
//!
//! # Responsibility
//! - Parse listing/lookup commands and print results as JSON.
//! - Map not-found to exit status 1 and infrastructure failures to 2.

use clap::{Parser, Subcommand};
use log::error;
use poemshelf_core::db::open_db;
use poemshelf_core::{
    default_log_level, init_logging, CatalogError, CatalogService, FilterRequest, ListingService,
    SqlitePoemStore,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "poemshelf", version, about = "Browse a poem catalog by theme and tag")]
struct Cli {
    /// SQLite catalog file (created and migrated when missing).
    #[arg(long, short = 'd', default_value = "poemshelf.sqlite3")]
    db: PathBuf,

    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logs go to stderr when unset.
    #[arg(long)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List poems, e.g. `list "theme=love&tag=short&tag=nature&tag_match=and&page=2"`.
    List {
        /// Query string with repeatable `theme` and `tag`, plus `tag_match` and `page`.
        #[arg(default_value = "")]
        query: String,
    },
    /// List every poet.
    Poets,
    /// Show one poet and their poems.
    Poet { slug: String },
    /// Show one poem.
    Poem { slug: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or_else(|| default_log_level());
    if let Err(err) = init_logging(level, cli.log_dir.as_deref()) {
        eprintln!("poemshelf: {err}");
        return ExitCode::from(2);
    }

    let conn = match open_db(&cli.db) {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=cli_open module=cli status=error error={err}");
            eprintln!("poemshelf: cannot open `{}`: {err}", cli.db.display());
            return ExitCode::from(2);
        }
    };
    let store = match SqlitePoemStore::try_new(conn) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("poemshelf: {err}");
            return ExitCode::from(2);
        }
    };

    match cli.command {
        Command::List { query } => {
            let listing = ListingService::new(&store)
                .list_poems(&FilterRequest::from_query_string(&query));
            print_json(&listing)
        }
        Command::Poets => lookup(CatalogService::new(&store).list_poets()),
        Command::Poet { slug } => lookup(CatalogService::new(&store).poet_with_poems(&slug)),
        Command::Poem { slug } => lookup(CatalogService::new(&store).poem_by_slug(&slug)),
    }
}

fn lookup<T: Serialize>(result: Result<T, CatalogError>) -> ExitCode {
    match result {
        Ok(value) => print_json(&value),
        Err(err) if err.is_not_found() => {
            eprintln!("poemshelf: {err}");
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("poemshelf: {err}");
            ExitCode::from(2)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("poemshelf: cannot encode output: {err}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn list_query_defaults_to_empty() {
        let cli = Cli::try_parse_from(["poemshelf", "list"]).expect("list should parse");
        match cli.command {
            Command::List { query } => assert!(query.is_empty()),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn poet_lookup_takes_slug_and_global_flags() {
        let cli = Cli::try_parse_from([
            "poemshelf",
            "--db",
            "/tmp/catalog.db",
            "--log-level",
            "warn",
            "poet",
            "walt-whitman",
        ])
        .expect("poet should parse");
        assert_eq!(cli.db.to_str(), Some("/tmp/catalog.db"));
        assert_eq!(cli.log_level.as_deref(), Some("warn"));
        assert!(matches!(cli.command, Command::Poet { ref slug } if slug == "walt-whitman"));
    }
}
