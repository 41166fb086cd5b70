//! Folio backfill runner.
//!
//! Operational entrypoint for the enrichment and migration jobs.
//!
//! Usage:
//!   cargo run --bin folio-backfill -- enrich --page-size 100
//!   cargo run --bin folio-backfill -- enrich --drain
//!   cargo run --bin folio-backfill -- migrate
//!   cargo run --bin folio-backfill -- lookup 9788960777330
//!
//! Configuration comes from the environment (a `.env` file is honored):
//! `DATABASE_URL`, `FOLIO_LOOKUP_URL`, `FOLIO_LOOKUP_API_KEY`,
//! `FOLIO_STORE_URL`, `FOLIO_STORE_BUCKET`, `FOLIO_STORE_PUBLIC_URL`,
//! `FOLIO_MIGRATION_POOL_SIZE`.

use std::env;
use std::process;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use folio_core::defaults::ENRICH_PAGE_LIMIT;
use folio_db::{Database, PgAssetRepository, PgBookRepository};
use folio_jobs::{
    CatalogLookupClient, CoverMigrator, HttpCoverFetcher, HttpObjectStore, LookupConfig,
    StoreConfig, TocEnricher,
};

#[derive(Debug)]
enum Command {
    Enrich,
    Migrate,
    Lookup(String),
}

#[derive(Debug)]
struct Args {
    command: Command,
    page_size: i64,
    drain: bool,
}

fn parse_args() -> Args {
    let args: Vec<String> = env::args().collect();

    let Some(command) = args.get(1) else {
        print_help();
        process::exit(2);
    };

    let command = match command.as_str() {
        "enrich" => Command::Enrich,
        "migrate" => Command::Migrate,
        "lookup" => match args.get(2) {
            Some(isbn) => Command::Lookup(isbn.clone()),
            None => {
                eprintln!("lookup requires an ISBN argument");
                process::exit(2);
            }
        },
        "--help" | "-h" => {
            print_help();
            process::exit(0);
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_help();
            process::exit(2);
        }
    };

    let mut result = Args {
        command,
        page_size: ENRICH_PAGE_LIMIT,
        drain: false,
    };

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--page-size" | "-p" => {
                i += 1;
                if let Some(n) = args.get(i).and_then(|v| v.parse::<i64>().ok()) {
                    result.page_size = n;
                } else {
                    eprintln!("--page-size requires a number");
                    process::exit(2);
                }
            }
            "--drain" => {
                result.drain = true;
            }
            _ => {}
        }
        i += 1;
    }

    result
}

fn print_help() {
    eprintln!(
        "folio-backfill: catalog enrichment and migration runner

USAGE:
    folio-backfill enrich [--page-size N] [--drain]
    folio-backfill migrate
    folio-backfill lookup <ISBN>

COMMANDS:
    enrich    Run one enrichment batch (--drain repeats until exhausted)
    migrate   Relocate all external cover images into the object store
    lookup    Fetch the table of contents for a single ISBN"
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args();

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
    let db = Database::connect(&database_url).await?;
    let books = Arc::new(PgBookRepository::new(db.pool.clone()));

    match args.command {
        Command::Enrich => {
            let source = Arc::new(CatalogLookupClient::new(LookupConfig::from_env()?));
            let enricher = TocEnricher::new(books, source);

            loop {
                let considered = enricher.run_batch(Some(args.page_size)).await?;
                println!("{considered}");
                if !args.drain || considered == 0 {
                    break;
                }
            }
        }
        Command::Migrate => {
            let pool_size = env::var("FOLIO_MIGRATION_POOL_SIZE")
                .ok()
                .and_then(|v| v.parse::<usize>().ok());

            let mut migrator = CoverMigrator::new(
                books,
                Arc::new(PgAssetRepository::new(db.pool.clone())),
                Arc::new(HttpObjectStore::new(StoreConfig::from_env()?)),
                Arc::new(HttpCoverFetcher::new()),
            );
            if let Some(n) = pool_size {
                migrator = migrator.with_pool_size(n);
            }

            let summary = migrator.migrate_all().await?;
            println!("{} succeeded, {} failed", summary.succeeded, summary.failed);
        }
        Command::Lookup(isbn) => {
            let source = Arc::new(CatalogLookupClient::new(LookupConfig::from_env()?));
            let enricher = TocEnricher::new(books, source);

            match enricher.lookup_one(&isbn).await {
                Some(toc) => println!("{toc}"),
                None => {
                    println!("not found");
                    process::exit(1);
                }
            }
        }
    }

    Ok(())
}
