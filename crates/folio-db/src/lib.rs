//! # folio-db
//!
//! PostgreSQL catalog store layer for the folio backfill pipeline.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for books and relocated assets
//! - A combined [`Database`] context bundling all repositories
//!
//! ## Example
//!
//! ```rust,ignore
//! use folio_db::Database;
//! use folio_core::BookRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/folio").await?;
//!     let candidates = db.books.toc_candidates(Some(100)).await?;
//!     println!("{} books still missing a table of contents", candidates.len());
//!     Ok(())
//! }
//! ```

pub mod assets;
pub mod books;
pub mod pool;

// Test fixtures for integration tests.
// Always compiled so integration tests (in tests/) can use them.
pub mod test_fixtures;

// Re-export core types
pub use folio_core::*;

pub use assets::PgAssetRepository;
pub use books::PgBookRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};

/// Combined database context with all repositories.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Book repository for candidate selection and attribute updates.
    pub books: PgBookRepository,
    /// Asset repository for relocation commits.
    pub assets: PgAssetRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            books: PgBookRepository::new(pool.clone()),
            assets: PgAssetRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect to the database and create a Database instance.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url).await?;
        Ok(Self::new(pool))
    }
}
