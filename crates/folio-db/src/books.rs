//! Book repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::debug;

use folio_core::{Book, BookRepository, Error, Result};

const BOOK_COLUMNS: &str = "id, isbn, title, toc, cover_source_url";

/// PostgreSQL implementation of [`BookRepository`].
pub struct PgBookRepository {
    pool: Pool<Postgres>,
}

impl PgBookRepository {
    /// Create a new PgBookRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn toc_candidates(&self, limit: Option<i64>) -> Result<Vec<Book>> {
        let books = match limit {
            Some(n) => {
                sqlx::query_as::<_, Book>(&format!(
                    "SELECT {BOOK_COLUMNS} FROM books \
                     WHERE toc IS NULL OR toc = '' \
                     ORDER BY id ASC LIMIT $1"
                ))
                .bind(n.max(0))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Book>(&format!(
                    "SELECT {BOOK_COLUMNS} FROM books \
                     WHERE toc IS NULL OR toc = '' \
                     ORDER BY id ASC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        debug!(
            subsystem = "db",
            component = "books",
            op = "toc_candidates",
            result_count = books.len(),
            "Selected enrichment candidates"
        );
        Ok(books)
    }

    async fn cover_candidates(&self) -> Result<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books \
             WHERE cover_source_url IS NOT NULL \
             ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(
            subsystem = "db",
            component = "books",
            op = "cover_candidates",
            result_count = books.len(),
            "Selected migration candidates"
        );
        Ok(books)
    }

    async fn set_toc(&self, id: i64, toc: &str) -> Result<()> {
        let result = sqlx::query("UPDATE books SET toc = $2 WHERE id = $1")
            .bind(id)
            .bind(toc)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::BookNotFound(id));
        }
        Ok(())
    }
}
