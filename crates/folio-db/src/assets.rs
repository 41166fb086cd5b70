//! Relocated-asset repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;

use folio_core::{AssetKind, AssetRepository, BookAsset, Error, Result};

/// PostgreSQL implementation of [`AssetRepository`].
pub struct PgAssetRepository {
    pool: Pool<Postgres>,
}

impl PgAssetRepository {
    /// Create a new PgAssetRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssetRepository for PgAssetRepository {
    async fn commit_relocation(&self, book_id: i64, kind: AssetKind, url: &str) -> Result<()> {
        // One transaction per record. Delete-then-insert keeps the row for
        // (book_id, kind) unique without relying on an upsert conflict
        // target, and the source column is cleared only once the asset row
        // is part of the same committed unit of work.
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        sqlx::query("DELETE FROM book_assets WHERE book_id = $1 AND kind = $2")
            .bind(book_id)
            .bind(kind.as_str())
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO book_assets (book_id, kind, url) VALUES ($1, $2, $3)")
            .bind(book_id)
            .bind(kind.as_str())
            .bind(url)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("UPDATE books SET cover_source_url = NULL WHERE id = $1")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            // Rolls back the asset insert along with everything else.
            return Err(Error::BookNotFound(book_id));
        }

        tx.commit().await.map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "assets",
            op = "commit_relocation",
            book_id,
            url,
            "Committed asset relocation"
        );
        Ok(())
    }

    async fn find(&self, book_id: i64, kind: AssetKind) -> Result<Option<BookAsset>> {
        let row = sqlx::query(
            "SELECT id, book_id, kind, url FROM book_assets \
             WHERE book_id = $1 AND kind = $2",
        )
        .bind(book_id)
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| {
            let kind_str: String = row.get("kind");
            let kind = AssetKind::parse(&kind_str)
                .ok_or_else(|| Error::Internal(format!("unknown asset kind: {kind_str}")))?;
            Ok(BookAsset {
                id: row.get("id"),
                book_id: row.get("book_id"),
                kind,
                url: row.get("url"),
            })
        })
        .transpose()
    }
}
