//! URL store - DB queries for the `urls` table
//!
//! Every query is a single statement, generic over the sqlx Executor and run
//! against the pool by [`PgUrlStore`]. Handlers never see them directly; they
//! go through the [`UrlStore`] trait so the backing store can be swapped out.

use async_trait::async_trait;
use sqlx::{Executor, PgPool, Postgres};
use thiserror::Error;

use crate::models::StoredUrl;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("no URLs found in the database")]
    Empty,
}

#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Persist `url` under a freshly generated id
    async fn add(&self, url: &str) -> Result<StoredUrl, StoreError>;

    /// Every stored row, in no particular order
    async fn list_all(&self) -> Result<Vec<StoredUrl>, StoreError>;

    /// Remove every row, returning how many were deleted
    async fn clear_all(&self) -> Result<u64, StoreError>;

    /// One stored url chosen at random, or [`StoreError::Empty`]
    async fn pick_random(&self) -> Result<String, StoreError>;
}

/// Create the `urls` table if it does not exist yet
pub async fn init_schema<'e, E>(executor: E) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS urls (
            id UUID PRIMARY KEY,
            url TEXT NOT NULL
        )
        "#,
    )
    .execute(executor)
    .await?;

    Ok(())
}

/// Insert a url record
pub async fn insert_url<'e, E>(executor: E, record: &StoredUrl) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query("INSERT INTO urls (id, url) VALUES ($1, $2)")
        .bind(record.id)
        .bind(&record.url)
        .execute(executor)
        .await?;

    Ok(())
}

/// List all url records
pub async fn list_urls<'e, E>(executor: E) -> Result<Vec<StoredUrl>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as("SELECT id, url FROM urls")
        .fetch_all(executor)
        .await
}

/// Delete all url records
pub async fn delete_all_urls<'e, E>(executor: E) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query("DELETE FROM urls").execute(executor).await?;
    Ok(result.rows_affected())
}

/// Pick one url at random in a single statement, so concurrent writers
/// cannot shift the choice between a count and a fetch.
pub async fn random_url<'e, E>(executor: E) -> Result<Option<String>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let row: Option<(String,)> = sqlx::query_as("SELECT url FROM urls ORDER BY random() LIMIT 1")
        .fetch_optional(executor)
        .await?;

    Ok(row.map(|r| r.0))
}

/// Postgres-backed [`UrlStore`]
#[derive(Clone)]
pub struct PgUrlStore {
    db: PgPool,
}

impl PgUrlStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UrlStore for PgUrlStore {
    async fn add(&self, url: &str) -> Result<StoredUrl, StoreError> {
        let record = StoredUrl::new(url);
        insert_url(&self.db, &record).await?;
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<StoredUrl>, StoreError> {
        Ok(list_urls(&self.db).await?)
    }

    async fn clear_all(&self) -> Result<u64, StoreError> {
        Ok(delete_all_urls(&self.db).await?)
    }

    async fn pick_random(&self) -> Result<String, StoreError> {
        random_url(&self.db).await?.ok_or(StoreError::Empty)
    }
}

#[cfg(test)]
pub use memory::MemoryUrlStore;


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn add_assigns_unique_ids() {
        let store = MemoryUrlStore::new();
        let first = store.add("https://example.com/a").await.unwrap();
        let second = store.add("https://example.com/a").await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.url, "https://example.com/a");
        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn pick_random_on_empty_store_is_empty_error() {
        let store = MemoryUrlStore::new();
        assert!(matches!(store.pick_random().await, Err(StoreError::Empty)));
    }

    #[tokio::test]
    async fn pick_random_returns_a_stored_url() {
        let urls = ["https://a.test/1", "https://a.test/2", "https://a.test/3"];
        let store = MemoryUrlStore::with_urls(&urls);
        let stored: HashSet<&str> = urls.into_iter().collect();

        for _ in 0..20 {
            let picked = store.pick_random().await.unwrap();
            assert!(stored.contains(picked.as_str()));
        }
    }

    #[tokio::test]
    async fn clear_all_reports_removed_rows() {
        let store = MemoryUrlStore::with_urls(&["x", "y"]);
        assert_eq!(store.clear_all().await.unwrap(), 2);
        assert!(store.list_all().await.unwrap().is_empty());
        assert_eq!(store.clear_all().await.unwrap(), 0);
    }

    #[test]
    fn empty_error_message_mentions_missing_urls() {
        assert_eq!(StoreError::Empty.to_string(), "no URLs found in the database");
    }
}
