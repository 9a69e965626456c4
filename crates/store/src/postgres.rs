//! Postgres JSONB backend.
//!
//! Each collection maps to one table of `(id uuid primary key, doc jsonb)`.
//! Documents are stored whole; `mutate` runs inside a transaction with
//! `SELECT ... FOR UPDATE` so concurrent membership changes serialize at the
//! row, matching the in-memory backend's guarantees.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::collection::{Collection, Document, Mutation};
use crate::error::{StoreError, StoreResult};

/// Every collection table, for one-shot schema setup at startup.
pub const TABLES: &[&str] = &[
    "users",
    "courses",
    "assignments",
    "events",
    "discussions",
    "groups",
    "resources",
    "notifications",
];

/// Create all collection tables that do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> StoreResult<()> {
    for table in TABLES {
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {table} (id UUID PRIMARY KEY, doc JSONB NOT NULL)"
        );
        sqlx::query(&ddl).execute(pool).await.map_err(map_sqlx)?;
    }
    Ok(())
}

pub struct PgCollection<T> {
    pool: PgPool,
    table: &'static str,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> PgCollection<T> {
    pub fn new(pool: PgPool, table: &'static str) -> Self {
        Self {
            pool,
            table,
            _marker: std::marker::PhantomData,
        }
    }
}

fn map_sqlx(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Io(e) => StoreError::unavailable(e.to_string()),
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            StoreError::unavailable(err.to_string())
        }
        other => StoreError::backend(other.to_string()),
    }
}

fn decode<T: Document>(value: serde_json::Value) -> StoreResult<T> {
    serde_json::from_value(value).map_err(|e| StoreError::backend(e.to_string()))
}

fn encode<T: Document>(doc: &T) -> StoreResult<serde_json::Value> {
    serde_json::to_value(doc).map_err(|e| StoreError::backend(e.to_string()))
}

#[async_trait]
impl<T: Document> Collection<T> for PgCollection<T> {
    async fn insert(&self, doc: T) -> StoreResult<T> {
        let sql = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", self.table);
        sqlx::query(&sql)
            .bind(doc.doc_id())
            .bind(encode(&doc)?)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(doc)
    }

    async fn find(&self, id: Uuid) -> StoreResult<Option<T>> {
        let sql = format!("SELECT doc FROM {} WHERE id = $1", self.table);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        match row {
            Some(row) => {
                let value: serde_json::Value = row.try_get("doc").map_err(map_sqlx)?;
                Ok(Some(decode(value)?))
            }
            None => Ok(None),
        }
    }

    async fn all(&self) -> StoreResult<Vec<T>> {
        // UUIDv7 ids sort by creation time, so ordering by id matches the
        // in-memory backend.
        let sql = format!("SELECT doc FROM {} ORDER BY id", self.table);
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        let mut docs = Vec::with_capacity(rows.len());
        for row in rows {
            let value: serde_json::Value = row.try_get("doc").map_err(map_sqlx)?;
            docs.push(decode(value)?);
        }
        Ok(docs)
    }

    async fn mutate(&self, id: Uuid, mutation: Mutation<T>) -> StoreResult<T> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let select = format!("SELECT doc FROM {} WHERE id = $1 FOR UPDATE", self.table);
        let row = sqlx::query(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?
            .ok_or(StoreError::NotFound)?;
        let value: serde_json::Value = row.try_get("doc").map_err(map_sqlx)?;
        let mut doc: T = decode(value)?;

        // A rejected mutation rolls the transaction back on drop.
        mutation(&mut doc)?;

        let update = format!("UPDATE {} SET doc = $2 WHERE id = $1", self.table);
        sqlx::query(&update)
            .bind(id)
            .bind(encode(&doc)?)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        tx.commit().await.map_err(map_sqlx)?;
        Ok(doc)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }
}
