use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Columns, Resource};
use crate::database::query_builder::QueryBuilder;
use crate::database::store::Store;

/// Postgres-backed store for one resource table
pub struct Repository<R> {
    query: QueryBuilder<R>,
    pool: PgPool,
}

impl<R: Resource> Repository<R> {
    pub fn new(pool: PgPool) -> Result<Self, DatabaseError> {
        Ok(Self {
            query: QueryBuilder::new(R::TABLE)?,
            pool,
        })
    }
}

#[async_trait]
impl<R: Resource> Store<R> for Repository<R> {
    async fn select_all(&self) -> Result<Vec<R>, DatabaseError> {
        self.query.select_all(&self.pool).await
    }

    async fn select_by_id(&self, id: i32) -> Result<Option<R>, DatabaseError> {
        self.query.select_by_id(&self.pool, id).await
    }

    async fn insert(&self, columns: Columns) -> Result<R, DatabaseError> {
        self.query.insert_returning(&self.pool, columns).await
    }

    async fn update(&self, id: i32, columns: Columns) -> Result<u64, DatabaseError> {
        self.query.update(&self.pool, id, columns).await
    }

    async fn delete(&self, id: i32) -> Result<u64, DatabaseError> {
        self.query.delete(&self.pool, id).await
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
