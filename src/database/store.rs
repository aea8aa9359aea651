use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Columns, Resource};

/// The persistence capability a resource service runs its statements
/// against. One store serves one table.
#[async_trait]
pub trait Store<R: Resource>: Send + Sync {
    async fn select_all(&self) -> Result<Vec<R>, DatabaseError>;

    async fn select_by_id(&self, id: i32) -> Result<Option<R>, DatabaseError>;

    /// Insert one row and return it with generated columns filled in
    async fn insert(&self, columns: Columns) -> Result<R, DatabaseError>;

    /// Returns the number of rows changed
    async fn update(&self, id: i32, columns: Columns) -> Result<u64, DatabaseError>;

    /// Returns the number of rows removed
    async fn delete(&self, id: i32) -> Result<u64, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
