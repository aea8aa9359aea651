use std::sync::Arc;

use crate::database::manager::DatabaseError;
use crate::database::models::{Folder, IntoColumns, Note, Resource};
use crate::database::store::Store;

/// CRUD operations on one resource table. Every call is a single statement
/// with no composition across calls.
pub struct ResourceService<R: Resource> {
    store: Arc<dyn Store<R>>,
}

pub type NotesService = ResourceService<Note>;
pub type FoldersService = ResourceService<Folder>;

impl<R: Resource> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(store: Arc<dyn Store<R>>) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Result<Vec<R>, DatabaseError> {
        self.store.select_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<R>, DatabaseError> {
        self.store.select_by_id(id).await
    }

    pub async fn insert<I>(&self, record: I) -> Result<R, DatabaseError>
    where
        I: IntoColumns + Send,
    {
        let created = self.store.insert(record.into_columns()).await?;
        tracing::info!("Inserted {} {}", R::TABLE, created.id());
        Ok(created)
    }

    /// Writes only the supplied fields; returns how many rows matched
    pub async fn update<I>(&self, id: i32, fields: I) -> Result<u64, DatabaseError>
    where
        I: IntoColumns + Send,
    {
        let affected = self.store.update(id, fields.into_columns()).await?;
        tracing::info!("Updated {} {} ({} row(s))", R::TABLE, id, affected);
        Ok(affected)
    }

    pub async fn delete(&self, id: i32) -> Result<u64, DatabaseError> {
        let affected = self.store.delete(id).await?;
        tracing::info!("Deleted {} {} ({} row(s))", R::TABLE, id, affected);
        Ok(affected)
    }

    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        self.store.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{FolderChanges, NewFolder, NewNote, NoteChanges};
    use crate::testing::MemoryStore;

    fn folders() -> FoldersService {
        FoldersService::new(Arc::new(MemoryStore::<Folder>::new()))
    }

    fn notes() -> NotesService {
        NotesService::new(Arc::new(MemoryStore::<Note>::new()))
    }

    #[tokio::test]
    async fn insert_returns_generated_fields() {
        let service = notes();
        let note = service
            .insert(NewNote {
                name: "Groceries".to_string(),
                content: "milk".to_string(),
                folderid: None,
            })
            .await
            .unwrap();
        assert_eq!(note.id, 1);
        assert_eq!(service.get_by_id(1).await.unwrap(), Some(note));
    }

    #[tokio::test]
    async fn get_by_id_missing_is_none() {
        assert_eq!(folders().get_by_id(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_reports_affected_rows() {
        let service = folders();
        let folder = service.insert(NewFolder { name: "a".to_string() }).await.unwrap();

        let changes = FolderChanges { name: Some("b".to_string()) };
        assert_eq!(service.update(folder.id, changes).await.unwrap(), 1);

        let changes = FolderChanges { name: Some("c".to_string()) };
        assert_eq!(service.update(999, changes).await.unwrap(), 0);

        let stored = service.get_by_id(folder.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "b");
    }

    #[tokio::test]
    async fn update_leaves_other_fields() {
        let service = notes();
        let note = service
            .insert(NewNote {
                name: "n".to_string(),
                content: "c".to_string(),
                folderid: Some(3),
            })
            .await
            .unwrap();

        let changes = NoteChanges {
            content: Some("new".to_string()),
            ..Default::default()
        };
        service.update(note.id, changes).await.unwrap();

        let stored = service.get_by_id(note.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "n");
        assert_eq!(stored.content, "new");
        assert_eq!(stored.folderid, Some(3));
        assert_eq!(stored.modified, note.modified);
    }

    #[tokio::test]
    async fn delete_missing_is_not_an_error() {
        let service = folders();
        assert_eq!(service.delete(5).await.unwrap(), 0);
    }
}
