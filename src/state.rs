use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::database::models::{Folder, Note};
use crate::database::{DatabaseError, Repository};
use crate::services::{FoldersService, NotesService};

/// Shared handles injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub notes: NotesService,
    pub folders: FoldersService,
}

impl AppState {
    pub fn new(notes: NotesService, folders: FoldersService) -> Self {
        Self { notes, folders }
    }

    /// Both services backed by the same Postgres pool
    pub fn postgres(pool: PgPool) -> Result<Self, DatabaseError> {
        let notes = NotesService::new(Arc::new(Repository::<Note>::new(pool.clone())?));
        let folders = FoldersService::new(Arc::new(Repository::<Folder>::new(pool)?));
        Ok(Self::new(notes, folders))
    }
}

impl FromRef<AppState> for NotesService {
    fn from_ref(state: &AppState) -> Self {
        state.notes.clone()
    }
}

impl FromRef<AppState> for FoldersService {
    fn from_ref(state: &AppState) -> Self {
        state.folders.clone()
    }
}
