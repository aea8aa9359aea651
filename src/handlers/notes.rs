use axum::extract::{OriginalUri, State};

use crate::api::{location, serialize, serialize_all};
use crate::database::models::{Note, NoteChanges, NoteDraft};
use crate::middleware::{ApiResponse, ApiResult, Existing, Payload};
use crate::services::NotesService;

/// GET /api/notes - List every note
pub async fn list(State(notes): State<NotesService>) -> ApiResult<Vec<Note>> {
    let records = notes.get_all().await?;
    Ok(ApiResponse::success(serialize_all(records)))
}

/// POST /api/notes - Create a note; `name` and `content` are required
pub async fn create(
    State(notes): State<NotesService>,
    OriginalUri(uri): OriginalUri,
    Payload(draft): Payload<NoteDraft>,
) -> ApiResult<Note> {
    let new_note = draft.validate()?;

    let note = notes.insert(new_note).await?;
    let path = location(&uri, note.id);
    Ok(ApiResponse::created(serialize(note), path))
}

/// GET /api/notes/:id
pub async fn get(Existing(note): Existing<Note>) -> ApiResult<Note> {
    Ok(ApiResponse::success(serialize(note)))
}

/// DELETE /api/notes/:id
pub async fn delete(
    State(notes): State<NotesService>,
    Existing(note): Existing<Note>,
) -> ApiResult<()> {
    notes.delete(note.id).await?;
    Ok(ApiResponse::no_content())
}

/// PATCH /api/notes/:id - Update any of `name`, `content`, `folderid`
pub async fn patch(
    State(notes): State<NotesService>,
    Existing(note): Existing<Note>,
    Payload(changes): Payload<NoteChanges>,
) -> ApiResult<()> {
    let changes = changes.validate()?;

    notes.update(note.id, changes).await?;
    Ok(ApiResponse::no_content())
}
