use axum::extract::{OriginalUri, State};

use crate::api::{location, serialize, serialize_all};
use crate::database::models::{Folder, FolderChanges, FolderDraft};
use crate::middleware::{ApiResponse, ApiResult, Existing, Payload};
use crate::services::FoldersService;

/// GET /api/folders - List every folder
pub async fn list(State(folders): State<FoldersService>) -> ApiResult<Vec<Folder>> {
    let records = folders.get_all().await?;
    Ok(ApiResponse::success(serialize_all(records)))
}

/// POST /api/folders - Create a folder; `name` is required
pub async fn create(
    State(folders): State<FoldersService>,
    OriginalUri(uri): OriginalUri,
    Payload(draft): Payload<FolderDraft>,
) -> ApiResult<Folder> {
    let new_folder = draft.validate()?;

    let folder = folders.insert(new_folder).await?;
    let path = location(&uri, folder.id);
    Ok(ApiResponse::created(serialize(folder), path))
}

/// GET /api/folders/:id
pub async fn get(Existing(folder): Existing<Folder>) -> ApiResult<Folder> {
    Ok(ApiResponse::success(serialize(folder)))
}

/// DELETE /api/folders/:id
pub async fn delete(
    State(folders): State<FoldersService>,
    Existing(folder): Existing<Folder>,
) -> ApiResult<()> {
    folders.delete(folder.id).await?;
    Ok(ApiResponse::no_content())
}

/// PATCH /api/folders/:id - Rename a folder
pub async fn patch(
    State(folders): State<FoldersService>,
    Existing(folder): Existing<Folder>,
    Payload(changes): Payload<FolderChanges>,
) -> ApiResult<()> {
    let changes = changes.validate()?;

    folders.update(folder.id, changes).await?;
    Ok(ApiResponse::no_content())
}
