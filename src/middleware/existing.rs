use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Path},
    http::request::Parts,
};

use crate::database::models::Resource;
use crate::error::ApiError;
use crate::services::ResourceService;

/// Existence check for `/:id` routes. Looks the record up before the
/// handler runs and hands it over by value; a missing record short-circuits
/// with 404 `"<Resource> doesn't exist"`.
pub struct Existing<R>(pub R);

#[async_trait]
impl<S, R> FromRequestParts<S> for Existing<R>
where
    S: Send + Sync,
    R: Resource,
    ResourceService<R>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let not_found = || ApiError::not_found(format!("{} doesn't exist", R::LABEL));

        // A non-integer id can never match a row
        let Path(id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("Unusable {} id in {}: {}", R::TABLE, parts.uri.path(), rejection);
                not_found()
            })?;

        let service = ResourceService::<R>::from_ref(state);
        match service.get_by_id(id).await? {
            Some(record) => Ok(Existing(record)),
            None => {
                tracing::debug!("{} {} not found", R::LABEL, id);
                Err(not_found())
            }
        }
    }
}
