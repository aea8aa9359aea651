use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON request body that falls back to `T::default()` when the request
/// carries no JSON: a missing or non-JSON `Content-Type`, or an empty body.
/// The payload's own validation then reports which fields are missing.
/// Malformed JSON is still a 400 and an oversized body a 413.
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = json_content_type(req.headers());

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => ApiError::payload_too_large(rejection.body_text()),
                _ => ApiError::bad_request(rejection.body_text()),
            })?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Payload(T::default()));
        }

        serde_json::from_slice(&bytes).map(Payload).map_err(|e| {
            tracing::debug!("Rejected request body: {}", e);
            ApiError::invalid_json(format!("Failed to parse the request body as JSON: {}", e))
        })
    }
}

/// `application/json` or any `application/*+json`, parameters ignored
fn json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = value.split(';').next().unwrap_or("").trim().to_ascii_lowercase();

    match essence.split_once('/') {
        Some(("application", subtype)) => subtype == "json" || subtype.ends_with("+json"),
        _ => false,
    }
}
