use axum::http::Uri;

use crate::database::models::Resource;

/// Convert a stored row into its public wire form. Free-text fields go
/// through the XSS filter; ids, foreign keys and timestamps pass as stored.
pub fn serialize<R: Resource>(record: R) -> R {
    record.escape_text()
}

pub fn serialize_all<R: Resource>(records: Vec<R>) -> Vec<R> {
    records.into_iter().map(serialize).collect()
}

/// `Location` value for a newly created record: the request path joined
/// with the new id
pub fn location(uri: &Uri, id: i32) -> String {
    format!("{}/{}", uri.path().trim_end_matches('/'), id)
}
