pub mod folder;
pub mod note;

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::{postgres::PgRow, FromRow};
use thiserror::Error;

pub use folder::{Folder, FolderChanges, FolderDraft, NewFolder};
pub use note::{NewNote, Note, NoteChanges, NoteDraft};

/// A row type exposed as a REST resource backed by a single table
pub trait Resource:
    Serialize + for<'r> FromRow<'r, PgRow> + Clone + Send + Sync + Unpin + 'static
{
    /// Backing table
    const TABLE: &'static str;
    /// Human-facing name used in error messages ("Note doesn't exist")
    const LABEL: &'static str;

    fn id(&self) -> i32;

    /// Run every free-text field through the XSS filter. Numeric fields are
    /// left untouched.
    fn escape_text(self) -> Self;
}

/// A value destined for one column of an INSERT or UPDATE
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Text(String),
    Integer(Option<i32>),
}

pub type Columns = Vec<(&'static str, ColumnValue)>;

/// Payloads that can be written as a set of column assignments
pub trait IntoColumns {
    fn into_columns(self) -> Columns;
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Missing {0} in request body")]
    MissingField(&'static str),

    #[error("Request body must contain {0}")]
    NothingToUpdate(&'static str),
}

/// Distinguishes an explicit `null` from an omitted key. Used with
/// `#[serde(default)]` on `Option<Option<T>>` fields: omitted stays `None`,
/// `null` becomes `Some(None)`.
pub(crate) fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
