use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{present, ColumnValue, Columns, IntoColumns, Resource, ValidationError};
use crate::api::xss::filter_xss;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: i32,
    pub name: String,
    pub content: String,
    pub folderid: Option<i32>,
    pub modified: DateTime<Utc>,
}

impl Resource for Note {
    const TABLE: &'static str = "notes";
    const LABEL: &'static str = "Note";

    fn id(&self) -> i32 {
        self.id
    }

    fn escape_text(mut self) -> Self {
        self.name = filter_xss(&self.name);
        self.content = filter_xss(&self.content);
        self
    }
}

/// Body of `POST /api/notes` as received, before required fields are checked
#[derive(Debug, Default, Deserialize)]
pub struct NoteDraft {
    pub name: Option<String>,
    pub content: Option<String>,
    pub folderid: Option<i32>,
    /// Camel-case spelling sent by some clients; `folderid` wins when both are set
    #[serde(rename = "folderId")]
    pub folder_id: Option<i32>,
}

impl NoteDraft {
    pub fn validate(self) -> Result<NewNote, ValidationError> {
        let name = self.name.ok_or(ValidationError::MissingField("name"))?;
        let content = self.content.ok_or(ValidationError::MissingField("content"))?;
        Ok(NewNote {
            name,
            content,
            folderid: self.folderid.or(self.folder_id),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewNote {
    pub name: String,
    pub content: String,
    pub folderid: Option<i32>,
}

impl IntoColumns for NewNote {
    fn into_columns(self) -> Columns {
        vec![
            ("name", ColumnValue::Text(self.name)),
            ("content", ColumnValue::Text(self.content)),
            ("folderid", ColumnValue::Integer(self.folderid)),
        ]
    }
}

/// Body of `PATCH /api/notes/:id`. Only fields present in the body are
/// written; `"folderid": null` detaches the note from its folder.
#[derive(Debug, Default, Deserialize)]
pub struct NoteChanges {
    pub name: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub folderid: Option<Option<i32>>,
    #[serde(default, rename = "folderId", deserialize_with = "present")]
    pub folder_id: Option<Option<i32>>,
}

impl NoteChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.content.is_none()
            && self.folderid.is_none()
            && self.folder_id.is_none()
    }

    /// Folds `folderId` into `folderid`, keeping `folderid` if both were sent
    pub fn validate(mut self) -> Result<Self, ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::NothingToUpdate(
                "either 'name', 'content', or 'folderId'",
            ));
        }
        if let Some(folder_id) = self.folder_id.take() {
            self.folderid.get_or_insert(folder_id);
        }
        Ok(self)
    }
}

impl IntoColumns for NoteChanges {
    fn into_columns(self) -> Columns {
        let mut columns = Columns::new();
        if let Some(name) = self.name {
            columns.push(("name", ColumnValue::Text(name)));
        }
        if let Some(content) = self.content {
            columns.push(("content", ColumnValue::Text(content)));
        }
        if let Some(folderid) = self.folderid.or(self.folder_id) {
            columns.push(("folderid", ColumnValue::Integer(folderid)));
        }
        columns
    }
}
