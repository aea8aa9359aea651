use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{ColumnValue, Columns, IntoColumns, Resource, ValidationError};
use crate::api::xss::filter_xss;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    pub id: i32,
    pub name: String,
}

impl Resource for Folder {
    const TABLE: &'static str = "folders";
    const LABEL: &'static str = "Folder";

    fn id(&self) -> i32 {
        self.id
    }

    fn escape_text(mut self) -> Self {
        self.name = filter_xss(&self.name);
        self
    }
}

/// Body of `POST /api/folders`
#[derive(Debug, Default, Deserialize)]
pub struct FolderDraft {
    pub name: Option<String>,
}

impl FolderDraft {
    pub fn validate(self) -> Result<NewFolder, ValidationError> {
        let name = self.name.ok_or(ValidationError::MissingField("name"))?;
        Ok(NewFolder { name })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFolder {
    pub name: String,
}

impl IntoColumns for NewFolder {
    fn into_columns(self) -> Columns {
        vec![("name", ColumnValue::Text(self.name))]
    }
}

/// Body of `PATCH /api/folders/:id`
#[derive(Debug, Default, Deserialize)]
pub struct FolderChanges {
    pub name: Option<String>,
}

impl FolderChanges {
    pub fn validate(self) -> Result<Self, ValidationError> {
        if self.name.is_none() {
            return Err(ValidationError::NothingToUpdate("a 'name'"));
        }
        Ok(self)
    }
}

impl IntoColumns for FolderChanges {
    fn into_columns(self) -> Columns {
        self.name
            .map(|name| vec![("name", ColumnValue::Text(name))])
            .unwrap_or_default()
    }
}
