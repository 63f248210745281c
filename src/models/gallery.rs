use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    errors::AppError,
    models::fields::{FieldMap, required_text, text},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GalleryItem {
    pub id: i32,
    pub image_url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryDraft {
    pub image_url: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl GalleryDraft {
    pub fn from_fields(fields: &FieldMap) -> Result<Self, AppError> {
        Ok(Self {
            image_url: required_text(fields, "image_url")?,
            title: text(fields, "title"),
            description: text(fields, "description"),
        })
    }
}
