use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    errors::AppError,
    models::fields::{FieldMap, required_text, text},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct NewsItem {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub published_date: DateTime<Utc>,
}

/// Writable part of a news item. Title and content are mandatory.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsDraft {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

impl NewsDraft {
    pub fn from_fields(fields: &FieldMap) -> Result<Self, AppError> {
        Ok(Self {
            title: required_text(fields, "title")?,
            content: required_text(fields, "content")?,
            category: text(fields, "category"),
            image_url: text(fields, "image_url"),
        })
    }
}
