use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    errors::AppError,
    models::fields::{FieldMap, required_int, required_text, text},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Player {
    pub id: i32,
    pub number: i32,
    pub name: String,
    pub position: String,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerDraft {
    pub number: i32,
    pub name: String,
    pub position: String,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

impl PlayerDraft {
    pub fn from_fields(fields: &FieldMap) -> Result<Self, AppError> {
        Ok(Self {
            number: required_int(fields, "number")?,
            name: required_text(fields, "name")?,
            position: required_text(fields, "position")?,
            image_url: text(fields, "image_url"),
            bio: text(fields, "bio"),
        })
    }
}
