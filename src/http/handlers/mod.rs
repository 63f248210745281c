pub mod action;
pub mod read;
pub mod write;

use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use crate::{
    errors::AppError,
    models::{CollectionType, FieldMap},
};

pub use action::action_handler;
pub use read::{health_handler, read_handler};
pub use write::{delete_handler, update_handler};

/// Query string shared by every method on the gateway endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct GatewayQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: Option<String>,
}

impl GatewayQuery {
    pub fn collection(&self) -> Result<CollectionType, AppError> {
        self.kind
            .as_deref()
            .unwrap_or_default()
            .parse::<CollectionType>()
    }

    pub fn id(&self) -> Result<Option<i32>, AppError> {
        match self.id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<i32>()
                .map(Some)
                .map_err(|_| AppError::BadRequest(format!("Invalid id: {}", raw))),
        }
    }

    pub fn required_id(&self) -> Result<i32, AppError> {
        self.id()?
            .ok_or_else(|| AppError::BadRequest("Invalid entity type or missing ID".into()))
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i32,
    pub message: String,
}

pub(crate) fn field_map(body: Result<axum::Json<FieldMap>, JsonRejection>) -> Result<FieldMap, AppError> {
    body.map(|axum::Json(fields)| fields)
        .map_err(|rejection| AppError::Deserialization(rejection.body_text()))
}
