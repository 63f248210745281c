use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};

use crate::{
    auth::WriteAccess,
    errors::AppError,
    http::handlers::{GatewayQuery, MessageResponse, field_map},
    models::{FieldMap, RecordDraft, Settings, record::kind_label},
    state::AppState,
};

/// `PUT ?type=<t>&id=<id>` replaces one row; `PUT ?type=settings` replaces
/// the settings record.
pub async fn update_handler(
    State(state): State<AppState>,
    WriteAccess(_claims): WriteAccess,
    Query(query): Query<GatewayQuery>,
    body: Result<Json<FieldMap>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let collection = query.collection()?;
    let fields = field_map(body)?;

    let Some(kind) = collection.record_kind() else {
        let settings = Settings::from_fields(&fields);
        let count = settings.len();
        state.store.replace_settings(settings).await.map_err(|e| {
            tracing::error!("Error replacing settings: {}", e);
            e
        })?;
        tracing::info!("Settings replaced ({} keys)", count);

        return Ok(Json(MessageResponse {
            message: "Settings updated".into(),
        }));
    };

    let id = query.required_id()?;
    let draft = RecordDraft::from_fields(kind, &fields)?;

    let found = state.store.update(id, draft).await.map_err(|e| {
        tracing::error!("Error updating {} {}: {}", kind, id, e);
        e
    })?;
    if !found {
        return Err(AppError::NotFound(format!("{} {} not found", kind_label(kind), id)));
    }

    tracing::info!("{} {} updated", kind_label(kind), id);
    Ok(Json(MessageResponse {
        message: format!("{} updated", kind_label(kind)),
    }))
}

pub async fn delete_handler(
    State(state): State<AppState>,
    WriteAccess(_claims): WriteAccess,
    Query(query): Query<GatewayQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    let kind = query
        .collection()?
        .record_kind()
        .ok_or_else(|| AppError::BadRequest("Invalid entity type or missing ID".into()))?;
    let id = query.required_id()?;

    let found = state.store.delete(kind, id).await.map_err(|e| {
        tracing::error!("Error deleting {} {}: {}", kind, id, e);
        e
    })?;
    if !found {
        return Err(AppError::NotFound(format!("{} {} not found", kind_label(kind), id)));
    }

    tracing::info!("{} {} deleted", kind_label(kind), id);
    Ok(Json(MessageResponse {
        message: format!("{} deleted", kind_label(kind)),
    }))
}
