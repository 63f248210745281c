use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    errors::AppError,
    http::handlers::GatewayQuery,
    models::record::kind_label,
    state::AppState,
};

pub async fn read_handler(
    State(state): State<AppState>,
    Query(query): Query<GatewayQuery>,
) -> Result<Response, AppError> {
    let collection = query.collection()?;

    let Some(kind) = collection.record_kind() else {
        let settings = state.store.settings().await.map_err(|e| {
            tracing::error!("Error reading settings: {}", e);
            e
        })?;
        return Ok(Json(settings).into_response());
    };

    if let Some(id) = query.id()? {
        let record = state.store.get(kind, id).await.map_err(|e| {
            tracing::error!("Error reading {} {}: {}", kind, id, e);
            e
        })?;
        return match record {
            Some(record) => Ok(Json(record).into_response()),
            None => Err(AppError::NotFound(format!("{} {} not found", kind_label(kind), id))),
        };
    }

    let items = state.store.list(kind).await.map_err(|e| {
        tracing::error!("Error listing {}: {}", kind, e);
        e
    })?;

    Ok(Json(items).into_response())
}

pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
