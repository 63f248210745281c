use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use jsonwebtoken::errors::ErrorKind;
use serde::Serialize;
use serde_json::Value;

use crate::{
    auth::{check_write_access, decode_jwt, generate_jwt, verify_password},
    errors::AppError,
    http::handlers::{CreatedResponse, field_map},
    models::{
        FieldMap, RecordDraft, RecordKind,
        fields::{required_text, text},
    },
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `POST` dispatcher. The `action` field selects login, verify or create;
/// a body without one is a login attempt.
pub async fn action_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<FieldMap>, JsonRejection>,
) -> Result<Response, AppError> {
    let fields = field_map(body)?;
    let action = fields
        .get("action")
        .and_then(Value::as_str)
        .unwrap_or("login")
        .to_string();

    match action.as_str() {
        "login" => login(&state, &fields).await.map(IntoResponse::into_response),
        "verify" => Ok(verify(&state, &fields).into_response()),
        "create" => {
            check_write_access(&state, &headers)?;
            create(&state, &fields).await.map(IntoResponse::into_response)
        }
        _ => Err(AppError::BadRequest("Invalid action".into())),
    }
}

async fn login(state: &AppState, fields: &FieldMap) -> Result<Json<LoginResponse>, AppError> {
    let (Some(username), Some(password)) = (text(fields, "username"), text(fields, "password"))
    else {
        return Err(AppError::BadRequest("Username and password required".into()));
    };

    let Some(admin) = state.store.find_admin(&username).await? else {
        tracing::warn!("Login rejected for unknown admin '{}'", username);
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    };

    // bcrypt blocks; run it on the blocking pool
    let password_hash = admin.password_hash.clone();
    let password_ok = tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .map_err(|_| AppError::InternalError)?;

    if !password_ok {
        tracing::warn!("Login rejected for admin '{}': bad password", username);
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let token = generate_jwt(&admin, &state.config.jwt_secret, state.config.token_ttl_days)?;
    tracing::info!("Admin '{}' logged in", admin.username);

    Ok(Json(LoginResponse {
        token,
        username: admin.username,
    }))
}

fn verify(state: &AppState, fields: &FieldMap) -> Json<VerifyResponse> {
    let invalid = |reason: &str| {
        Json(VerifyResponse {
            valid: false,
            username: None,
            error: Some(reason.to_string()),
        })
    };

    let Some(token) = text(fields, "token") else {
        return invalid("Token required");
    };

    match decode_jwt(&token, &state.config.jwt_secret) {
        Ok(claims) => Json(VerifyResponse {
            valid: true,
            username: Some(claims.username),
            error: None,
        }),
        Err(AppError::JwtError(e)) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
            invalid("Token expired")
        }
        Err(_) => invalid("Invalid token"),
    }
}

async fn create(
    state: &AppState,
    fields: &FieldMap,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let kind = required_text(fields, "type")?.parse::<RecordKind>()?;
    let draft = RecordDraft::from_fields(kind, fields)?;
    let label = draft.label();

    let id = state.store.create(draft).await.map_err(|e| {
        tracing::error!("Error creating {}: {}", kind, e);
        e
    })?;
    tracing::info!("{} created with id {}", label, id);

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id,
            message: format!("{} created", label),
        }),
    ))
}
