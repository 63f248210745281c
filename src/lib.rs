pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod http;
mod middleware;
pub mod models;
pub mod state;

use axum::{Router, middleware as axum_middleware};
use middleware::{cors_layer, create_rate_limiter, rate_limit_middleware};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    auth::{PASSWORD_COST, hash_password},
    config::{AdminSeed, Config},
    db::{ContentStore, PgStore},
    errors::AppError,
    state::AppState,
};

/// Full gateway router with rate limiting, CORS and request tracing.
pub fn create_app(state: AppState) -> Router {
    let rate_limiter = create_rate_limiter(state.config.rate_limit_per_minute);
    let allowed_origins = state.config.allowed_origins.clone();

    Router::new()
        .merge(http::create_http_routes(state))
        .method_not_allowed_fallback(|| async { AppError::MethodNotAllowed })
        .fallback(|| async { AppError::NotFound("Route not found".into()) })
        .layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(rate_limiter.clone(), req, next)
        }))
        .layer(cors_layer(&allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Creates the seeded admin or refreshes its password.
pub async fn seed_admin(store: &dyn ContentStore, seed: &AdminSeed) -> Result<i32, AppError> {
    let password = seed.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, PASSWORD_COST))
        .await
        .map_err(|_| AppError::InternalError)??;

    let id = store.upsert_admin(&seed.username, &password_hash).await?;
    tracing::info!("Admin '{}' seeded (id {})", seed.username, id);
    Ok(id)
}

pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), AppError> {
    let app = create_app(state);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Server error: {}", e);
        AppError::InternalError
    })
}

pub async fn start_server() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let postgres = db::connect(&config).await?;
    let store = Arc::new(PgStore::new(postgres));

    if let Some(seed) = &config.admin_seed {
        seed_admin(store.as_ref(), seed).await?;
    }

    let port = config.port;
    let state = AppState::new(store, config);

    let listener = TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|e| AppError::EnvError(format!("Failed to bind port {port}: {e}")))?;
    tracing::info!("Club gateway listening on http://0.0.0.0:{}", port);

    serve(listener, state).await
}
