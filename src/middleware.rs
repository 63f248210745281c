use axum::{
    extract::{ConnectInfo, Request},
    http::{HeaderName, HeaderValue, Method, header},
    middleware::Next,
    response::Response,
};
use governor::{Quota, RateLimiter, clock::DefaultClock, state::keyed::DefaultKeyedStateStore};
use std::{net::SocketAddr, num::NonZeroU32, sync::Arc, time::Duration};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::errors::AppError;

pub type IpRateLimiter = Arc<RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>>;

pub fn create_rate_limiter(per_minute: NonZeroU32) -> IpRateLimiter {
    Arc::new(RateLimiter::keyed(Quota::per_minute(per_minute)))
}

// IP-based rate limiting middleware function
pub async fn rate_limit_middleware(
    rate_limiter: IpRateLimiter,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Requests without connect info (in-process calls) share one bucket
    let client_ip =
        if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
            addr.ip().to_string()
        } else {
            "unknown".to_string()
        };

    match rate_limiter.check_key(&client_ip) {
        Ok(_) => Ok(next.run(request).await),
        Err(_) => {
            tracing::warn!("Rate limit exceeded for IP: {}", client_ip);
            Err(AppError::TooManyRequests)
        }
    }
}

// CORS configuration; a lone "*" opens the gateway to any origin
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let origins = allowed_origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", o);
                    None
                }
            })
            .collect::<Vec<_>>();
        AllowOrigin::list(origins)
    };

    tracing::info!("CORS allowed origins: {:?}", allowed_origins);

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-authorization"),
        ])
        .max_age(Duration::from_secs(86400))
}
