use sqlx::PgPool;

use crate::{errors::AppError, models::Admin};

pub async fn find_admin(username: &str, postgres: PgPool) -> Result<Option<Admin>, AppError> {
    sqlx::query_as::<_, Admin>("SELECT id, username, password_hash FROM admins WHERE username = $1")
        .bind(username)
        .fetch_optional(&postgres)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch admin: {}", e)))
}

pub async fn upsert_admin(
    username: &str,
    password_hash: &str,
    postgres: PgPool,
) -> Result<i32, AppError> {
    sqlx::query_scalar::<_, i32>(
        "INSERT INTO admins (username, password_hash)
			VALUES ($1, $2)
			ON CONFLICT (username) DO UPDATE SET password_hash = EXCLUDED.password_hash
			RETURNING id",
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to store admin {}: {}", username, e)))
}
