use sqlx::PgPool;

use crate::{errors::AppError, models::Settings};

pub async fn get_settings(postgres: PgPool) -> Result<Settings, AppError> {
    let rows = sqlx::query_as::<_, (String, Option<String>)>(
        "SELECT setting_key, setting_value FROM site_settings",
    )
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch settings: {}", e)))?;

    Ok(rows
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect())
}

/// Swaps the whole settings record in one transaction.
pub async fn replace_settings(settings: Settings, postgres: PgPool) -> Result<(), AppError> {
    let mut tx = postgres.begin().await?;

    sqlx::query("DELETE FROM site_settings")
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to clear settings: {}", e)))?;

    for (key, value) in settings.iter() {
        sqlx::query("INSERT INTO site_settings (setting_key, setting_value) VALUES ($1, $2)")
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to store setting {}: {}", key, e)))?;
    }

    tx.commit().await?;
    Ok(())
}
