use sqlx::PgPool;

use crate::{
    errors::AppError,
    models::{Player, PlayerDraft},
};

pub async fn list_players(postgres: PgPool) -> Result<Vec<Player>, AppError> {
    sqlx::query_as::<_, Player>(
        "SELECT id, number, name, position, image_url, bio
			FROM players
			ORDER BY number ASC, id ASC",
    )
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch players: {}", e)))
}

pub async fn get_player(id: i32, postgres: PgPool) -> Result<Option<Player>, AppError> {
    sqlx::query_as::<_, Player>(
        "SELECT id, number, name, position, image_url, bio
			FROM players
			WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch player {}: {}", id, e)))
}

pub async fn create_player(draft: PlayerDraft, postgres: PgPool) -> Result<i32, AppError> {
    sqlx::query_scalar::<_, i32>(
        "INSERT INTO players (number, name, position, image_url, bio)
			VALUES ($1, $2, $3, $4, $5)
			RETURNING id",
    )
    .bind(draft.number)
    .bind(draft.name)
    .bind(draft.position)
    .bind(draft.image_url)
    .bind(draft.bio)
    .fetch_one(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to create player: {}", e)))
}

pub async fn update_player(id: i32, draft: PlayerDraft, postgres: PgPool) -> Result<bool, AppError> {
    let result = sqlx::query(
        "UPDATE players
			SET number = $1, name = $2, position = $3, image_url = $4, bio = $5
			WHERE id = $6",
    )
    .bind(draft.number)
    .bind(draft.name)
    .bind(draft.position)
    .bind(draft.image_url)
    .bind(draft.bio)
    .bind(id)
    .execute(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to update player {}: {}", id, e)))?;

    Ok(result.rows_affected() > 0)
}
