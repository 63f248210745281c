use sqlx::PgPool;

use crate::{
    errors::AppError,
    models::{Match, MatchDraft},
};

pub async fn list_matches(postgres: PgPool) -> Result<Vec<Match>, AppError> {
    sqlx::query_as::<_, Match>(
        "SELECT id, match_date, match_time, home_team, away_team, score, location,
				home_logo, away_logo, created_at
			FROM matches
			ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch matches: {}", e)))
}

pub async fn get_match(id: i32, postgres: PgPool) -> Result<Option<Match>, AppError> {
    sqlx::query_as::<_, Match>(
        "SELECT id, match_date, match_time, home_team, away_team, score, location,
				home_logo, away_logo, created_at
			FROM matches
			WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch match {}: {}", id, e)))
}

pub async fn create_match(draft: MatchDraft, postgres: PgPool) -> Result<i32, AppError> {
    sqlx::query_scalar::<_, i32>(
        "INSERT INTO matches
				(match_date, match_time, home_team, away_team, home_logo, away_logo, score, location)
			VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
			RETURNING id",
    )
    .bind(draft.match_date)
    .bind(draft.match_time)
    .bind(draft.home_team)
    .bind(draft.away_team)
    .bind(draft.home_logo)
    .bind(draft.away_logo)
    .bind(draft.score)
    .bind(draft.location)
    .fetch_one(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to create match: {}", e)))
}

pub async fn update_match(id: i32, draft: MatchDraft, postgres: PgPool) -> Result<bool, AppError> {
    let result = sqlx::query(
        "UPDATE matches
			SET match_date = $1, match_time = $2, home_team = $3, away_team = $4,
				home_logo = $5, away_logo = $6, score = $7, location = $8
			WHERE id = $9",
    )
    .bind(draft.match_date)
    .bind(draft.match_time)
    .bind(draft.home_team)
    .bind(draft.away_team)
    .bind(draft.home_logo)
    .bind(draft.away_logo)
    .bind(draft.score)
    .bind(draft.location)
    .bind(id)
    .execute(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to update match {}: {}", id, e)))?;

    Ok(result.rows_affected() > 0)
}
