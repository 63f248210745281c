use sqlx::PgPool;

use crate::{
    errors::AppError,
    models::{NewsDraft, NewsItem},
};

pub async fn list_news(postgres: PgPool) -> Result<Vec<NewsItem>, AppError> {
    sqlx::query_as::<_, NewsItem>(
        "SELECT id, title, content, category, image_url, published_date
			FROM news
			ORDER BY published_date DESC, id DESC",
    )
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch news: {}", e)))
}

pub async fn get_news(id: i32, postgres: PgPool) -> Result<Option<NewsItem>, AppError> {
    sqlx::query_as::<_, NewsItem>(
        "SELECT id, title, content, category, image_url, published_date
			FROM news
			WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch news item {}: {}", id, e)))
}

pub async fn create_news(draft: NewsDraft, postgres: PgPool) -> Result<i32, AppError> {
    sqlx::query_scalar::<_, i32>(
        "INSERT INTO news (title, content, category, image_url)
			VALUES ($1, $2, $3, $4)
			RETURNING id",
    )
    .bind(draft.title)
    .bind(draft.content)
    .bind(draft.category)
    .bind(draft.image_url)
    .fetch_one(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to create news: {}", e)))
}

pub async fn update_news(id: i32, draft: NewsDraft, postgres: PgPool) -> Result<bool, AppError> {
    let result = sqlx::query(
        "UPDATE news
			SET title = $1, content = $2, category = $3, image_url = $4, updated_at = NOW()
			WHERE id = $5",
    )
    .bind(draft.title)
    .bind(draft.content)
    .bind(draft.category)
    .bind(draft.image_url)
    .bind(id)
    .execute(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to update news {}: {}", id, e)))?;

    Ok(result.rows_affected() > 0)
}
