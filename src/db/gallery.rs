use sqlx::PgPool;

use crate::{
    errors::AppError,
    models::{GalleryDraft, GalleryItem},
};

pub async fn list_gallery(postgres: PgPool) -> Result<Vec<GalleryItem>, AppError> {
    sqlx::query_as::<_, GalleryItem>(
        "SELECT id, image_url, title, description, created_at
			FROM gallery
			ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch gallery: {}", e)))
}

pub async fn get_gallery_item(id: i32, postgres: PgPool) -> Result<Option<GalleryItem>, AppError> {
    sqlx::query_as::<_, GalleryItem>(
        "SELECT id, image_url, title, description, created_at
			FROM gallery
			WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch gallery item {}: {}", id, e)))
}

pub async fn create_gallery_item(draft: GalleryDraft, postgres: PgPool) -> Result<i32, AppError> {
    sqlx::query_scalar::<_, i32>(
        "INSERT INTO gallery (image_url, title, description)
			VALUES ($1, $2, $3)
			RETURNING id",
    )
    .bind(draft.image_url)
    .bind(draft.title)
    .bind(draft.description)
    .fetch_one(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to create gallery item: {}", e)))
}

pub async fn update_gallery_item(
    id: i32,
    draft: GalleryDraft,
    postgres: PgPool,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        "UPDATE gallery
			SET image_url = $1, title = $2, description = $3
			WHERE id = $4",
    )
    .bind(draft.image_url)
    .bind(draft.title)
    .bind(draft.description)
    .bind(id)
    .execute(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to update gallery item {}: {}", id, e)))?;

    Ok(result.rows_affected() > 0)
}
