pub mod admins;
pub mod gallery;
pub mod matches;
pub mod memory;
pub mod news;
pub mod players;
pub mod settings;

use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{
    config::Config,
    errors::AppError,
    models::{Admin, Collection, Record, RecordDraft, RecordKind, Settings},
};

pub use memory::MemoryStore;

/// Persistence seam of the gateway. The handlers only ever see this trait.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn list(&self, kind: RecordKind) -> Result<Collection, AppError>;

    async fn get(&self, kind: RecordKind, id: i32) -> Result<Option<Record>, AppError>;

    /// Returns the id assigned by the store.
    async fn create(&self, draft: RecordDraft) -> Result<i32, AppError>;

    /// Full-record update. `false` when no row has that id.
    async fn update(&self, id: i32, draft: RecordDraft) -> Result<bool, AppError>;

    /// `false` when no row has that id.
    async fn delete(&self, kind: RecordKind, id: i32) -> Result<bool, AppError>;

    async fn settings(&self) -> Result<Settings, AppError>;

    async fn replace_settings(&self, settings: Settings) -> Result<(), AppError>;

    async fn find_admin(&self, username: &str) -> Result<Option<Admin>, AppError>;

    /// Creates the admin, or replaces its password hash if it exists.
    async fn upsert_admin(&self, username: &str, password_hash: &str) -> Result<i32, AppError>;
}

pub async fn connect(config: &Config) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to connect to Postgres: {}", e)))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to run migrations: {}", e)))?;

    Ok(pool)
}

#[derive(Clone)]
pub struct PgStore {
    postgres: PgPool,
}

impl PgStore {
    pub fn new(postgres: PgPool) -> Self {
        Self { postgres }
    }
}

fn table(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::News => "news",
        RecordKind::Matches => "matches",
        RecordKind::Players => "players",
        RecordKind::Gallery => "gallery",
    }
}

#[async_trait]
impl ContentStore for PgStore {
    async fn list(&self, kind: RecordKind) -> Result<Collection, AppError> {
        let pg = self.postgres.clone();
        Ok(match kind {
            RecordKind::News => Collection::News(news::list_news(pg).await?),
            RecordKind::Matches => Collection::Matches(matches::list_matches(pg).await?),
            RecordKind::Players => Collection::Players(players::list_players(pg).await?),
            RecordKind::Gallery => Collection::Gallery(gallery::list_gallery(pg).await?),
        })
    }

    async fn get(&self, kind: RecordKind, id: i32) -> Result<Option<Record>, AppError> {
        let pg = self.postgres.clone();
        Ok(match kind {
            RecordKind::News => news::get_news(id, pg).await?.map(Record::News),
            RecordKind::Matches => matches::get_match(id, pg).await?.map(Record::Match),
            RecordKind::Players => players::get_player(id, pg).await?.map(Record::Player),
            RecordKind::Gallery => gallery::get_gallery_item(id, pg).await?.map(Record::Gallery),
        })
    }

    async fn create(&self, draft: RecordDraft) -> Result<i32, AppError> {
        let pg = self.postgres.clone();
        match draft {
            RecordDraft::News(d) => news::create_news(d, pg).await,
            RecordDraft::Match(d) => matches::create_match(d, pg).await,
            RecordDraft::Player(d) => players::create_player(d, pg).await,
            RecordDraft::Gallery(d) => gallery::create_gallery_item(d, pg).await,
        }
    }

    async fn update(&self, id: i32, draft: RecordDraft) -> Result<bool, AppError> {
        let pg = self.postgres.clone();
        match draft {
            RecordDraft::News(d) => news::update_news(id, d, pg).await,
            RecordDraft::Match(d) => matches::update_match(id, d, pg).await,
            RecordDraft::Player(d) => players::update_player(id, d, pg).await,
            RecordDraft::Gallery(d) => gallery::update_gallery_item(id, d, pg).await,
        }
    }

    async fn delete(&self, kind: RecordKind, id: i32) -> Result<bool, AppError> {
        // Table names come from a closed enum, never from the request.
        let query = format!("DELETE FROM {} WHERE id = $1", table(kind));
        let result = sqlx::query(&query)
            .bind(id)
            .execute(&self.postgres)
            .await
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to delete {} {}: {}", kind, id, e))
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn settings(&self) -> Result<Settings, AppError> {
        settings::get_settings(self.postgres.clone()).await
    }

    async fn replace_settings(&self, new_settings: Settings) -> Result<(), AppError> {
        settings::replace_settings(new_settings, self.postgres.clone()).await
    }

    async fn find_admin(&self, username: &str) -> Result<Option<Admin>, AppError> {
        admins::find_admin(username, self.postgres.clone()).await
    }

    async fn upsert_admin(&self, username: &str, password_hash: &str) -> Result<i32, AppError> {
        admins::upsert_admin(username, password_hash, self.postgres.clone()).await
    }
}
