use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::{
    db::ContentStore,
    errors::AppError,
    models::{
        Admin, Collection, GalleryItem, Match, NewsItem, Player, Record, RecordDraft, RecordKind,
        Settings,
    },
};

#[derive(Default)]
struct Tables {
    next_id: i32,
    news: Vec<NewsItem>,
    matches: Vec<Match>,
    players: Vec<Player>,
    gallery: Vec<GalleryItem>,
    settings: Settings,
    admins: Vec<Admin>,
}

impl Tables {
    fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Process-local store with the same ordering rules as the Postgres one.
/// Backs tests and database-less local runs.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn list(&self, kind: RecordKind) -> Result<Collection, AppError> {
        let tables = self.tables.lock().await;
        Ok(match kind {
            RecordKind::News => {
                let mut items = tables.news.clone();
                items.sort_by(|a, b| {
                    b.published_date
                        .cmp(&a.published_date)
                        .then(b.id.cmp(&a.id))
                });
                Collection::News(items)
            }
            RecordKind::Matches => {
                let mut items = tables.matches.clone();
                items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
                Collection::Matches(items)
            }
            RecordKind::Players => {
                let mut items = tables.players.clone();
                items.sort_by(|a, b| a.number.cmp(&b.number).then(a.id.cmp(&b.id)));
                Collection::Players(items)
            }
            RecordKind::Gallery => {
                let mut items = tables.gallery.clone();
                items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
                Collection::Gallery(items)
            }
        })
    }

    async fn get(&self, kind: RecordKind, id: i32) -> Result<Option<Record>, AppError> {
        let tables = self.tables.lock().await;
        Ok(match kind {
            RecordKind::News => tables.news.iter().find(|r| r.id == id).cloned().map(Record::News),
            RecordKind::Matches => tables
                .matches
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .map(Record::Match),
            RecordKind::Players => tables
                .players
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .map(Record::Player),
            RecordKind::Gallery => tables
                .gallery
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .map(Record::Gallery),
        })
    }

    async fn create(&self, draft: RecordDraft) -> Result<i32, AppError> {
        let mut tables = self.tables.lock().await;
        let id = tables.allocate_id();
        let now = Utc::now();

        match draft {
            RecordDraft::News(d) => tables.news.push(NewsItem {
                id,
                title: d.title,
                content: d.content,
                category: d.category,
                image_url: d.image_url,
                published_date: now,
            }),
            RecordDraft::Match(d) => tables.matches.push(Match {
                id,
                match_date: d.match_date,
                match_time: d.match_time,
                home_team: d.home_team,
                away_team: d.away_team,
                score: d.score,
                location: d.location,
                home_logo: d.home_logo,
                away_logo: d.away_logo,
                created_at: now,
            }),
            RecordDraft::Player(d) => tables.players.push(Player {
                id,
                number: d.number,
                name: d.name,
                position: d.position,
                image_url: d.image_url,
                bio: d.bio,
            }),
            RecordDraft::Gallery(d) => tables.gallery.push(GalleryItem {
                id,
                image_url: d.image_url,
                title: d.title,
                description: d.description,
                created_at: now,
            }),
        }

        Ok(id)
    }

    async fn update(&self, id: i32, draft: RecordDraft) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().await;

        let updated = match draft {
            RecordDraft::News(d) => tables.news.iter_mut().find(|r| r.id == id).map(|row| {
                row.title = d.title;
                row.content = d.content;
                row.category = d.category;
                row.image_url = d.image_url;
            }),
            RecordDraft::Match(d) => tables.matches.iter_mut().find(|r| r.id == id).map(|row| {
                row.match_date = d.match_date;
                row.match_time = d.match_time;
                row.home_team = d.home_team;
                row.away_team = d.away_team;
                row.score = d.score;
                row.location = d.location;
                row.home_logo = d.home_logo;
                row.away_logo = d.away_logo;
            }),
            RecordDraft::Player(d) => tables.players.iter_mut().find(|r| r.id == id).map(|row| {
                row.number = d.number;
                row.name = d.name;
                row.position = d.position;
                row.image_url = d.image_url;
                row.bio = d.bio;
            }),
            RecordDraft::Gallery(d) => tables.gallery.iter_mut().find(|r| r.id == id).map(|row| {
                row.image_url = d.image_url;
                row.title = d.title;
                row.description = d.description;
            }),
        };

        Ok(updated.is_some())
    }

    async fn delete(&self, kind: RecordKind, id: i32) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().await;

        fn remove<T>(rows: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
            let before = rows.len();
            rows.retain(|row| !matches(row));
            rows.len() != before
        }

        Ok(match kind {
            RecordKind::News => remove(&mut tables.news, |r| r.id == id),
            RecordKind::Matches => remove(&mut tables.matches, |r| r.id == id),
            RecordKind::Players => remove(&mut tables.players, |r| r.id == id),
            RecordKind::Gallery => remove(&mut tables.gallery, |r| r.id == id),
        })
    }

    async fn settings(&self) -> Result<Settings, AppError> {
        Ok(self.tables.lock().await.settings.clone())
    }

    async fn replace_settings(&self, settings: Settings) -> Result<(), AppError> {
        self.tables.lock().await.settings = settings;
        Ok(())
    }

    async fn find_admin(&self, username: &str) -> Result<Option<Admin>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .admins
            .iter()
            .find(|admin| admin.username == username)
            .cloned())
    }

    async fn upsert_admin(&self, username: &str, password_hash: &str) -> Result<i32, AppError> {
        let mut tables = self.tables.lock().await;

        if let Some(admin) = tables.admins.iter_mut().find(|a| a.username == username) {
            admin.password_hash = password_hash.to_string();
            return Ok(admin.id);
        }

        let id = tables.admins.len() as i32 + 1;
        tables.admins.push(Admin {
            id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        });
        Ok(id)
    }
}
