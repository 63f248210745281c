use futures::{StreamExt, stream::FuturesUnordered};

use crate::{
    client::{error::ClientError, gateway::GatewayClient},
    models::{
        Collection, CollectionType, GalleryItem, Match, NewsItem, Player, Record, RecordKind,
        Settings,
    },
};

/// Transient copies of every collection, as last read from the gateway.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentState {
    pub news: Vec<NewsItem>,
    pub matches: Vec<Match>,
    pub players: Vec<Player>,
    pub gallery: Vec<GalleryItem>,
    pub settings: Settings,
}

impl ContentState {
    /// Replaces one collection wholesale.
    pub fn apply(&mut self, collection: Collection) {
        match collection {
            Collection::News(items) => self.news = items,
            Collection::Matches(items) => self.matches = items,
            Collection::Players(items) => self.players = items,
            Collection::Gallery(items) => self.gallery = items,
            Collection::Settings(settings) => self.settings = settings,
        }
    }

    pub fn find(&self, kind: RecordKind, id: i32) -> Option<Record> {
        match kind {
            RecordKind::News => self.news.iter().find(|r| r.id == id).cloned().map(Record::News),
            RecordKind::Matches => self
                .matches
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .map(Record::Match),
            RecordKind::Players => self
                .players
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .map(Record::Player),
            RecordKind::Gallery => self
                .gallery
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .map(Record::Gallery),
        }
    }
}

/// Outcome of one five-way refresh.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// In arrival order.
    pub applied: Vec<CollectionType>,
    pub failed: Vec<(CollectionType, ClientError)>,
}

impl SyncReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Reads all five collections concurrently and applies each one as its
/// response arrives. Collections are independent: a failed read leaves that
/// collection at its previous value while the others take their new data.
///
/// There is no timeout. One hung read holds the whole refresh open.
pub async fn sync_all(gateway: &dyn GatewayClient, state: &mut ContentState) -> SyncReport {
    let mut pending = CollectionType::ALL
        .into_iter()
        .map(|collection| async move { (collection, gateway.fetch(collection).await) })
        .collect::<FuturesUnordered<_>>();

    let mut report = SyncReport::default();

    while let Some((collection, result)) = pending.next().await {
        match result {
            Ok(data) => {
                state.apply(data);
                report.applied.push(collection);
            }
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", collection, e);
                report.failed.push((collection, e));
            }
        }
    }

    report
}
