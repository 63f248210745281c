use serde::Serialize;

use crate::{
    errors::AppError,
    models::{
        collection::{CollectionType, RecordKind},
        fields::FieldMap,
        gallery::{GalleryDraft, GalleryItem},
        game_match::{Match, MatchDraft},
        news::{NewsDraft, NewsItem},
        player::{Player, PlayerDraft},
        settings::Settings,
    },
};

/// One stored row of any keyed collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    News(NewsItem),
    Match(Match),
    Player(Player),
    Gallery(GalleryItem),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::News(_) => RecordKind::News,
            Record::Match(_) => RecordKind::Matches,
            Record::Player(_) => RecordKind::Players,
            Record::Gallery(_) => RecordKind::Gallery,
        }
    }

    pub fn id(&self) -> i32 {
        match self {
            Record::News(item) => item.id,
            Record::Match(item) => item.id,
            Record::Player(item) => item.id,
            Record::Gallery(item) => item.id,
        }
    }
}

/// Body of a `GET ?type=` response: an array for keyed collections, an
/// object for settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Collection {
    News(Vec<NewsItem>),
    Matches(Vec<Match>),
    Players(Vec<Player>),
    Gallery(Vec<GalleryItem>),
    Settings(Settings),
}

impl Collection {
    pub fn collection_type(&self) -> CollectionType {
        match self {
            Collection::News(_) => CollectionType::News,
            Collection::Matches(_) => CollectionType::Matches,
            Collection::Players(_) => CollectionType::Players,
            Collection::Gallery(_) => CollectionType::Gallery,
            Collection::Settings(_) => CollectionType::Settings,
        }
    }

    /// Decodes a response body for a collection the caller asked for. The
    /// wire shape alone is ambiguous, so the requested type drives it.
    pub fn decode(collection: CollectionType, bytes: &[u8]) -> Result<Self, serde_json::Error> {
        Ok(match collection {
            CollectionType::News => Collection::News(serde_json::from_slice(bytes)?),
            CollectionType::Matches => Collection::Matches(serde_json::from_slice(bytes)?),
            CollectionType::Players => Collection::Players(serde_json::from_slice(bytes)?),
            CollectionType::Gallery => Collection::Gallery(serde_json::from_slice(bytes)?),
            CollectionType::Settings => Collection::Settings(serde_json::from_slice(bytes)?),
        })
    }
}

/// Validated writable fields of one record, tagged by collection.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordDraft {
    News(NewsDraft),
    Match(MatchDraft),
    Player(PlayerDraft),
    Gallery(GalleryDraft),
}

impl RecordDraft {
    pub fn from_fields(kind: RecordKind, fields: &FieldMap) -> Result<Self, AppError> {
        Ok(match kind {
            RecordKind::News => RecordDraft::News(NewsDraft::from_fields(fields)?),
            RecordKind::Matches => RecordDraft::Match(MatchDraft::from_fields(fields)?),
            RecordKind::Players => RecordDraft::Player(PlayerDraft::from_fields(fields)?),
            RecordKind::Gallery => RecordDraft::Gallery(GalleryDraft::from_fields(fields)?),
        })
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            RecordDraft::News(_) => RecordKind::News,
            RecordDraft::Match(_) => RecordKind::Matches,
            RecordDraft::Player(_) => RecordKind::Players,
            RecordDraft::Gallery(_) => RecordKind::Gallery,
        }
    }

    /// Label used in gateway confirmation messages.
    pub fn label(&self) -> &'static str {
        kind_label(self.kind())
    }
}

pub fn kind_label(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::News => "News",
        RecordKind::Matches => "Match",
        RecordKind::Players => "Player",
        RecordKind::Gallery => "Gallery item",
    }
}
