use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::AppError;

/// The keyed record collections. Settings is not one of them: it has no ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    News,
    Matches,
    Players,
    Gallery,
}

/// Everything readable through `GET ?type=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionType {
    News,
    Matches,
    Players,
    Gallery,
    Settings,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::News => "news",
            RecordKind::Matches => "matches",
            RecordKind::Players => "players",
            RecordKind::Gallery => "gallery",
        }
    }
}

impl CollectionType {
    pub const ALL: [CollectionType; 5] = [
        CollectionType::News,
        CollectionType::Matches,
        CollectionType::Players,
        CollectionType::Gallery,
        CollectionType::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionType::Settings => "settings",
            CollectionType::News => "news",
            CollectionType::Matches => "matches",
            CollectionType::Players => "players",
            CollectionType::Gallery => "gallery",
        }
    }

    pub fn record_kind(self) -> Option<RecordKind> {
        match self {
            CollectionType::News => Some(RecordKind::News),
            CollectionType::Matches => Some(RecordKind::Matches),
            CollectionType::Players => Some(RecordKind::Players),
            CollectionType::Gallery => Some(RecordKind::Gallery),
            CollectionType::Settings => None,
        }
    }
}

impl FromStr for CollectionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "news" => Ok(CollectionType::News),
            "matches" => Ok(CollectionType::Matches),
            "players" => Ok(CollectionType::Players),
            "gallery" => Ok(CollectionType::Gallery),
            "settings" => Ok(CollectionType::Settings),
            _ => Err(AppError::BadRequest("Invalid entity type".into())),
        }
    }
}

impl FromStr for RecordKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CollectionType::from_str(s)?
            .record_kind()
            .ok_or_else(|| AppError::BadRequest("Invalid entity type".into()))
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
