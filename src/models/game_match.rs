use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    errors::AppError,
    models::fields::{FieldMap, required_text, text},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Match {
    pub id: i32,
    pub match_date: String,
    pub match_time: String,
    pub home_team: String,
    pub away_team: String,
    /// Free-form "H:A"; `None` until the match is played.
    pub score: Option<String>,
    pub location: String,
    pub home_logo: Option<String>,
    pub away_logo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Match {
    /// The score, or "VS" before the match is played.
    pub fn scoreboard(&self) -> &str {
        self.score.as_deref().unwrap_or("VS")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchDraft {
    pub match_date: String,
    pub match_time: String,
    pub home_team: String,
    pub away_team: String,
    pub score: Option<String>,
    pub location: String,
    pub home_logo: Option<String>,
    pub away_logo: Option<String>,
}

impl MatchDraft {
    pub fn from_fields(fields: &FieldMap) -> Result<Self, AppError> {
        Ok(Self {
            match_date: required_text(fields, "match_date")?,
            match_time: required_text(fields, "match_time")?,
            home_team: required_text(fields, "home_team")?,
            away_team: required_text(fields, "away_team")?,
            score: text(fields, "score"),
            location: required_text(fields, "location")?,
            home_logo: text(fields, "home_logo"),
            away_logo: text(fields, "away_logo"),
        })
    }
}
