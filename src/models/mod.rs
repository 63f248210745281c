pub mod admin;
pub mod collection;
pub mod fields;
pub mod gallery;
pub mod game_match;
pub mod news;
pub mod player;
pub mod record;
pub mod settings;

pub use admin::{Admin, Claims};
pub use collection::{CollectionType, RecordKind};
pub use fields::FieldMap;
pub use gallery::{GalleryDraft, GalleryItem};
pub use game_match::{Match, MatchDraft};
pub use news::{NewsDraft, NewsItem};
pub use player::{Player, PlayerDraft};
pub use record::{Collection, Record, RecordDraft};
pub use settings::Settings;
