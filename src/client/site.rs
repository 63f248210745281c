use crate::{
    client::{
        gateway::GatewayClient,
        sync::{ContentState, SyncReport, sync_all},
    },
    models::{GalleryItem, Match, NewsItem, Player},
};

const NEWS_PREVIEW: usize = 3;
const SCHEDULE_PREVIEW: usize = 5;
const ROSTER_PREVIEW: usize = 6;
const GALLERY_PREVIEW: usize = 6;

const DEFAULT_LOGO: &str = "/images/logo.jpg";
const DEFAULT_HERO_IMAGE: &str = "/images/hero.jpg";

const HISTORY_DEFAULTS: [(&str, &str); 3] = [
    ("Founding", "The club was founded by local hockey enthusiasts"),
    ("Achievements", "The team competes in the national league"),
    ("Our fans", "Loyal supporters at every home game"),
];

/// Page sections whose heading and subheading come from settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    News,
    Calendar,
    Team,
    History,
    Gallery,
    Contacts,
}

impl Section {
    fn key(&self) -> &'static str {
        match self {
            Section::News => "news",
            Section::Calendar => "calendar",
            Section::Team => "team",
            Section::History => "history",
            Section::Gallery => "gallery",
            Section::Contacts => "contacts",
        }
    }

    fn defaults(&self) -> (&'static str, &'static str) {
        match self {
            Section::News => ("News", "Latest stories and announcements"),
            Section::Calendar => ("Match calendar", "Fixtures and results"),
            Section::Team => ("Team roster", "Our players"),
            Section::History => ("Club history", "The road so far"),
            Section::Gallery => ("Gallery", "Best moments"),
            Section::Contacts => ("Contacts", "Get in touch"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hero<'a> {
    pub site_title: &'a str,
    pub title: &'a str,
    pub subtitle: &'a str,
    pub image: &'a str,
    pub logo: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contacts<'a> {
    pub phone: &'a str,
    pub email: &'a str,
    pub address: &'a str,
}

/// One of the three blocks of the history section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryBlock<'a> {
    pub title: &'a str,
    pub text: &'a str,
}

/// A calendar row: the match plus what the score column shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture<'a> {
    pub game: &'a Match,
    pub scoreboard: &'a str,
}

/// Read-only public view. Loads everything once and serves section slices.
pub struct PublicSite<G> {
    gateway: G,
    content: ContentState,
    loading: bool,
}

impl<G: GatewayClient> PublicSite<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            content: ContentState::default(),
            loading: true,
        }
    }

    /// Loads all collections. Failures are logged only; the page renders
    /// with whatever arrived.
    pub async fn load(&mut self) -> SyncReport {
        let report = sync_all(&self.gateway, &mut self.content).await;
        for (collection, e) in &report.failed {
            tracing::error!("Failed to load {} for the public site: {}", collection, e);
        }
        self.loading = false;
        report
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn content(&self) -> &ContentState {
        &self.content
    }

    pub fn hero(&self) -> Hero<'_> {
        let settings = &self.content.settings;
        Hero {
            site_title: settings.get_or("site_title", "Club"),
            title: settings.get_or("hero_title", "Hockey Club"),
            subtitle: settings.get_or("hero_subtitle", "Season schedule, roster and news"),
            image: settings.get_or("hero_image", DEFAULT_HERO_IMAGE),
            logo: settings.get_or("logo_url", DEFAULT_LOGO),
        }
    }

    pub fn heading(&self, section: Section) -> Heading<'_> {
        let settings = &self.content.settings;
        let (title, subtitle) = section.defaults();
        Heading {
            title: settings.get_or(&format!("{}_title", section.key()), title),
            subtitle: settings.get_or(&format!("{}_subtitle", section.key()), subtitle),
        }
    }

    pub fn latest_news(&self) -> &[NewsItem] {
        preview(&self.content.news, NEWS_PREVIEW)
    }

    pub fn schedule(&self) -> Vec<Fixture<'_>> {
        preview(&self.content.matches, SCHEDULE_PREVIEW)
            .iter()
            .map(|game| Fixture {
                game,
                scoreboard: game.scoreboard(),
            })
            .collect()
    }

    pub fn roster(&self) -> &[Player] {
        preview(&self.content.players, ROSTER_PREVIEW)
    }

    pub fn gallery(&self) -> &[GalleryItem] {
        preview(&self.content.gallery, GALLERY_PREVIEW)
    }

    pub fn history_blocks(&self) -> Vec<HistoryBlock<'_>> {
        let settings = &self.content.settings;
        HISTORY_DEFAULTS
            .iter()
            .enumerate()
            .map(|(i, (title, text))| HistoryBlock {
                title: settings.get_or(&format!("history_block{}_title", i + 1), title),
                text: settings.get_or(&format!("history_block{}_text", i + 1), text),
            })
            .collect()
    }

    pub fn contacts(&self) -> Contacts<'_> {
        let settings = &self.content.settings;
        Contacts {
            phone: settings.get_or("contact_phone", "+1 (555) 010-0000"),
            email: settings.get_or("contact_email", "info@club.example"),
            address: settings.get_or("contact_address", "Club arena, Main street 1"),
        }
    }
}

fn preview<T>(items: &[T], limit: usize) -> &[T] {
    &items[..items.len().min(limit)]
}
