use std::sync::Arc;

use crate::{config::Config, db::ContentStore};

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: SharedStore, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

pub type SharedStore = Arc<dyn ContentStore>;
