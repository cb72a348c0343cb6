use std::sync::Arc;

use crate::config::Config;
use crate::store::RecordStore;

/// Everything a request needs, passed explicitly to every handler
pub struct AppState {
    pub config: Config,
    pub store: Arc<RecordStore>,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        let store = Arc::new(RecordStore::new(&config.data_file, config.cache));

        Arc::new(Self { config, store })
    }
}
