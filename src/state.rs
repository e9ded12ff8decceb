use crate::config::Config;
use crate::storage::LocalStorage;
use crate::tracker::Tracker;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub config: Arc<Config>,
    pub tracker: Arc<Mutex<Tracker<LocalStorage>>>,
}

impl AppState {
    pub fn new(config: Config, mut data: LocalStorage) -> Self {
        data.set_quota(Some(config.storage_quota));
        Self {
            data_path: config.data_path.clone(),
            config: Arc::new(config),
            tracker: Arc::new(Mutex::new(Tracker::new(data))),
        }
    }
}
