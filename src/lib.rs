pub mod app;
pub mod backup;
pub mod calendar;
pub mod config;
pub mod countdown;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod motivation;
pub mod state;
pub mod storage;
pub mod tracker;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use errors::StoreError;
pub use models::{DayKey, ProgressEntry, Task};
pub use state::AppState;
pub use storage::{load_data, persist_data, KeyValueStore, LocalStorage};
pub use tracker::Tracker;
