pub mod app;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;
pub mod timeline;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::SnapshotSlot;
pub use store::{MoodEvent, MoodStore};
