use crate::store::MoodStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<MoodStore>>,
    /// Set when the startup snapshot could not be loaded.
    pub hydration_warning: Option<Arc<str>>,
}

impl AppState {
    pub fn new(store: MoodStore, hydration_warning: Option<String>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            hydration_warning: hydration_warning.map(Arc::from),
        }
    }
}
