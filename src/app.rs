use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/status", get(handlers::get_status))
        .route("/api/today", get(handlers::get_today))
        .route("/api/moods", get(handlers::list_moods).post(handlers::save_mood))
        .route("/api/moods/:date", get(handlers::get_mood))
        .route("/api/moods/:date/card", get(handlers::get_card))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/timeline", get(handlers::get_timeline))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/prompt", get(handlers::get_prompt))
        .with_state(state)
}
