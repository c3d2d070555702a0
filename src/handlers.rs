use crate::calendar::{build_grid, CalendarGrid, YearMonth};
use crate::errors::AppError;
use crate::models::{
    DateKey, MonthQuery, MoodCardResponse, MoodLevel, MoodRecord, PromptQuery, PromptResponse,
    SaveMoodRequest, StatusResponse, TodayResponse,
};
use crate::prompts::{pick_caption, pick_prompt, pick_tags};
use crate::state::AppState;
use crate::stats::{build_stats, StatsResponse};
use crate::timeline::{build_timeline, MonthGroup};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Local;

pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let store = state.store.lock().await;
    Json(StatusResponse {
        entries: store.len(),
        hydration_warning: state.hydration_warning.as_deref().map(str::to_string),
    })
}

pub async fn get_today(State(state): State<AppState>) -> Json<TodayResponse> {
    let today = today_key();
    let store = state.store.lock().await;
    Json(TodayResponse {
        date: today.to_string(),
        entry: store.get(today).cloned(),
    })
}

pub async fn list_moods(State(state): State<AppState>) -> Json<Vec<MoodRecord>> {
    let store = state.store.lock().await;
    Json(store.list())
}

pub async fn save_mood(
    State(state): State<AppState>,
    Json(payload): Json<SaveMoodRequest>,
) -> Result<Json<MoodRecord>, AppError> {
    let date = match payload.date.as_deref() {
        Some(raw) => DateKey::parse(raw.trim())?,
        None => today_key(),
    };
    let mood: MoodLevel = payload.mood.parse().map_err(AppError::bad_request)?;
    let note = payload.note.map(|note| note.trim().to_string());

    let mut store = state.store.lock().await;
    let record = store.upsert(date, mood, note).await;
    Ok(Json(record))
}

pub async fn get_mood(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<MoodRecord>, AppError> {
    let key = DateKey::parse(&date)?;
    let store = state.store.lock().await;
    store
        .get(key)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no mood recorded for {key}")))
}

pub async fn get_card(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<MoodCardResponse>, AppError> {
    let key = DateKey::parse(&date)?;
    let record = state
        .store
        .lock()
        .await
        .get(key)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("no mood recorded for {key}")))?;
    Ok(Json(mood_card(&record)))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CalendarGrid>, AppError> {
    let month = month_or_current(query.month.as_deref())?;
    let store = state.store.lock().await;
    Ok(Json(build_grid(&store, month)))
}

pub async fn get_timeline(State(state): State<AppState>) -> Json<Vec<MonthGroup>> {
    let store = state.store.lock().await;
    Json(build_timeline(&store))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    let month = month_or_current(query.month.as_deref())?;
    let store = state.store.lock().await;
    Ok(Json(build_stats(&store, month)))
}

pub async fn get_prompt(Query(query): Query<PromptQuery>) -> Json<PromptResponse> {
    let prompt = pick_prompt(query.mood, &mut rand::thread_rng());
    Json(PromptResponse {
        prompt: prompt.to_string(),
    })
}

fn mood_card(record: &MoodRecord) -> MoodCardResponse {
    let mut rng = rand::thread_rng();
    MoodCardResponse {
        date: record.date.format("%B %-d, %Y").to_string(),
        mood: record.mood,
        emoji: record.mood.emoji().to_string(),
        caption: pick_caption(record.mood, &mut rng).to_string(),
        tags: pick_tags(record.mood, &mut rng)
            .into_iter()
            .map(str::to_string)
            .collect(),
        note: Some(record.note.clone()).filter(|note| !note.is_empty()),
    }
}

fn month_or_current(raw: Option<&str>) -> Result<YearMonth, AppError> {
    match raw {
        Some(raw) => Ok(YearMonth::parse(raw.trim())?),
        None => Ok(YearMonth::current()),
    }
}

fn today_key() -> DateKey {
    DateKey::from(Local::now().date_naive())
}
