use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{error, warn};

use super::render;
use super::AppState;
use crate::schedule::calendar_links::ics_document;
use crate::schedule::classify::partition_events;
use crate::schedule::embed::embed_url;

/// Query parameters accepted by the schedule page
#[derive(Debug, Deserialize, Default)]
pub struct ScheduleParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// Handler for the schedule page
pub async fn index_handler(
    State(state): State<AppState>,
    Query(params): Query<ScheduleParams>,
) -> impl IntoResponse {
    let (site_title, tz, default_duration_minutes) = {
        let config_read = state.config.read().await;
        (
            config_read.site_title.clone(),
            config_read.tz(),
            config_read.default_duration_minutes,
        )
    };

    let now = Utc::now();
    let query = params.q.unwrap_or_default();
    let countdown = state.countdown.borrow().clone();

    // A failed load is reported inside the next-live panel, not as an
    // error page
    let (schedule, load_failed) = match state.store.get_events().await {
        Ok(events) => (partition_events(&events, now, tz), false),
        Err(e) => {
            warn!("Rendering schedule without events: {}", e);
            (Default::default(), true)
        }
    };

    Html(render::render_index(
        &site_title,
        query.trim(),
        &schedule,
        &countdown,
        tz,
        default_duration_minutes,
        now,
        load_failed,
    ))
}

/// Handler for per-event ICS downloads
pub async fn ics_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let (tz, default_duration_minutes) = {
        let config_read = state.config.read().await;
        (config_read.tz(), config_read.default_duration_minutes)
    };

    let events = state
        .store
        .get_events()
        .await
        .map_err(|_| StatusCode::NOT_FOUND)?;

    let event = events
        .iter()
        .find(|event| event.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;

    let ics = ics_document(event, tz, default_duration_minutes, Utc::now()).map_err(|e| {
        error!("Failed to build ICS for '{}': {}", id, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "text/calendar; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}.ics\"", id),
            ),
        ],
        ics,
    ))
}

/// Handler for the embedded player page
pub async fn watch_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let site_title = {
        let config_read = state.config.read().await;
        config_read.site_title.clone()
    };

    let events = state
        .store
        .get_events()
        .await
        .map_err(|_| StatusCode::NOT_FOUND)?;

    let event = events
        .iter()
        .find(|event| event.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;

    let watch_url = event.youtube_url.as_deref().ok_or(StatusCode::NOT_FOUND)?;

    Ok(Html(render::render_watch(
        &site_title,
        &event.title,
        &embed_url(watch_url),
    )))
}

// Handler for API health check
pub async fn health_handler() -> &'static str {
    "OK"
}
