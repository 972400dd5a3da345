use axum::{
    extract::{Query, State},
    Json,
};
use models::VerseResponse;
use serde::Deserialize;
use tracing::info;

use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LyricsQuery {
    #[serde(default)]
    group: String,
    #[serde(default)]
    song: String,
    verse: Option<String>,
}

/// GET /lyrics?group=..&song=..&verse=N
pub async fn get_lyrics(
    State(state): State<AppState>,
    Query(params): Query<LyricsQuery>,
) -> Result<Json<VerseResponse>> {
    let verse_num = params
        .verse
        .as_deref()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n >= 1)
        .ok_or_else(|| {
            info!(verse = ?params.verse, "invalid verse number");
            AppError::BadRequest("invalid verse number".to_string())
        })?;

    let verse = music_db::get_lyrics(&state.db_pool, &params.group, &params.song, verse_num)
        .await
        .inspect_err(|e| {
            info!(group = %params.group, song = %params.song, error = %e, "failed to fetch lyrics");
        })?;

    info!(group = %params.group, song = %params.song, verse = verse_num, "got lyrics");
    Ok(Json(verse))
}
