use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use models::{parse_date, Filter};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SongsQuery {
    group: Option<String>,
    song: Option<String>,
    text: Option<String>,
    link: Option<String>,
    release_from: Option<String>,
    release_to: Option<String>,
    limit: Option<String>,
    offset: Option<String>,
}

/// GET /songs
/// 200 with the matching page, 204 when nothing matches.
pub async fn get_songs(
    State(state): State<AppState>,
    Query(params): Query<SongsQuery>,
) -> Result<Response> {
    let filter = parse_filter(params).map_err(|e| {
        info!(error = %e, "failed to parse query params");
        AppError::BadRequest("invalid query parameters".to_string())
    })?;

    let songs = music_db::get_songs(&state.db_pool, &filter)
        .await
        .map_err(|e| {
            info!(error = %e, "failed to fetch songs");
            AppError::Database(e.to_string())
        })?;

    if songs.is_empty() {
        debug!(?filter, "no songs found");
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(Json(songs).into_response())
}

/// Empty values are treated as absent.
fn parse_filter(params: SongsQuery) -> std::result::Result<Filter, String> {
    let mut filter = Filter {
        group: present(params.group),
        song: present(params.song),
        text: present(params.text),
        link: present(params.link),
        ..Filter::default()
    };

    if let Some(v) = present(params.release_from) {
        filter.release_from = Some(parse_date(&v).map_err(|e| e.to_string())?);
    }
    if let Some(v) = present(params.release_to) {
        filter.release_to = Some(parse_date(&v).map_err(|e| e.to_string())?);
    }
    if let Some(v) = present(params.limit) {
        filter.limit = match v.trim().parse::<i64>() {
            Ok(limit) if limit > 0 => limit,
            _ => return Err(format!("limit must be a positive integer, got {v:?}")),
        };
    }
    if let Some(v) = present(params.offset) {
        filter.offset = match v.trim().parse::<i64>() {
            Ok(offset) if offset >= 0 => offset,
            _ => return Err(format!("offset must be a non-negative integer, got {v:?}")),
        };
    }

    Ok(filter)
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
