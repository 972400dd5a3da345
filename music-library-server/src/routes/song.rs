use axum::{body::Body, extract::State, http::StatusCode};
use models::Song;
use tracing::info;

use crate::error::{AppError, Result};
use crate::routes::read_json;
use crate::state::AppState;

const EMPTY_KEY: &str = "empty group name or song name";

/// POST /song
/// Enriches `{group, song}` from the metadata service and stores it.
/// Fields the service leaves empty keep the values from the request.
pub async fn add_song(State(state): State<AppState>, body: Body) -> Result<StatusCode> {
    let mut song = read_keyed_song(body, "add").await?;

    let fetched = state
        .info_client
        .fetch_details(&song.group, &song.song)
        .await
        .inspect_err(|e| {
            info!(group = %song.group, song = %song.song, error = ?e, "failed to fetch song details");
        })?;
    song.detail.merge(fetched);

    music_db::add_song(&state.db_pool, &song)
        .await
        .inspect_err(|e| {
            info!(group = %song.group, song = %song.song, error = %e, "failed to add song");
        })
        .map_err(storage_failure)?;

    info!(group = %song.group, song = %song.song, "song added");
    Ok(StatusCode::OK)
}

/// PUT /song
/// Replaces release date, lyrics and link when they are given.
pub async fn update_song(State(state): State<AppState>, body: Body) -> Result<StatusCode> {
    let song = read_keyed_song(body, "update").await?;

    music_db::update_song(&state.db_pool, &song)
        .await
        .inspect_err(|e| {
            info!(group = %song.group, song = %song.song, error = %e, "failed to update song");
        })
        .map_err(storage_failure)?;

    info!(group = %song.group, song = %song.song, "song updated");
    Ok(StatusCode::OK)
}

/// DELETE /song
pub async fn delete_song(State(state): State<AppState>, body: Body) -> Result<StatusCode> {
    let song = read_keyed_song(body, "delete").await?;

    music_db::delete_song(&state.db_pool, &song.group, &song.song)
        .await
        .inspect_err(|e| {
            info!(group = %song.group, song = %song.song, error = %e, "failed to delete song");
        })
        .map_err(storage_failure)?;

    info!(group = %song.group, song = %song.song, "song deleted");
    Ok(StatusCode::OK)
}

async fn read_keyed_song(body: Body, operation: &str) -> Result<Song> {
    let song: Song = read_json(body).await?;
    if !song.has_key() {
        info!(operation, group = %song.group, song = %song.song, "empty group name or song name");
        return Err(AppError::BadRequest(EMPTY_KEY.to_string()));
    }
    Ok(song)
}

/// Mutations report every storage outcome, no-ops included, as a 500.
fn storage_failure(e: music_db::DbError) -> AppError {
    AppError::Database(e.to_string())
}
