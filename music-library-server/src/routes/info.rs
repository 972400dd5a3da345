use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// GET /info - 200 when the database answers, 500 otherwise
pub async fn info(State(state): State<AppState>) -> StatusCode {
    match music_db::ping(&state.db_pool).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::info!(error = %e, "database ping failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
