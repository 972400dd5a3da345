pub mod info;
pub mod lyrics;
pub mod song;
pub mod songs;

use axum::body::Body;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use serde::de::DeserializeOwned;
use tower::ServiceBuilder;
use tower_http::compression::predicate::SizeAbove;
use tower_http::compression::CompressionLayer;
use tower_http::decompression::RequestDecompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;

use crate::error::{AppError, Result};
use crate::middleware::log_requests;
use crate::state::AppState;

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Every route goes through, outermost first: trace span, request logging,
/// gzip request decompression, gzip response compression.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/info", get(info::info))
        .route(
            "/song",
            post(song::add_song)
                .put(song::update_song)
                .delete(song::delete_song),
        )
        .route("/songs", get(songs::get_songs))
        .route("/lyrics", get(lyrics::get_lyrics))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(tracing::Level::DEBUG))
                        .on_response(
                            DefaultOnResponse::new()
                                .level(tracing::Level::DEBUG)
                                .latency_unit(LatencyUnit::Millis),
                        ),
                )
                .layer(from_fn(log_requests))
                .layer(RequestDecompressionLayer::new())
                .layer(CompressionLayer::new().compress_when(SizeAbove::new(1))),
        )
        .with_state(state)
}

/// Buffers and decodes a JSON request body.
///
/// A body that cannot be read (including a corrupt gzip stream) is a 500;
/// a body that is not valid JSON for `T` is a 400 carrying the decoder message.
pub(crate) async fn read_json<T: DeserializeOwned>(body: Body) -> Result<T> {
    let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| {
            tracing::info!(error = %e, "failed to read request body");
            AppError::Internal(format!("read request body: {e}"))
        })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::info!(error = %e, "error in request handler");
        AppError::from(e)
    })
}
