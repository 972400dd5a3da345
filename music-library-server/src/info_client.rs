use models::SongDetail;
use reqwest::Client;
use tracing::debug;

use crate::error::{AppError, Result};

/// Client for the external song metadata service.
///
/// One GET per call, bounded by the timeout configured on the `Client`.
#[derive(Debug, Clone)]
pub struct InfoClient {
    base_url: String,
    client: Client,
}

impl InfoClient {
    pub fn new(base_url: &str, client: Client) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub async fn fetch_details(&self, group: &str, song: &str) -> Result<SongDetail> {
        let url = format!(
            "{}/info?group={}&song={}",
            self.base_url,
            urlencoding::encode(group),
            urlencoding::encode(song)
        );
        debug!(%url, "requesting song details");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("info service request failed: {e}")))?;

        if resp.status() != reqwest::StatusCode::OK {
            return Err(AppError::Upstream(format!(
                "info service error: HTTP {}",
                resp.status()
            )));
        }

        resp.json::<SongDetail>()
            .await
            .map_err(|e| AppError::Upstream(format!("info service parse failed: {e}")))
    }
}
