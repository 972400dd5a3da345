use music_db::SqlitePool;

use crate::info_client::InfoClient;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub info_client: InfoClient,
}
