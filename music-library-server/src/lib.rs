pub mod config;
pub mod error;
pub mod info_client;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod state;
