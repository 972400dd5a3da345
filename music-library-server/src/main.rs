use eyre::WrapErr;
use tokio::net::TcpListener;

use music_library_server::config::Config;
use music_library_server::info_client::InfoClient;
use music_library_server::{logging, routes, state};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let config = Config::from_env().wrap_err("Failed to load music library config")?;

    logging::init(config.log_level);

    let db_pool = music_db::connect(&config.database_uri)
        .await
        .wrap_err("Failed to connect to database")?;
    tracing::info!("Database connected successfully");

    music_db::migrate(&db_pool)
        .await
        .wrap_err("Failed to run database migrations")?;
    tracing::info!("Database migrations completed successfully");

    let http_client = reqwest::Client::builder()
        .timeout(config.client_timeout)
        .build()
        .wrap_err("Failed to build http client")?;

    let app_state = state::AppState {
        db_pool: db_pool.clone(),
        info_client: InfoClient::new(&config.info_service_address, http_client),
    };

    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(config.run_address)
        .await
        .wrap_err("Failed to bind to address")?;

    tracing::info!(
        address = %config.run_address,
        info_service = %config.info_service_address,
        "The music library server is running"
    );

    // No deadline: in-flight requests are allowed to finish.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Server error")?;

    music_db::close(&db_pool).await;
    tracing::info!("The server has been shut down gracefully");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for interrupt signal");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received, draining in-flight requests");
}
