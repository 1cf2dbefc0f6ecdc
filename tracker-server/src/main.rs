use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::info;

use tracker_persistence::connection::connect_and_migrate;
use tracker_server::{auth::AuthService, config::Config, create_routes, session::SessionManager};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting shot tracker server...");

    let config = Config::new();

    // Initialize database connection and run migrations
    let db = match connect_and_migrate().await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database and run migrations: {}", e);
            std::process::exit(1);
        }
    };

    let quiet_period = Duration::from_millis(config.team_save_quiet_millis);
    let session_manager = Arc::new(SessionManager::new(db, quiet_period));

    // Check for dev mode
    let auth_service =
        if std::env::var("AUTH_DEV_MODE").unwrap_or_else(|_| "false".to_string()) == "true" {
            info!("Starting in development authentication mode - token validation disabled");
            Arc::new(AuthService::new_dev_mode())
        } else {
            Arc::new(AuthService::new(config.identity_base_url.clone()))
        };

    let routes = create_routes(session_manager, auth_service);

    info!("Server starting on {}:{}", config.host, config.port);

    let addr = (
        config.host.parse::<std::net::IpAddr>().unwrap(),
        config.port,
    );

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown(addr, async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt()).unwrap();
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate()).unwrap();

            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            signal::ctrl_c().await.expect("Failed to listen for ctrl+c");
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    });

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}
