use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use hangman_bot::{
    config::Config,
    create_routes,
    dispatcher::run_polling,
    handlers::MessageHandler,
    session_registry::SessionRegistry,
    transport::{ChatTransport, TelegramClient},
};
use hangman_persistence::{PlayerRepository, ScoreLedger, connection::connect_and_migrate};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Hangman bot...");

    let config = Config::from_env().context("failed to load configuration")?;

    let ledger: Option<Arc<dyn ScoreLedger>> = if config.persistence_enabled {
        let db = connect_and_migrate(&config.database_url)
            .await
            .with_context(|| format!("failed to open score database {}", config.database_url))?;
        Some(Arc::new(PlayerRepository::new(db)))
    } else {
        warn!("Persistence disabled; /stats and /leaderboard will be unavailable");
        None
    };

    let registry = Arc::new(SessionRegistry::with_builtin_words());
    info!(
        "Loaded dictionary with {} words",
        registry.dictionary().len()
    );

    let handler = MessageHandler::new(registry.clone(), ledger.clone(), config.leaderboard_size);
    let transport: Arc<dyn ChatTransport> = Arc::new(TelegramClient::new(
        &config.telegram_api_url,
        &config.bot_token,
        Duration::from_secs(config.poll_timeout_seconds),
    ));

    let routes = create_routes(registry, ledger, config.leaderboard_size);
    let host: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("invalid HOST {}", config.host))?;

    let (stop_server, server_stopped) = oneshot::channel::<()>();
    let (addr, server) = warp::serve(routes)
        .try_bind_with_graceful_shutdown((host, config.port), async {
            server_stopped.await.ok();
        })
        .context("failed to bind status server")?;
    let server = tokio::spawn(server);
    info!("Status server listening on {}", addr);

    run_polling(transport, handler, shutdown_signal()).await;

    stop_server.send(()).ok();
    if let Err(e) = server.await {
        error!("Status server task failed: {}", e);
    }
    info!("Bot shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down gracefully..."),
        _ = terminate => info!("Received SIGTERM, shutting down gracefully..."),
    }
}
