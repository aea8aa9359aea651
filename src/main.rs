use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use noteful_api::config::config;
use noteful_api::database::DatabaseManager;
use noteful_api::AppState;

#[derive(Parser, Debug)]
#[command(name = "noteful-api")]
#[command(about = "REST API for notes organized into folders")]
#[command(version)]
struct Args {
    /// Interface to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides NOTEFUL_API_PORT / PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Do not apply pending migrations on startup
    #[arg(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("noteful_api=debug,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    // Initialize configuration (this loads the config singleton)
    let config = config();
    tracing::info!("Starting Noteful API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    if config.database.run_migrations && !args.skip_migrations {
        DatabaseManager::migrate(&pool)
            .await
            .context("failed to apply migrations")?;
    }

    let state = AppState::postgres(pool).context("failed to build application state")?;
    let app = noteful_api::app(state);

    let bind_addr = match (args.host, args.port) {
        (None, None) => config.bind_address(),
        (host, port) => format!(
            "{}:{}",
            host.unwrap_or_else(|| config.server.host.clone()),
            port.unwrap_or(config.server.port)
        ),
    };

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Noteful API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}
