//! apr-svc - Annual program report service
//!
//! Default port: 5780

use anyhow::{Context, Result};
use apr_common::api::MessageCatalog;
use apr_common::config::RootFolderInitializer;
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use apr_svc::config::{load_toml, Args, Config};
use apr_svc::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_file = args.config_file();
    let toml = load_toml(config_file.as_deref()).context("Failed to read config file")?;
    let config = Config::resolve(&args, toml.as_ref()).context("Invalid configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},tower_http=info", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting apr-svc version {}", env!("CARGO_PKG_VERSION"));
    match (&config_file, &toml) {
        (Some(path), Some(_)) => info!("Config file: {}", path.display()),
        (Some(path), None) => info!("No config file at {}, using defaults", path.display()),
        (None, _) => info!("No config directory available, using defaults"),
    }
    info!("Root folder: {}", config.root_folder.display());

    RootFolderInitializer::new(config.root_folder.clone())
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;

    info!("Database: {}", config.database_path.display());
    let db = apr_common::db::init_database(&config.database_path)
        .await
        .context("Failed to open database")?;

    let messages = MessageCatalog::new(config.default_locale);
    info!("Default message locale: {}", messages.default_locale().as_str());

    let state = AppState::new(db, messages);
    let app = apr_svc::build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
