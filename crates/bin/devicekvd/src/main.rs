//! # devicekvd — devicekv daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Build the key-value store (`SQLite` or in-memory)
//! - Construct the storage adapter and the device service on top of it
//! - Build the axum router, injecting the request handler
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use devicekv_adapter_http_axum::handler::DeviceHandler;
use devicekv_adapter_http_axum::router;
use devicekv_adapter_http_axum::state::AppState;
use devicekv_adapter_storage_sqlite_sqlx::SqliteKeyValueStore;
use devicekv_app::device_store::KvDeviceRepository;
use devicekv_app::memory_store::InMemoryKeyValueStore;
use devicekv_app::ports::KeyValueStore;
use devicekv_app::services::device_service::DeviceService;

use crate::config::{Config, StorageBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config.logging.filter);

    match config.storage.backend {
        StorageBackend::Sqlite => {
            let db = devicekv_adapter_storage_sqlite_sqlx::Config {
                database_url: config.database_url().to_string(),
            }
            .build()
            .await
            .context("failed to open sqlite database")?;
            tracing::info!(url = config.database_url(), "using sqlite storage");
            serve(&config, SqliteKeyValueStore::new(db.pool().clone())).await
        }
        StorageBackend::Memory => {
            tracing::info!("using in-memory storage");
            serve(&config, InMemoryKeyValueStore::default()).await
        }
    }
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter {filter:?}: {err}, falling back to info");
        EnvFilter::new("info")
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn serve<S>(config: &Config, store: S) -> anyhow::Result<()>
where
    S: KeyValueStore + Send + Sync + 'static,
{
    let scheme = config.storage.key_scheme;
    if scheme.round_trips() {
        tracing::info!(%scheme, "device keys are prefixed on read and write");
    } else {
        tracing::warn!(
            %scheme,
            "devices are written under their raw id but read under a prefixed key; \
             stored devices cannot be fetched back"
        );
    }

    let repo = KvDeviceRepository::new(store, scheme);
    let handler = DeviceHandler::new(DeviceService::new(repo));
    let app = router::build(AppState::new(handler));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!("devicekvd listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("devicekvd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "unable to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "unable to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
