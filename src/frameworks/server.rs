// Framework bootstrap for the game stream runtime.

use crate::domain::UserStore;
use crate::frameworks::{config, db};
use crate::interface_adapters::routes;
use crate::interface_adapters::state::{AppState, StreamSettings, UuidGameIds};
use crate::interface_adapters::stores::{InMemoryUserStore, PostgresUserStore};
use crate::use_cases::{BrokerRegistry, BrokerSettings};

use std::io::{Error, Result};
use std::sync::Arc;
use tracing::{debug, error, info};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        error!(%info, ?backtrace, "panic");
    }));
}

/// Serves the API on `listener` with state built from the environment.
pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    let state = build_state().await?;
    serve(listener, state).await
}

/// Serves the API on `listener` with caller-provided state.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> Result<()> {
    let address = listener.local_addr()?;
    let registry = state.registry.clone();
    let app = routes::app(state);

    info!(%address, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(registry))
        .await
        .inspect_err(|e| {
            error!(error = %e, "server error");
        })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = config::http_addr();

    // Startup failures are fatal; the binary exits non-zero.
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            error!(%address, error = %e, "failed to bind");
        })?;

    let state = build_state().await.inspect_err(|e| {
        error!(error = %e, "failed to initialize");
    })?;

    serve(listener, state).await
}

async fn build_state() -> Result<AppState> {
    let users = build_user_store().await?;

    let settings = BrokerSettings {
        subscriber_channel_capacity: config::SUBSCRIBER_CHANNEL_CAPACITY,
        retire_when_empty: config::retire_brokers_when_empty(),
    };
    let stream = StreamSettings {
        keep_alive: config::stream_keep_alive(),
    };
    debug!(
        retire_when_empty = settings.retire_when_empty,
        keep_alive_secs = stream.keep_alive.map(|d| d.as_secs()),
        "broker settings"
    );

    Ok(AppState {
        registry: BrokerRegistry::new(settings),
        users,
        game_ids: Arc::new(UuidGameIds),
        stream,
    })
}

async fn build_user_store() -> Result<Arc<dyn UserStore>> {
    match config::user_store_backend().map_err(Error::other)? {
        config::UserStoreBackend::Memory => {
            info!("using in-memory user store");
            Ok(Arc::new(InMemoryUserStore::new()))
        }
        config::UserStoreBackend::Postgres => {
            let database_url = config::database_url()
                .ok_or_else(|| Error::other("DATABASE_URL must be set when USER_STORE=postgres"))?;
            let db = db::connect_pool(&database_url)
                .await
                .map_err(|e| Error::other(format!("failed to connect to database: {e}")))?;
            db::run_migrations(&db)
                .await
                .map_err(|e| Error::other(format!("failed to run migrations: {e}")))?;
            info!("using postgres user store");
            Ok(Arc::new(PostgresUserStore { db }))
        }
    }
}

// Resolves on Ctrl-C after ending every open stream, so graceful shutdown can finish.
async fn shutdown_signal(registry: Arc<BrokerRegistry>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
    registry.retire_all().await;
}
