use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

mod config;
mod handler;
mod http;
mod listing;
mod logger;
mod server;

/// Failures that stop the process before it starts serving
#[derive(Debug, Error)]
enum StartupError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("invalid listen address: {0}")]
    Address(String),

    #[error("failed to initialize logging: {0}")]
    Logging(#[source] std::io::Error),

    #[error("failed to build runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

fn main() -> Result<(), StartupError> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::Config::load_from(&config_path)?;
    cfg.validate().map_err(StartupError::Invalid)?;
    logger::init(&cfg).map_err(StartupError::Logging)?;

    // Build the Tokio runtime, honouring the configured worker count
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
        logger::log_config(&format!("Using {workers} worker threads"));
    } else {
        logger::log_config("Using default worker threads (CPU cores)");
    }

    let runtime = runtime_builder.build().map_err(StartupError::Runtime)?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), StartupError> {
    let addr = cfg.get_socket_addr().map_err(StartupError::Address)?;
    let listener = server::create_listener(addr, cfg.performance.backlog)
        .map_err(|source| StartupError::Bind { addr, source })?;

    let state = Arc::new(config::AppState::new(&cfg));
    if !state.public_root.path().is_dir() {
        logger::log_public_root_missing(state.public_root.path());
    }

    logger::log_server_start(&addr, &cfg);
    server::signal::start_signal_handler(Arc::clone(&state.shutdown));

    let grace = Duration::from_secs(cfg.performance.write_timeout);
    let active_connections = Arc::new(AtomicUsize::new(0));

    // Connections are served with spawn_local
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(
            listener,
            state,
            active_connections,
            grace,
        ))
        .await;

    Ok(())
}
