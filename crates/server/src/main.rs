use clap::Parser;
use herbdb_core::config;
use herbdb_core::storage::{ReadPolicy, Storage};
use herbdb_server::api::create_router;
use herbdb_server::api::handlers::AppState;
use herbdb_server::api::metrics;
use std::future::IntoFuture;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Notify;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "herbdb", about = "Medicinal plants catalog service")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = config::DEFAULT_PORT)]
    port: u16,

    /// Directory holding plants.json, admin_settings.json and logs.json
    #[arg(short, long, env = "HERBDB_DATA_DIR", default_value = config::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// How reads treat an unreadable or corrupt data file: fail-open or fail-closed
    #[arg(long, default_value_t = ReadPolicy::FailOpen)]
    read_policy: ReadPolicy,

    /// Graceful shutdown timeout in seconds
    #[arg(long, default_value_t = config::DEFAULT_SHUTDOWN_TIMEOUT_SECS)]
    shutdown_timeout: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("herbdb_server=info".parse()?)
                .add_directive("herbdb_core=info".parse()?),
        )
        .init();

    let args = Args::parse();

    if args.port == 0 {
        eprintln!("Error: port must be > 0");
        std::process::exit(1);
    }
    if args.data_dir.exists() && !args.data_dir.is_dir() {
        eprintln!(
            "Error: data_dir '{}' exists but is not a directory",
            args.data_dir.display()
        );
        std::process::exit(1);
    }
    std::fs::create_dir_all(&args.data_dir)?;

    let storage = Storage::open(&args.data_dir, args.read_policy);

    // Startup check: failures are logged, requests still honor the read policy.
    let plants_count = match storage.catalog.load() {
        Ok(plants) => plants.len(),
        Err(e) => {
            tracing::warn!("Could not load catalog: {}", e);
            0
        }
    };
    if let Err(e) = storage.settings.load() {
        tracing::warn!("Could not load settings: {}", e);
    }

    let prometheus_handle =
        metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?;

    let state = AppState {
        storage: storage.clone(),
        prometheus_handle,
        start_time: Instant::now(),
    };

    let app = create_router(state);
    let addr = format!("0.0.0.0:{}", args.port);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        port = args.port,
        data_dir = %args.data_dir.display(),
        read_policy = %args.read_policy,
        plants = plants_count,
        "herbdb ready"
    );

    // Spawn catalog metrics background task
    let metrics_catalog = storage.catalog.clone();
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(Duration::from_secs(config::METRICS_REFRESH_SECS));
        loop {
            interval.tick().await;
            metrics::update_catalog_metrics(&metrics_catalog);
            metrics::update_file_metrics(&metrics_catalog);
        }
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let signalled = Arc::new(Notify::new());
    let notify = signalled.clone();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_signal().await;
            notify.notify_one();
        })
        .into_future();
    let mut server = std::pin::pin!(server);

    tokio::select! {
        result = &mut server => result?,
        _ = signalled.notified() => {
            let deadline = Duration::from_secs(args.shutdown_timeout);
            match tokio::time::timeout(deadline, &mut server).await {
                Ok(result) => result?,
                Err(_) => tracing::error!(
                    "Shutdown timeout ({}s) exceeded, abandoning in-flight requests",
                    args.shutdown_timeout
                ),
            }
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }

    tracing::info!("Shutting down gracefully, draining in-flight requests...");
}
