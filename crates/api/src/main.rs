use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use cloudpulse_cloud::{AlertPublisher, CloudWatchBackend, MetricFetcher, SnsChannel};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cloudpulse_api::config::ServerConfig;
use cloudpulse_api::router::build_app_router;
use cloudpulse_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cloudpulse_api=debug,cloudpulse_cloud=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });
    tracing::info!(
        host = %config.host,
        port = config.port,
        region = %config.aws_region,
        instance_id = %config.resource.instance_id,
        "Loaded server configuration"
    );

    // --- AWS clients (built once, injected) ---
    let sdk_config = cloudpulse_cloud::load_sdk_config(&config.aws_region).await;
    let fetcher = MetricFetcher::new(Arc::new(CloudWatchBackend::from_conf(&sdk_config)));
    let publisher = AlertPublisher::new(Arc::new(SnsChannel::from_conf(
        &sdk_config,
        config.sns_topic_arn.clone(),
    )));

    let addr = match config.host.parse::<IpAddr>() {
        Ok(ip) => SocketAddr::new(ip, config.port),
        Err(e) => {
            tracing::error!(host = %config.host, error = %e, "Invalid HOST address");
            std::process::exit(1);
        }
    };

    // --- Router ---
    let app = build_app_router(AppState {
        config: Arc::new(config),
        fetcher,
        publisher,
    });

    // --- Start server ---
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
