use anyhow::Context;
use tokio::signal;

use forum_service::config::Config;
use forum_service::grpc::GrpcServer;
use forum_service::observability::init_tracing;
use forum_service::storage::Storage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config)?;

    let storage = Storage::connect(&config)
        .await
        .context("failed to connect to the database")?;

    GrpcServer::new(config.grpc.clone())
        .serve_with_shutdown(storage.clone(), shutdown_signal())
        .await
        .context("gRPC server failed")?;

    storage.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received, draining connections");
}
