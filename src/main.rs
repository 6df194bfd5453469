use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::signal;

use petromon::registry::Registry;
use petromon::{broadcaster, config, downstream, logger};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load_config();
    logger::setup_logging(&config.log_dir, &config.log_level)?;

    let (shutdown_tx, _) = tokio::sync::broadcast::channel(1);
    let registry = Arc::new(Registry::new());

    let mut broadcaster_handle = tokio::spawn(broadcaster::run(
        config.clone(),
        registry.clone(),
        shutdown_tx.subscribe(),
    ));

    let server_config = config.clone();
    let server_registry = registry.clone();
    let server_shutdown = shutdown_tx.subscribe();
    let mut server_handle = tokio::spawn(async move {
        if let Err(e) = downstream::run(server_config, server_registry, server_shutdown).await {
            log::error!("Monitoring server error: {}", e);
        }
    });

    // Wait for shutdown signal
    tokio::select! {
        _ = signal::ctrl_c() => {
            log::info!("Ctrl-C received, initiating shutdown.");
        }
        _ = async {
            #[cfg(unix)]
            {
                let mut term_signal = signal::unix::signal(signal::unix::SignalKind::terminate())
                    .expect("failed to install signal handler");
                term_signal.recv().await;
                log::info!("SIGTERM received, initiating shutdown.");
            }
            #[cfg(not(unix))]
            {
                // On non-unix platforms, just wait forever.
                std::future::pending::<()>().await;
            }
        } => {}
    }

    // Send shutdown signal to all components
    let _ = shutdown_tx.send(());

    // In-flight work gets a bounded grace period, then the tasks are aborted.
    let grace = Duration::from_secs(config.shutdown_grace_secs);
    let drained = tokio::time::timeout(grace, async {
        let _ = (&mut broadcaster_handle).await;
        let _ = (&mut server_handle).await;
    })
    .await;

    if drained.is_err() {
        log::warn!("Shutdown grace period expired, aborting remaining tasks.");
        broadcaster_handle.abort();
        server_handle.abort();
    }

    log::info!("Shutdown complete.");
    Ok(())
}
