use netoverride_application::use_cases::ProxyLifecycle;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Maps process signals onto lifecycle events until shutdown.
///
/// `SIGUSR1` puts the proxy to sleep, `SIGUSR2` wakes it, Ctrl-C and
/// `SIGTERM` stop it and cancel `shutdown`.
#[cfg(unix)]
pub async fn handle_signals(lifecycle: Arc<ProxyLifecycle>, shutdown: CancellationToken) {
    use tokio::signal::unix::{signal, SignalKind};

    let (mut sleep, mut wake, mut term) = match (
        signal(SignalKind::user_defined1()),
        signal(SignalKind::user_defined2()),
        signal(SignalKind::terminate()),
    ) {
        (Ok(sleep), Ok(wake), Ok(term)) => (sleep, wake, term),
        _ => {
            warn!("Failed to install signal handlers, only Ctrl-C stops the proxy");
            wait_for_ctrl_c(&lifecycle, &shutdown).await;
            return;
        }
    };

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = sleep.recv() => {
                if let Err(e) = lifecycle.sleep().await {
                    warn!(error = %e, "Ignoring sleep request");
                }
            }
            _ = wake.recv() => {
                if let Err(e) = lifecycle.wake().await {
                    warn!(error = %e, "Ignoring wake request");
                }
            }
            _ = term.recv() => {
                info!("SIGTERM received, stopping");
                stop(&lifecycle, &shutdown).await;
                break;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl-C received, stopping");
                stop(&lifecycle, &shutdown).await;
                break;
            }
        }
    }
}

#[cfg(not(unix))]
pub async fn handle_signals(lifecycle: Arc<ProxyLifecycle>, shutdown: CancellationToken) {
    wait_for_ctrl_c(&lifecycle, &shutdown).await;
}

async fn wait_for_ctrl_c(lifecycle: &ProxyLifecycle, shutdown: &CancellationToken) {
    tokio::select! {
        _ = shutdown.cancelled() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl-C received, stopping");
            stop(lifecycle, shutdown).await;
        }
    }
}

async fn stop(lifecycle: &ProxyLifecycle, shutdown: &CancellationToken) {
    lifecycle.stop().await;
    shutdown.cancel();
}
