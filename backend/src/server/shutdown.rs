//! Graceful shutdown: drain health, then stop the server.

use std::future::Future;

use actix_web::dev::Server;
use actix_web::web;
use tokio::signal;
use tracing::{error, info};

use crate::api::health::HealthState;

/// Run `server` until `shutdown` resolves, then mark the service as draining
/// and stop it, letting in-flight requests finish.
///
/// # Errors
/// Returns the server's I/O error, if any.
pub async fn serve_until<F>(
    server: Server,
    health_state: web::Data<HealthState>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + 'static,
{
    let handle = server.handle();
    actix_web::rt::spawn(async move {
        shutdown.await;
        health_state.mark_draining();
        info!("shutdown requested, draining");
        handle.stop(true).await;
    });
    server.await
}

/// Resolve on Ctrl+C or, on Unix, SIGTERM.
///
/// A signal whose handler cannot be installed is logged and never fires.
pub async fn wait_for_signal() {
    tokio::select! {
        () = ctrl_c() => info!("received Ctrl+C"),
        () = sigterm() => info!("received SIGTERM"),
    }
}

async fn ctrl_c() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn sigterm() {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            error!(error = %e, "failed to install SIGTERM handler");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn sigterm() {
    std::future::pending::<()>().await;
}
