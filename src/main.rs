//! site-gate server binary.
//!
//! Serves the upload site behind a shared-password gate. Every request passes
//! through the gate middleware; visitors without a valid access cookie are
//! redirected to the unlock page, which trades a configured password for a
//! seven day access cookie.

mod app;
mod config;
mod error;
mod frontend;
mod gate;
mod grant;
mod http;
mod logging;
mod secrets;
mod tls;
mod unlock;
mod version;

use axum_server::Handle;
use clap::Parser;
use shadow_rs::shadow;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn};

use crate::config::{Args, SHUTDOWN_GRACE_SECS};

shadow!(build);

/// Starts the server and blocks until shutdown.
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    logging::init_logging();

    let args = Args::parse();
    let gate = Arc::new(args.gate_config());
    if gate.secrets.is_empty() {
        warn!("no site password configured, set SITE_PASSWORD1 and/or SITE_PASSWORD2");
    } else {
        info!(
            secrets = gate.secrets.len(),
            secure_cookie = gate.grant.is_secure(),
            "site gate configured"
        );
    }

    let app = app::build_router(gate);

    let host = args
        .host
        .parse::<IpAddr>()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string()))?;
    let http_addr = SocketAddr::new(host, args.http_port);
    let handle = Handle::new();

    info!("Starting HTTP server at {}", http_addr);
    let http_server = axum_server::bind(http_addr)
        .handle(handle.clone())
        .serve(app.clone().into_make_service_with_connect_info::<SocketAddr>());

    match args.tls_paths() {
        Some((cert, key)) => {
            let tls_config = tls::load_rustls_config(cert, key).await?;
            let https_addr = SocketAddr::new(host, args.https_port);
            info!("Starting HTTPS server at {}", https_addr);
            let https_server = axum_server::bind_rustls(https_addr, tls_config)
                .handle(handle.clone())
                .serve(app.into_make_service_with_connect_info::<SocketAddr>());
            tokio::select! {
                result = http_server => result?,
                result = https_server => result?,
                _ = shutdown_signal(handle) => {}
            }
        }
        None => {
            tokio::select! {
                result = http_server => result?,
                _ = shutdown_signal(handle) => {}
            }
        }
    }

    Ok(())
}

async fn shutdown_signal(handle: Handle) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received termination signal shutting down");
    handle.graceful_shutdown(Some(Duration::from_secs(SHUTDOWN_GRACE_SECS)));
}
