#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

use message_board_server::config::Config;
use message_board_server::telemetry;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::Instrument;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();
    config.validate()?;
    let telemetry_guard = telemetry::init_telemetry(&config.telemetry)?;

    message_board_server::setup_panic_hook();

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);

    let boot_span = tracing::info_span!("boot_server");
    let (listener, app_router, store, shutdown_tx, shutdown_rx, hook) = async {
        // Phase 1: storage must answer its readiness ping before anything is served
        let store = message_board_server::connect_storage(&config.database)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to connect to storage"))?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let hook = message_board_server::spawn_shutdown_hook(Arc::clone(&store), shutdown_timeout, shutdown_tx.clone());

        // Phase 2: wiring
        let services = message_board_server::build_services(&store);
        let app_router = message_board_server::api::app_router(&config, services)?;

        // Phase 3: listener
        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(address = %addr, database = %config.database.name, "listening");

        Ok::<_, anyhow::Error>((listener, app_router, store, shutdown_tx, shutdown_rx, hook))
    }
    .instrument(boot_span)
    .await?;

    let mut rx = shutdown_rx.clone();
    let served = axum::serve(listener, app_router)
        .with_graceful_shutdown(async move {
            let _ = rx.wait_for(|&s| s).await;
        })
        .await;

    if let Err(e) = &served {
        tracing::error!(error = %e, "Server error");
    }

    // The hook has already released storage when a signal stopped the server; otherwise release it here.
    let closed = if *shutdown_rx.borrow() {
        hook.await?
    } else {
        hook.abort();
        message_board_server::shutdown(&store, shutdown_timeout, &shutdown_tx).await
    };

    telemetry_guard.shutdown();

    closed?;
    served?;
    Ok(())
}
