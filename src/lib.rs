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

pub mod adapters;
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod telemetry;

use crate::adapters::database::PostgresGateway;
use crate::adapters::memory::InMemoryGateway;
use crate::adapters::{StorageError, StorageGateway};
use crate::api::ServiceContainer;
use crate::config::{DatabaseConfig, StorageBackend};
use crate::services::health_service::HealthService;
use crate::services::message_service::MessageService;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Opens the configured storage backend. Fails instead of returning a half-connected gateway.
///
/// # Errors
/// Returns `StorageError` if the backend cannot be reached or its readiness ping fails.
pub async fn connect_storage(config: &DatabaseConfig) -> Result<Arc<dyn StorageGateway>, StorageError> {
    match config.backend {
        StorageBackend::Postgres => Ok(Arc::new(PostgresGateway::connect(config).await?)),
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; messages are lost on restart");
            Ok(Arc::new(InMemoryGateway::new()))
        }
    }
}

/// Wires the services on top of a connected gateway.
#[must_use]
pub fn build_services(store: &Arc<dyn StorageGateway>) -> ServiceContainer {
    ServiceContainer {
        message_service: MessageService::new(Arc::clone(store)),
        health_service: HealthService::new(Arc::clone(store)),
    }
}

/// Closes the storage connection within `timeout`, then tells the listener to stop.
///
/// The gateway only releases its connection on the first call, so this is safe to
/// reach from both the signal hook and the normal exit path.
///
/// # Errors
/// Returns `StorageError` if the close fails or does not finish in time. The listener
/// is signalled either way.
pub async fn shutdown(
    store: &Arc<dyn StorageGateway>,
    timeout: Duration,
    shutdown_tx: &watch::Sender<bool>,
) -> Result<(), StorageError> {
    let result = match tokio::time::timeout(timeout, store.close()).await {
        Ok(res) => res,
        Err(_) => Err(StorageError::CloseTimeout(timeout)),
    };

    match &result {
        Ok(()) => tracing::info!("Storage connection released"),
        Err(e) => tracing::error!(error = %e, "Error closing storage connection"),
    }

    shutdown_tx.send_replace(true);
    result
}

/// Registers the single shutdown hook: on SIGINT or SIGTERM the storage connection is
/// released and the listener is told to stop accepting connections.
pub fn spawn_shutdown_hook(
    store: Arc<dyn StorageGateway>,
    timeout: Duration,
    shutdown_tx: watch::Sender<bool>,
) -> tokio::task::JoinHandle<Result<(), StorageError>> {
    tokio::spawn(async move {
        wait_for_signal().await;
        tracing::info!("Shutdown signal received");
        shutdown(&store, timeout, &shutdown_tx).await
    })
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

/// Routes panics through `tracing` so they reach structured logs.
pub fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info.location().map(|l| format!("{}:{}", l.file(), l.line())).unwrap_or_default();
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());

        tracing::error!(panic.location = %location, panic.payload = %payload, "Panic occurred");
    }));
}
