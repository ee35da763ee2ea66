pub mod database;
pub mod memory;

use crate::domain::message::{Message, NewMessage};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage connection is not established")]
    Disconnected,
    #[error("{0}")]
    Database(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("timed out after {0:?} closing the storage connection")]
    CloseTimeout(std::time::Duration),
}

/// Access to the `messages` collection.
///
/// A gateway owns one logical connection: it is opened during startup, shared by every
/// request, and released once through [`StorageGateway::close`].
#[async_trait]
pub trait StorageGateway: Send + Sync + std::fmt::Debug {
    /// Persists a message, stamping its creation time, and returns the generated id.
    ///
    /// # Errors
    /// Returns `StorageError` if the connection is unavailable or the write fails.
    async fn insert(&self, message: NewMessage) -> Result<Uuid, StorageError>;

    /// Returns every message addressed exactly to `recipient`, newest first.
    ///
    /// # Errors
    /// Returns `StorageError` if the connection is unavailable or the query fails.
    async fn query_by_recipient(&self, recipient: &str) -> Result<Vec<Message>, StorageError>;

    /// Whether the connection is currently established. Does not touch the store.
    fn is_connected(&self) -> bool;

    /// Releases the connection. Only the first call does any work.
    ///
    /// # Errors
    /// Returns `StorageError` if the release does not complete.
    async fn close(&self) -> Result<(), StorageError>;
}
