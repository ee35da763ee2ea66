//! Volatile storage gateway kept in process memory.
//!
//! Backs `--storage memory` for local runs and drives the HTTP tests without a database.

use crate::adapters::{StorageError, StorageGateway};
use crate::domain::message::{Message, NewMessage};
use async_trait::async_trait;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::atomic::{AtomicBool, Ordering};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug)]
pub struct InMemoryGateway {
    /// Append-only; index order is insertion order.
    messages: RwLock<Vec<Message>>,
    connected: AtomicBool,
}

impl InMemoryGateway {
    /// Creates an empty gateway that reports itself as connected.
    #[must_use]
    pub fn new() -> Self {
        Self { messages: RwLock::new(Vec::new()), connected: AtomicBool::new(true) }
    }

    /// Creates an empty gateway that has not been connected yet.
    #[must_use]
    pub fn disconnected() -> Self {
        Self { messages: RwLock::new(Vec::new()), connected: AtomicBool::new(false) }
    }

    /// Marks the gateway as connected.
    pub fn connect(&self) {
        self.connected.store(true, Ordering::SeqCst);
    }

    /// Total number of stored messages across all recipients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_connected(&self) -> Result<(), StorageError> {
        if self.is_connected() { Ok(()) } else { Err(StorageError::Disconnected) }
    }

    // Writers only ever push a complete message, so a panic elsewhere cannot leave the list half-written.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Message>> {
        self.messages.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Message>> {
        self.messages.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts with an explicit timestamp.
    ///
    /// # Errors
    /// Returns `StorageError::Disconnected` if the gateway is not connected.
    pub fn insert_at(&self, message: NewMessage, created_at: OffsetDateTime) -> Result<Uuid, StorageError> {
        self.ensure_connected()?;
        let id = Uuid::new_v4();
        self.write().push(message.into_message(id, created_at));
        Ok(id)
    }
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageGateway for InMemoryGateway {
    async fn insert(&self, message: NewMessage) -> Result<Uuid, StorageError> {
        self.insert_at(message, OffsetDateTime::now_utc())
    }

    async fn query_by_recipient(&self, recipient: &str) -> Result<Vec<Message>, StorageError> {
        self.ensure_connected()?;
        let messages = self.read();

        // Walking backwards puts later inserts first, which the stable sort keeps for equal timestamps.
        let mut matching: Vec<Message> = messages.iter().rev().filter(|m| m.recipient == recipient).cloned().collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn close(&self) -> Result<(), StorageError> {
        if self.connected.swap(false, Ordering::SeqCst) {
            tracing::info!("In-memory storage closed");
        }
        Ok(())
    }
}
