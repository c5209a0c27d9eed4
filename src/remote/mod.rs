//! Remote Source Layer
//!
//! Abstraction over the transport that owns the item set.
//! Implementations live outside this crate (GraphQL, REST, ...);
//! `InMemorySource` is the bundled reference backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::domain::{Item, ItemInput};

mod memory;

pub use memory::InMemorySource;

/// Remote operations, for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Fetch,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Fetch => "fetch",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by the remote source
///
/// `NotFound` means the local list is stale; callers trigger a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum RemoteError {
    #[error("{operation} failed: {cause}")]
    Remote { operation: Operation, cause: String },
    #[error("item {id:?} not found")]
    NotFound { id: String },
    #[error("{operation} timed out")]
    Timeout { operation: Operation },
}

/// Async CRUD over the full, unfiltered item set
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch every item of every type
    async fn fetch_items(&self) -> Result<Vec<Item>, RemoteError>;

    /// Create an item; the source assigns the id
    async fn create_item(&self, input: &ItemInput) -> Result<Item, RemoteError>;

    /// Replace the item stored under `id`
    async fn update_item(&self, id: &str, item: &Item) -> Result<Item, RemoteError>;

    /// Delete the item stored under `id`
    async fn delete_item(&self, id: &str) -> Result<(), RemoteError>;
}

/// Bound a remote call; elapsing maps to `RemoteError::Timeout`
pub(crate) async fn with_timeout<T>(
    limit: Duration,
    operation: Operation,
    fut: impl Future<Output = Result<T, RemoteError>>,
) -> Result<T, RemoteError> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(RemoteError::Timeout { operation }),
    }
}
