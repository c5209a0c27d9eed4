//! List Synchronization
//!
//! Keeps one type-filtered list in step with the remote item set.
//! No optimistic patching: every mutation is followed by a re-fetch,
//! and the snapshot is replaced wholesale so readers never see a
//! half-updated list.

use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::config::CatalogConfig;
use crate::domain::{Item, ItemType};
use crate::remote::{with_timeout, Operation, RemoteError, RemoteSource};

#[cfg(test)]
mod tests;

/// Pure filter: the subset of `all` with the given type, source order kept
pub fn derive(all: &[Item], item_type: ItemType) -> Vec<Item> {
    all.iter()
        .filter(|item| item.item_type == item_type)
        .cloned()
        .collect()
}

/// Shorten a description for card display
///
/// Returns the text unchanged when its char count is at or under `max`,
/// otherwise the first `max` chars followed by an ellipsis.
pub fn truncate_description(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max).collect();
    truncated.push_str("...");
    truncated
}

/// Owns the current list of one item type, derived from the remote set
pub struct Synchronizer {
    remote: Arc<dyn RemoteSource>,
    item_type: ItemType,
    request_timeout: Duration,
    items_tx: watch::Sender<Vec<Item>>,
}

impl Synchronizer {
    /// Starts with an empty list; call `refresh` to populate it
    pub fn new(remote: Arc<dyn RemoteSource>, item_type: ItemType, config: &CatalogConfig) -> Self {
        let (items_tx, _) = watch::channel(Vec::new());
        Self {
            remote,
            item_type,
            request_timeout: config.request_timeout,
            items_tx,
        }
    }

    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    /// Current snapshot of the derived list
    pub fn items(&self) -> Vec<Item> {
        self.items_tx.borrow().clone()
    }

    /// Current value plus change notification; redraw timing is the
    /// subscriber's business
    pub fn subscribe(&self) -> watch::Receiver<Vec<Item>> {
        self.items_tx.subscribe()
    }

    /// Re-fetch the full item set and replace the derived snapshot
    ///
    /// On fetch failure the previous snapshot stays visible.
    pub async fn refresh(&self) -> Result<(), RemoteError> {
        let all = with_timeout(
            self.request_timeout,
            Operation::Fetch,
            self.remote.fetch_items(),
        )
        .await?;
        let derived = derive(&all, self.item_type);
        debug!(
            "refreshed {} list: {} of {} items",
            self.item_type,
            derived.len(),
            all.len()
        );
        self.items_tx.send_replace(derived);
        Ok(())
    }

    /// Delete an item and re-sync the list
    ///
    /// No optimistic removal: the item stays visible until the refresh
    /// lands. `NotFound` means the list was already stale, so it is
    /// refreshed before the error is returned.
    pub async fn remove(&self, id: &str) -> Result<(), RemoteError> {
        let deleted = with_timeout(
            self.request_timeout,
            Operation::Delete,
            self.remote.delete_item(id),
        )
        .await;
        match deleted {
            Ok(()) => self.refresh().await,
            Err(err @ RemoteError::NotFound { .. }) => {
                warn!("delete of {id:?} hit a stale list: {err}");
                if let Err(refresh_err) = self.refresh().await {
                    warn!("refresh after stale delete failed: {refresh_err}");
                }
                Err(err)
            }
            Err(err) => Err(err),
        }
    }
}
