//! In-Memory Source
//!
//! Reference implementation of `RemoteSource` backed by a Vec.
//! Used by tests and demos the way a real deployment uses a transport.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::Mutex;

use super::{RemoteError, RemoteSource};
use crate::domain::{Item, ItemInput};

/// Vec-backed item set with counter-assigned ids
pub struct InMemorySource {
    items: Mutex<Vec<Item>>,
    next_id: AtomicU32,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            next_id: AtomicU32::new(1),
        }
    }

    /// Start with existing items; seeded ids are the caller's to keep unique
    pub fn seeded(items: Vec<Item>) -> Self {
        Self {
            items: Mutex::new(items),
            next_id: AtomicU32::new(1),
        }
    }
}

impl Default for InMemorySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteSource for InMemorySource {
    async fn fetch_items(&self) -> Result<Vec<Item>, RemoteError> {
        Ok(self.items.lock().await.clone())
    }

    async fn create_item(&self, input: &ItemInput) -> Result<Item, RemoteError> {
        let id = format!("item-{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        let item = Item {
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            tags: input.tags.clone(),
            item_type: input.item_type,
            author: input.author.clone(),
        };
        self.items.lock().await.push(item.clone());
        Ok(item)
    }

    async fn update_item(&self, id: &str, item: &Item) -> Result<Item, RemoteError> {
        let mut items = self.items.lock().await;
        match items.iter_mut().find(|stored| stored.id == id) {
            Some(stored) => {
                *stored = Item {
                    id: id.to_string(),
                    ..item.clone()
                };
                Ok(stored.clone())
            }
            None => Err(RemoteError::NotFound { id: id.to_string() }),
        }
    }

    async fn delete_item(&self, id: &str) -> Result<(), RemoteError> {
        let mut items = self.items.lock().await;
        let before = items.len();
        items.retain(|stored| stored.id != id);
        if items.len() == before {
            return Err(RemoteError::NotFound { id: id.to_string() });
        }
        Ok(())
    }
}
