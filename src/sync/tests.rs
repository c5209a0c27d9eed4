//! Synchronizer Tests
//!
//! Derivation, truncation, and refresh-after-mutation against the
//! in-memory source.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::{derive, truncate_description, Synchronizer};
use crate::config::CatalogConfig;
use crate::domain::{Item, ItemInput, ItemType};
use crate::remote::{InMemorySource, Operation, RemoteError, RemoteSource};

fn item(id: &str, title: &str, item_type: ItemType) -> Item {
    Item {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        tags: Vec::new(),
        item_type,
        author: None,
    }
}

fn mixed_items() -> Vec<Item> {
    vec![
        item("b1", "Dune", ItemType::Books),
        item("m1", "Alien", ItemType::Movies),
        item("b2", "Solaris", ItemType::Books),
        item("s1", "Kind of Blue", ItemType::Music),
        item("b3", "Neuromancer", ItemType::Books),
    ]
}

#[test]
fn derive_keeps_only_the_requested_type_in_source_order() {
    let books = derive(&mixed_items(), ItemType::Books);
    let ids: Vec<&str> = books.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["b1", "b2", "b3"]);
}

#[test]
fn derive_of_absent_type_is_empty() {
    let movies = derive(&[item("b1", "Dune", ItemType::Books)], ItemType::Movies);
    assert!(movies.is_empty());
}

#[test]
fn truncate_cuts_over_long_text() {
    assert_eq!(truncate_description("hello world", 5), "hello...");
}

#[test]
fn truncate_leaves_short_text_alone() {
    assert_eq!(truncate_description("hi", 5), "hi");
}

#[test]
fn truncate_at_the_bound_is_unchanged() {
    assert_eq!(truncate_description("hello", 5), "hello");
}

#[test]
fn truncate_counts_chars_not_bytes() {
    assert_eq!(truncate_description("éééééé", 3), "ééé...");
}

#[tokio::test]
async fn refresh_populates_the_derived_list() {
    let remote = Arc::new(InMemorySource::seeded(mixed_items()));
    let sync = Synchronizer::new(remote, ItemType::Books, &CatalogConfig::default());

    assert!(sync.items().is_empty());
    sync.refresh().await.expect("refresh");

    let ids: Vec<String> = sync.items().iter().map(|i| i.id.clone()).collect();
    assert_eq!(ids, ["b1", "b2", "b3"]);
}

#[tokio::test]
async fn subscribers_see_each_replacement() {
    let remote = Arc::new(InMemorySource::seeded(mixed_items()));
    let sync = Synchronizer::new(remote, ItemType::Books, &CatalogConfig::default());
    let mut rx = sync.subscribe();

    sync.refresh().await.expect("refresh");
    assert!(rx.has_changed().expect("channel open"));
    assert_eq!(rx.borrow_and_update().len(), 3);
}

#[tokio::test]
async fn remove_deletes_and_resyncs() {
    let remote = Arc::new(InMemorySource::seeded(mixed_items()));
    let sync = Synchronizer::new(remote, ItemType::Books, &CatalogConfig::default());
    sync.refresh().await.expect("refresh");

    sync.remove("b2").await.expect("remove");

    let ids: Vec<String> = sync.items().iter().map(|i| i.id.clone()).collect();
    assert_eq!(ids, ["b1", "b3"]);
}

#[tokio::test]
async fn remove_of_missing_item_surfaces_not_found_and_still_refreshes() {
    let remote = Arc::new(InMemorySource::seeded(mixed_items()));
    let sync = Synchronizer::new(remote, ItemType::Books, &CatalogConfig::default());

    // List never refreshed yet; the failed delete must refresh it anyway.
    let err = sync.remove("ghost").await.unwrap_err();
    assert_eq!(
        err,
        RemoteError::NotFound {
            id: "ghost".to_string()
        }
    );
    assert_eq!(sync.items().len(), 3);
}

struct FlakySource {
    inner: InMemorySource,
    failing: AtomicBool,
}

#[async_trait]
impl RemoteSource for FlakySource {
    async fn fetch_items(&self) -> Result<Vec<Item>, RemoteError> {
        if self.failing.load(Ordering::Relaxed) {
            return Err(RemoteError::Remote {
                operation: Operation::Fetch,
                cause: "connection reset".to_string(),
            });
        }
        self.inner.fetch_items().await
    }

    async fn create_item(&self, input: &ItemInput) -> Result<Item, RemoteError> {
        self.inner.create_item(input).await
    }

    async fn update_item(&self, id: &str, item: &Item) -> Result<Item, RemoteError> {
        self.inner.update_item(id, item).await
    }

    async fn delete_item(&self, id: &str) -> Result<(), RemoteError> {
        self.inner.delete_item(id).await
    }
}

#[tokio::test]
async fn failed_refresh_keeps_the_previous_snapshot() {
    let remote = Arc::new(FlakySource {
        inner: InMemorySource::seeded(mixed_items()),
        failing: AtomicBool::new(false),
    });
    let sync = Synchronizer::new(remote.clone(), ItemType::Books, &CatalogConfig::default());
    sync.refresh().await.expect("refresh");
    assert_eq!(sync.items().len(), 3);

    remote.failing.store(true, Ordering::Relaxed);
    assert!(sync.refresh().await.is_err());
    assert_eq!(sync.items().len(), 3);
}

struct ReadOnlySource {
    inner: InMemorySource,
}

#[async_trait]
impl RemoteSource for ReadOnlySource {
    async fn fetch_items(&self) -> Result<Vec<Item>, RemoteError> {
        self.inner.fetch_items().await
    }

    async fn create_item(&self, input: &ItemInput) -> Result<Item, RemoteError> {
        self.inner.create_item(input).await
    }

    async fn update_item(&self, id: &str, item: &Item) -> Result<Item, RemoteError> {
        self.inner.update_item(id, item).await
    }

    async fn delete_item(&self, _id: &str) -> Result<(), RemoteError> {
        Err(RemoteError::Remote {
            operation: Operation::Delete,
            cause: "forbidden".to_string(),
        })
    }
}

#[tokio::test]
async fn failed_delete_leaves_the_list_untouched() {
    let remote = Arc::new(ReadOnlySource {
        inner: InMemorySource::seeded(mixed_items()),
    });
    let sync = Synchronizer::new(remote, ItemType::Books, &CatalogConfig::default());
    sync.refresh().await.expect("refresh");
    // A receiver subscribed now has already seen the current list.
    let rx = sync.subscribe();

    let err = sync.remove("b1").await.unwrap_err();
    assert!(matches!(err, RemoteError::Remote { .. }));
    assert!(!rx.has_changed().expect("channel open"));
    assert_eq!(sync.items().len(), 3);
}

struct StalledSource;

#[async_trait]
impl RemoteSource for StalledSource {
    async fn fetch_items(&self) -> Result<Vec<Item>, RemoteError> {
        std::future::pending().await
    }

    async fn create_item(&self, _input: &ItemInput) -> Result<Item, RemoteError> {
        std::future::pending().await
    }

    async fn update_item(&self, _id: &str, _item: &Item) -> Result<Item, RemoteError> {
        std::future::pending().await
    }

    async fn delete_item(&self, _id: &str) -> Result<(), RemoteError> {
        std::future::pending().await
    }
}

#[tokio::test(start_paused = true)]
async fn stalled_fetch_times_out() {
    let sync = Synchronizer::new(
        Arc::new(StalledSource),
        ItemType::Books,
        &CatalogConfig::default(),
    );
    let err = sync.refresh().await.unwrap_err();
    assert_eq!(
        err,
        RemoteError::Timeout {
            operation: Operation::Fetch
        }
    );
}
