//! List Controller
//!
//! Facade over one synchronizer and one edit session, exposing the
//! surface a list view renders against. Wires successful submits back
//! into a list refresh so the visible items always reflect the server.

use log::warn;
use std::sync::Arc;
use tokio::sync::watch;

use crate::config::CatalogConfig;
use crate::domain::{FieldErrors, Item, ItemType};
use crate::remote::{RemoteError, RemoteSource};
use crate::session::{EditSession, SessionSnapshot, SubmitError};
use crate::sync::Synchronizer;

/// One item type's list plus its editing dialog
pub struct ListController {
    synchronizer: Synchronizer,
    session: EditSession,
}

impl ListController {
    pub fn new(remote: Arc<dyn RemoteSource>, item_type: ItemType, config: CatalogConfig) -> Self {
        Self {
            synchronizer: Synchronizer::new(remote.clone(), item_type, &config),
            session: EditSession::new(remote, item_type, config),
        }
    }

    pub fn item_type(&self) -> ItemType {
        self.synchronizer.item_type()
    }

    /// Currently visible items of this list's type
    pub fn items(&self) -> Vec<Item> {
        self.synchronizer.items()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Item>> {
        self.synchronizer.subscribe()
    }

    pub fn subscribe_session(&self) -> watch::Receiver<SessionSnapshot> {
        self.session.subscribe()
    }

    pub async fn refresh(&self) -> Result<(), RemoteError> {
        self.synchronizer.refresh().await
    }

    /// Delete an item; the list re-syncs on success or on a stale hit
    pub async fn remove(&self, id: &str) -> Result<(), RemoteError> {
        self.synchronizer.remove(id).await
    }

    pub fn open_create(&mut self) {
        self.session.open_create();
    }

    pub fn open_edit(&mut self, item: &Item) {
        self.session.open_edit(item);
    }

    pub fn set_title(&mut self, value: &str) {
        self.session.set_title(value);
    }

    pub fn set_description(&mut self, value: &str) {
        self.session.set_description(value);
    }

    pub fn set_author(&mut self, value: &str) {
        self.session.set_author(value);
    }

    pub fn add_tag(&mut self, value: &str) {
        self.session.add_tag(value);
    }

    pub fn remove_tag(&mut self, index: usize) {
        self.session.remove_tag(index);
    }

    pub fn draft(&self) -> &Item {
        self.session.draft()
    }

    pub fn errors(&self) -> &FieldErrors {
        self.session.errors()
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn cancel(&mut self) {
        self.session.cancel();
    }

    /// Submit the open draft, then re-sync the list
    ///
    /// A refresh failure after a successful mutation is logged, not
    /// returned; the mutation stood and a later refresh will catch up.
    /// A stale update (`NotFound`) also triggers a refresh before the
    /// error is handed back.
    pub async fn submit(&mut self) -> Result<Item, SubmitError> {
        match self.session.submit().await {
            Ok(item) => {
                if let Err(err) = self.synchronizer.refresh().await {
                    warn!("list refresh after submit failed: {err}");
                }
                Ok(item)
            }
            Err(SubmitError::Remote(err @ RemoteError::NotFound { .. })) => {
                if let Err(refresh_err) = self.synchronizer.refresh().await {
                    warn!("refresh after stale update failed: {refresh_err}");
                }
                Err(SubmitError::Remote(err))
            }
            Err(err) => Err(err),
        }
    }
}
