//! Edit Session
//!
//! State machine for the one-at-a-time item dialog: open a draft,
//! mutate fields, validate, then create or update through the remote
//! source. Validation errors never leave this layer as remote failures,
//! and a failed submit keeps the draft so no input is lost.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;

use crate::config::{CatalogConfig, Limits};
use crate::domain::{validate, FieldErrors, Item, ItemInput, ItemType, Rule};
use crate::remote::{with_timeout, Operation, RemoteError, RemoteSource};


/// Whether the open dialog creates a new item or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Closed,
    Open,
    Submitting,
}

/// Why a submit attempt did not persist
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("no edit session is open")]
    NotOpen,
    #[error("a submit is already in flight")]
    InFlight,
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Point-in-time view of the session, published to subscribers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub is_open: bool,
    pub mode: EditMode,
    pub draft: Item,
    pub errors: FieldErrors,
}

/// Dialog state for one list; holds the draft between open and submit
pub struct EditSession {
    remote: Arc<dyn RemoteSource>,
    list_type: ItemType,
    limits: Limits,
    request_timeout: Duration,
    state: State,
    mode: EditMode,
    editing: Option<Item>,
    draft: Item,
    errors: FieldErrors,
    last_remote_error: Option<RemoteError>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl EditSession {
    /// Starts closed with a blank draft for the list's type
    pub fn new(remote: Arc<dyn RemoteSource>, list_type: ItemType, config: CatalogConfig) -> Self {
        let draft = Item::blank(list_type);
        let (snapshot_tx, _) = watch::channel(SessionSnapshot {
            is_open: false,
            mode: EditMode::Create,
            draft: draft.clone(),
            errors: FieldErrors::default(),
        });
        Self {
            remote,
            list_type,
            limits: config.limits,
            request_timeout: config.request_timeout,
            state: State::Closed,
            mode: EditMode::Create,
            editing: None,
            draft,
            errors: FieldErrors::default(),
            last_remote_error: None,
            snapshot_tx,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state != State::Closed
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// The working copy under edit
    pub fn draft(&self) -> &Item {
        &self.draft
    }

    /// The untouched original, present in edit mode only
    pub fn editing_item(&self) -> Option<&Item> {
        self.editing.as_ref()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Error from the most recent failed submit, for rendering
    pub fn last_remote_error(&self) -> Option<&RemoteError> {
        self.last_remote_error.as_ref()
    }

    /// Current snapshot plus change notification
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Open in create mode with a blank draft, type preset, errors cleared
    pub fn open_create(&mut self) {
        self.mode = EditMode::Create;
        self.editing = None;
        self.draft = Item::blank(self.list_type);
        self.errors = FieldErrors::default();
        self.last_remote_error = None;
        self.state = State::Open;
        self.publish();
    }

    /// Open in edit mode with a copy of `item` as the draft
    pub fn open_edit(&mut self, item: &Item) {
        self.mode = EditMode::Edit;
        self.editing = Some(item.clone());
        self.draft = item.clone();
        self.errors = FieldErrors::default();
        self.last_remote_error = None;
        self.state = State::Open;
        self.publish();
    }

    /// Field setters take effect only while the session is open; fresh
    /// input clears the field's stale error.
    pub fn set_title(&mut self, value: &str) {
        if self.state != State::Open {
            return;
        }
        self.draft.title = value.to_string();
        self.errors.title = None;
        self.publish();
    }

    pub fn set_description(&mut self, value: &str) {
        if self.state != State::Open {
            return;
        }
        self.draft.description = value.to_string();
        self.errors.description = None;
        self.publish();
    }

    pub fn set_author(&mut self, value: &str) {
        if self.state != State::Open {
            return;
        }
        self.draft.author = if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        };
        self.publish();
    }

    /// Append a tag to the draft
    ///
    /// Empty and duplicate values are rejected and surfaced as a tags
    /// error rather than ignored; a successful add clears that error.
    pub fn add_tag(&mut self, value: &str) {
        if self.state != State::Open {
            return;
        }
        let tag = value.trim();
        if tag.is_empty() {
            self.errors.tags = Some(Rule::Invalid { tag: String::new() });
        } else if self.draft.tags.iter().any(|existing| existing == tag) {
            self.errors.tags = Some(Rule::Duplicate {
                tag: tag.to_string(),
            });
        } else {
            self.draft.tags.push(tag.to_string());
            self.errors.tags = None;
        }
        self.publish();
    }

    /// Remove the tag at `index`; out of range is a no-op
    pub fn remove_tag(&mut self, index: usize) {
        if self.state != State::Open || index >= self.draft.tags.len() {
            return;
        }
        self.draft.tags.remove(index);
        self.errors.tags = None;
        self.publish();
    }

    /// Run the field rules over the draft and store the outcome
    pub fn validate(&mut self) -> FieldErrors {
        self.errors = validate(&self.draft, &self.limits);
        self.publish();
        self.errors.clone()
    }

    /// Validate, then create or update through the remote source
    ///
    /// A validation failure leaves the session open with errors visible
    /// and makes no network call. A remote failure leaves the session
    /// open with the draft intact. Success closes the session; the
    /// caller re-syncs its list with the returned item's type.
    pub async fn submit(&mut self) -> Result<Item, SubmitError> {
        match self.state {
            State::Closed => return Err(SubmitError::NotOpen),
            State::Submitting => return Err(SubmitError::InFlight),
            State::Open => {}
        }
        let errors = self.validate();
        if !errors.is_clear() {
            return Err(SubmitError::Validation(errors));
        }

        self.state = State::Submitting;
        self.publish();

        let result = match self.mode {
            EditMode::Edit => {
                with_timeout(
                    self.request_timeout,
                    Operation::Update,
                    self.remote.update_item(&self.draft.id, &self.draft),
                )
                .await
            }
            EditMode::Create => {
                let input = ItemInput::from(&self.draft);
                with_timeout(
                    self.request_timeout,
                    Operation::Create,
                    self.remote.create_item(&input),
                )
                .await
            }
        };

        match result {
            Ok(item) => {
                debug!("persisted {} item {:?}", item.item_type, item.id);
                self.reset();
                Ok(item)
            }
            Err(err) => {
                warn!("submit failed, keeping draft: {err}");
                self.state = State::Open;
                self.last_remote_error = Some(err.clone());
                self.publish();
                Err(SubmitError::Remote(err))
            }
        }
    }

    /// Discard the draft and close; idempotent, never a network call
    ///
    /// A cancel cannot overlap an in-flight submit: `submit` holds the
    /// session exclusively, so callers sharing it behind a lock block
    /// here until the submit resolves.
    pub fn cancel(&mut self) {
        if self.state == State::Closed {
            return;
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.mode = EditMode::Create;
        self.editing = None;
        self.draft = Item::blank(self.list_type);
        self.errors = FieldErrors::default();
        self.last_remote_error = None;
        self.state = State::Closed;
        self.publish();
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(SessionSnapshot {
            is_open: self.is_open(),
            mode: self.mode,
            draft: self.draft.clone(),
            errors: self.errors.clone(),
        });
    }
}
