//! Catalog Core
//!
//! Layered architecture:
//! - domain: Core entities and validation rules
//! - remote: Data source abstraction (transport lives outside this crate)
//! - sync: Type-filtered list synchronization
//! - session: Edit dialog state machine
//! - controller: Facade wiring one session to one list

pub mod config;
pub mod controller;
pub mod domain;
pub mod remote;
pub mod session;
pub mod sync;

pub use config::{CatalogConfig, Limits};
pub use controller::ListController;
pub use domain::{validate, Field, FieldErrors, Item, ItemInput, ItemType, Rule, ValidationError};
pub use remote::{InMemorySource, Operation, RemoteError, RemoteSource};
pub use session::{EditMode, EditSession, SessionSnapshot, SubmitError};
pub use sync::{derive, truncate_description, Synchronizer};
