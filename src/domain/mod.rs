//! Domain Layer
//!
//! Catalog entities and the validation rules that guard them.
//! No async and no IO in this layer.

mod item;
mod validation;

pub use item::{Item, ItemInput, ItemType};
pub use validation::{validate, Field, FieldErrors, Rule, ValidationError};
