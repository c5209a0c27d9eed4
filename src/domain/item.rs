//! Item Entity
//!
//! A catalog entry with a type discriminant and the shared fields
//! (title, description, tags) every list renders.

use serde::{Deserialize, Serialize};

/// Item type determines which list an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ItemType {
    #[default]
    Books,
    Movies,
    Music,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Books => "Books",
            ItemType::Movies => "Movies",
            ItemType::Music => "Music",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Movies" => ItemType::Movies,
            "Music" => ItemType::Music,
            _ => ItemType::Books,
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog item
///
/// `id` is assigned by the remote source; the empty string means
/// "not yet created". The type never changes once the item is persisted
/// into a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Type-specific attribute, meaningful for `Books` only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Item {
    /// Blank create-mode template with the type preset
    pub fn blank(item_type: ItemType) -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            description: String::new(),
            tags: Vec::new(),
            item_type,
            author: None,
        }
    }
}

/// Create payload: an item minus its id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInput {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl From<&Item> for ItemInput {
    fn from(item: &Item) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            tags: item.tags.clone(),
            item_type: item.item_type,
            author: item.author.clone(),
        }
    }
}
