//! Validation Rules
//!
//! Pure checks run over a draft before any mutation is issued.
//! Lengths are counted in chars; title and description are measured
//! after trimming, tags are stored and measured exactly as entered.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::item::Item;
use crate::config::Limits;

/// Fields covered by validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Description,
    Tags,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Tags => "tags",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a field failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    #[error("required")]
    Required,
    #[error("too long (max {max} chars, got {actual})")]
    TooLong { max: usize, actual: usize },
    #[error("too many tags (max {max}, got {actual})")]
    TooMany { max: usize, actual: usize },
    #[error("invalid tag {tag:?}")]
    Invalid { tag: String },
    #[error("duplicate tag {tag:?}")]
    Duplicate { tag: String },
}

/// A field paired with the rule it broke; renders the user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{field}: {rule}")]
pub struct ValidationError {
    pub field: Field,
    pub rule: Rule,
}

/// One error slot per field; `None` means the field is clean
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    pub title: Option<Rule>,
    pub description: Option<Rule>,
    pub tags: Option<Rule>,
}

impl FieldErrors {
    /// True when every field is clean; submission requires this
    pub fn is_clear(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.tags.is_none()
    }

    pub fn get(&self, field: Field) -> Option<&Rule> {
        match field {
            Field::Title => self.title.as_ref(),
            Field::Description => self.description.as_ref(),
            Field::Tags => self.tags.as_ref(),
        }
    }

    /// Rendered message for a field; empty string when the field is clean
    pub fn message(&self, field: Field) -> String {
        match self.get(field) {
            Some(rule) => ValidationError {
                field,
                rule: rule.clone(),
            }
            .to_string(),
            None => String::new(),
        }
    }
}

/// Validate a draft against the configured bounds
///
/// Pure function of the draft. The first broken rule per field wins.
pub fn validate(draft: &Item, limits: &Limits) -> FieldErrors {
    let mut errors = FieldErrors::default();

    let title = draft.title.trim();
    let title_len = title.chars().count();
    if title.is_empty() {
        errors.title = Some(Rule::Required);
    } else if title_len > limits.title_max {
        errors.title = Some(Rule::TooLong {
            max: limits.title_max,
            actual: title_len,
        });
    }

    let description_len = draft.description.trim().chars().count();
    if description_len > limits.description_max {
        errors.description = Some(Rule::TooLong {
            max: limits.description_max,
            actual: description_len,
        });
    }

    if draft.tags.len() > limits.max_tags {
        errors.tags = Some(Rule::TooMany {
            max: limits.max_tags,
            actual: draft.tags.len(),
        });
    } else {
        for (i, tag) in draft.tags.iter().enumerate() {
            if tag.is_empty() || tag.chars().count() > limits.tag_max {
                errors.tags = Some(Rule::Invalid { tag: tag.clone() });
                break;
            }
            if draft.tags[..i].contains(tag) {
                errors.tags = Some(Rule::Duplicate { tag: tag.clone() });
                break;
            }
        }
    }

    errors
}
