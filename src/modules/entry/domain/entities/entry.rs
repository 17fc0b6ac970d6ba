use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::serde_helpers::double_option;
use crate::shared::utils::clock;

/// An item of a list.
///
/// `list_id` is the back-link to the owning list and is serialized as
/// `list`, matching the persisted document shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "list")]
    pub list_id: Uuid,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Input for creating an entry. `task` is accepted for `name`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    #[serde(default, alias = "task")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryUpdate {
    #[serde(default, alias = "task")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl EntryUpdate {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }
}

impl Entry {
    pub fn new(list_id: Uuid, name: String) -> Self {
        let now = clock::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description: None,
            completed: false,
            created_at: now,
            updated_at: now,
            list_id,
            tags: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn belongs_to(&self, list_id: &Uuid) -> bool {
        &self.list_id == list_id
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Apply an already-validated update and refresh `updated_at`.
    pub fn apply(&mut self, update: EntryUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        self.touch();
    }

    /// Returns false when the tag was already present.
    pub fn add_tag(&mut self, tag: String) -> bool {
        if self.has_tag(&tag) {
            return false;
        }
        self.tags.push(tag);
        self.touch();
        true
    }

    /// Returns false when the tag was not present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let original_len = self.tags.len();
        self.tags.retain(|t| t != tag);

        if self.tags.len() < original_len {
            self.touch();
            true
        } else {
            false
        }
    }

    fn touch(&mut self) {
        self.updated_at = clock::advance(self.updated_at);
    }
}
