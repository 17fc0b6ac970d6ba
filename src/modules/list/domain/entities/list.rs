use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::entry::domain::Entry;
use crate::shared::serde_helpers::double_option;
use crate::shared::utils::clock;

/// A named list owning an ordered set of entries.
///
/// `entry_ids` holds references only, newest first, and is serialized as
/// `entries`. Entry content lives with the entry records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "entries", default)]
    pub entry_ids: Vec<Uuid>,
    #[serde(default)]
    pub collection_id: Option<Uuid>,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub last_reset: Option<DateTime<Utc>>,
}

impl List {
    pub fn new(name: String) -> Self {
        let now = clock::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description: None,
            entry_ids: Vec::new(),
            collection_id: None,
            is_pinned: false,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
            last_reset: None,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn contains_entry(&self, entry_id: &Uuid) -> bool {
        self.entry_ids.contains(entry_id)
    }

    /// Apply an already-validated update. Absent fields stay as they are.
    pub fn apply(&mut self, update: ListUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(pinned) = update.is_pinned {
            self.is_pinned = pinned;
        }
        self.touch();
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        self.is_pinned = pinned;
        self.touch();
    }

    pub fn move_to(&mut self, collection_id: Option<Uuid>) {
        self.collection_id = collection_id;
        self.touch();
    }

    /// Returns false when the tag was already on the list.
    pub fn add_tag(&mut self, tag: String) -> bool {
        if self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        self.touch();
        true
    }

    pub fn mark_reset(&mut self, at: DateTime<Utc>) {
        self.last_reset = Some(at);
        self.updated_at = at.max(clock::advance(self.updated_at));
    }

    /// Link a new entry at the front
    pub fn link_entry(&mut self, entry_id: Uuid) {
        if !self.contains_entry(&entry_id) {
            self.entry_ids.insert(0, entry_id);
        }
        self.touch();
    }

    /// Returns false when the entry was not referenced.
    pub fn unlink_entry(&mut self, entry_id: &Uuid) -> bool {
        let original_len = self.entry_ids.len();
        self.entry_ids.retain(|id| id != entry_id);
        let removed = self.entry_ids.len() < original_len;
        if removed {
            self.touch();
        }
        removed
    }

    fn touch(&mut self) {
        self.updated_at = clock::advance(self.updated_at);
    }
}

/// A list with its entries resolved, in list order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDetail {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub entries: Vec<Entry>,
    pub collection_id: Option<Uuid>,
    pub is_pinned: bool,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_reset: Option<DateTime<Utc>>,
}

impl ListDetail {
    pub fn new(list: List, entries: Vec<Entry>) -> Self {
        Self {
            id: list.id,
            name: list.name,
            description: list.description,
            entries,
            collection_id: list.collection_id,
            is_pinned: list.is_pinned,
            tags: list.tags,
            created_at: list.created_at,
            updated_at: list.updated_at,
            last_reset: list.last_reset,
        }
    }

    pub fn entry_ids(&self) -> Vec<Uuid> {
        self.entries.iter().map(|entry| entry.id).collect()
    }
}

/// Input for creating a list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewList {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial list update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub is_pinned: Option<bool>,
}

impl ListUpdate {
    pub fn renamed(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}
