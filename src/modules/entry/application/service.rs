use crate::modules::entry::domain::{Entry, EntryRepository, EntryUpdate, NewEntry};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use crate::{log_debug, log_info};
use std::sync::Arc;
use uuid::Uuid;

/// Tag membership change on a single entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagChange {
    Add,
    Remove,
}

pub struct EntryService {
    entry_repo: Arc<dyn EntryRepository>,
}

impl EntryService {
    pub fn new(entry_repo: Arc<dyn EntryRepository>) -> Self {
        Self { entry_repo }
    }

    /// Create an entry owned by `list_id`.
    ///
    /// The repository links the entry into the list in the same storage
    /// operation; if the list is gone nothing is written and `NotFound` is
    /// returned.
    pub async fn create_entry(&self, data: NewEntry, list_id: &Uuid) -> AppResult<Entry> {
        Validator::validate_entry_name(&data.name)?;
        let tags = Validator::normalize_tags(&data.tags)?;

        let entry = Entry::new(*list_id, data.name.trim().to_string())
            .with_description(data.description)
            .with_completed(data.completed.unwrap_or(false))
            .with_tags(tags);

        let saved = self
            .entry_repo
            .insert(&entry)
            .await
            .map_err(|e| e.context(&format!("creating entry in list {}", list_id)))?;

        log_info!("Created entry {} in list {}", saved.id, list_id);
        Ok(saved)
    }

    pub async fn get_entry(&self, id: &Uuid) -> AppResult<Entry> {
        self.entry_repo
            .find_by_id(id)
            .await
            .map_err(|e| e.context(&format!("fetching entry {}", id)))?
            .ok_or_else(|| AppError::entry_not_found(id))
    }

    /// Merge the provided fields into the entry and refresh `updated_at`.
    pub async fn update_entry(&self, id: &Uuid, mut update: EntryUpdate) -> AppResult<Entry> {
        // Validate before touching storage
        if let Some(name) = update.name.as_ref() {
            Validator::validate_entry_name(name)?;
            update.name = Some(name.trim().to_string());
        }
        if let Some(tags) = update.tags.as_ref() {
            update.tags = Some(Validator::normalize_tags(tags)?);
        }

        let mut entry = self.get_entry(id).await?;
        entry.apply(update);

        let updated = self
            .entry_repo
            .update(&entry)
            .await
            .map_err(|e| e.context(&format!("updating entry {}", id)))?;

        log_debug!("Updated entry {} (completed: {})", id, updated.completed);
        Ok(updated)
    }

    pub async fn set_completed(&self, id: &Uuid, completed: bool) -> AppResult<Entry> {
        self.update_entry(id, EntryUpdate::completed(completed)).await
    }

    /// Remove the entry from its list and delete it.
    pub async fn delete_entry(&self, id: &Uuid) -> AppResult<Entry> {
        // Fail fast with a clean NotFound before the write
        self.get_entry(id).await?;

        let deleted = self
            .entry_repo
            .delete(id)
            .await
            .map_err(|e| e.context(&format!("deleting entry {}", id)))?;

        log_info!("Deleted entry {} from list {}", id, deleted.list_id);
        Ok(deleted)
    }

    /// Add or remove a tag on an entry that must belong to `list_id`.
    ///
    /// An entry of another list is reported as `NotFound`, the same as a
    /// missing one.
    pub async fn change_tag(
        &self,
        list_id: &Uuid,
        entry_id: &Uuid,
        tag: &str,
        change: TagChange,
    ) -> AppResult<Entry> {
        let tag = Validator::normalize_tag(tag)?;

        let mut entry = self
            .entry_repo
            .find_by_id(entry_id)
            .await
            .map_err(|e| e.context(&format!("fetching entry {}", entry_id)))?
            .filter(|entry| entry.belongs_to(list_id))
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Entry with ID {} not found in list {}",
                    entry_id, list_id
                ))
            })?;

        let changed = match change {
            TagChange::Add => entry.add_tag(tag),
            TagChange::Remove => entry.remove_tag(&tag),
        };

        if !changed {
            // Set semantics: nothing to write
            return Ok(entry);
        }

        self.entry_repo
            .update(&entry)
            .await
            .map_err(|e| e.context(&format!("changing tags of entry {}", entry_id)))
    }
}
