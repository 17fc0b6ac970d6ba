use crate::modules::entry::application::{EntryService, TagChange};
use crate::modules::entry::domain::{Entry, EntryRepository, NewEntry};
use crate::modules::list::domain::services::{collect_tags, filter_entries, pick_random};
use crate::modules::list::domain::{EntryFilter, List, ListDetail, ListRepository, ListUpdate, NewList};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::clock;
use crate::shared::utils::logger::LogContext;
use crate::shared::utils::Validator;
use crate::{log_debug, log_error, log_info, log_warn};
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Outcome of a list reset
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetSummary {
    pub list: ListDetail,
    pub reset_count: usize,
}

pub struct ListService {
    list_repo: Arc<dyn ListRepository>,
    entry_repo: Arc<dyn EntryRepository>,
    entry_service: Arc<EntryService>,
}

impl ListService {
    pub fn new(
        list_repo: Arc<dyn ListRepository>,
        entry_repo: Arc<dyn EntryRepository>,
        entry_service: Arc<EntryService>,
    ) -> Self {
        Self {
            list_repo,
            entry_repo,
            entry_service,
        }
    }

    pub async fn create_list(&self, data: NewList) -> AppResult<List> {
        Validator::validate_list_name(&data.name)?;

        let list = List::new(data.name.trim().to_string()).with_description(data.description);
        let saved = self
            .list_repo
            .insert(&list)
            .await
            .map_err(|e| e.context("creating list"))?;

        log_info!("Created list {} ({})", saved.id, saved.name);
        Ok(saved)
    }

    pub async fn get_list(&self, id: &Uuid) -> AppResult<ListDetail> {
        let list = self.require_list(id).await?;
        let entries = self
            .entry_repo
            .find_by_list(id)
            .await
            .map_err(|e| e.context(&format!("loading entries of list {}", id)))?;

        let resolved = resolve_entries(&list, entries);
        Ok(ListDetail::new(list, resolved))
    }

    /// Every list with entries resolved, most recently updated first
    pub async fn get_all_lists(&self) -> AppResult<Vec<ListDetail>> {
        let lists = self
            .list_repo
            .get_all()
            .await
            .map_err(|e| e.context("loading lists"))?;

        let ids: Vec<Uuid> = lists.iter().map(|list| list.id).collect();
        let entries = self
            .entry_repo
            .find_by_lists(&ids)
            .await
            .map_err(|e| e.context("loading entries of all lists"))?;

        let mut by_list: HashMap<Uuid, Vec<Entry>> = HashMap::new();
        for entry in entries {
            by_list.entry(entry.list_id).or_default().push(entry);
        }

        Ok(lists
            .into_iter()
            .map(|list| {
                let entries = by_list.remove(&list.id).unwrap_or_default();
                let resolved = resolve_entries(&list, entries);
                ListDetail::new(list, resolved)
            })
            .collect())
    }

    /// Home screen ordering: pinned lists first, then most recently updated
    pub async fn get_home_lists(&self) -> AppResult<Vec<ListDetail>> {
        let mut lists = self.get_all_lists().await?;
        // Stable sort keeps updated_at order within each group
        lists.sort_by_key(|list| !list.is_pinned);
        Ok(lists)
    }

    pub async fn update_list(&self, id: &Uuid, mut update: ListUpdate) -> AppResult<List> {
        if let Some(name) = update.name.as_ref() {
            Validator::validate_list_name(name)?;
            update.name = Some(name.trim().to_string());
        }

        let mut list = self.require_list(id).await?;
        list.apply(update);
        self.save(&list, "updating").await
    }

    /// Reassign (or clear) the parent collection
    pub async fn move_list(&self, id: &Uuid, collection_id: Option<Uuid>) -> AppResult<List> {
        let mut list = self.require_list(id).await?;
        list.move_to(collection_id);
        let moved = self.save(&list, "moving").await?;

        log_debug!("Moved list {} to collection {:?}", id, collection_id);
        Ok(moved)
    }

    /// Set the pin flag. Pinning a list unpins every other pinned list first.
    pub async fn pin_list(&self, id: &Uuid, pinned: bool) -> AppResult<List> {
        let mut list = self.require_list(id).await?;

        let mut unpinned = 0;
        if pinned {
            let others = self
                .list_repo
                .find_pinned()
                .await
                .map_err(|e| e.context("loading pinned lists"))?;

            for mut other in others.into_iter().filter(|other| other.id != *id) {
                other.set_pinned(false);
                self.save(&other, "unpinning").await?;
                unpinned += 1;
            }
        }

        list.set_pinned(pinned);
        match self.list_repo.update(&list).await {
            Ok(saved) => {
                log_info!("List {} pinned: {} ({} unpinned)", id, pinned, unpinned);
                Ok(saved)
            }
            Err(e) if unpinned > 0 => {
                log_error!("Pinning list {} failed after unpinning others: {}", id, e);
                Err(AppError::Inconsistency(format!(
                    "{} lists were unpinned but pinning list {} failed: {}",
                    unpinned,
                    id,
                    e.message()
                )))
            }
            Err(e) => Err(e.context(&format!("pinning list {}", id))),
        }
    }

    /// Delete the list and all of its entries. Returns the deleted list and
    /// the number of entries removed with it.
    pub async fn delete_list(&self, id: &Uuid) -> AppResult<(List, usize)> {
        let list = self.require_list(id).await?;

        let removed = self
            .list_repo
            .delete_cascade(id)
            .await
            .map_err(|e| e.context(&format!("deleting list {}", id)))?;

        if removed != list.entry_ids.len() {
            LogContext::integrity_warning(
                "lists",
                &format!(
                    "list {} referenced {} entries but {} were deleted",
                    id,
                    list.entry_ids.len(),
                    removed
                ),
            );
        }

        log_info!("Deleted list {} with {} entries", id, removed);
        Ok((list, removed))
    }

    pub async fn add_entry_to_list(&self, list_id: &Uuid, data: NewEntry) -> AppResult<Entry> {
        self.require_list(list_id).await?;
        self.entry_service.create_entry(data, list_id).await
    }

    pub async fn get_filtered_entries(
        &self,
        list_id: &Uuid,
        filter: EntryFilter,
        tag: Option<&str>,
    ) -> AppResult<Vec<Entry>> {
        let tag = match tag.map(str::trim) {
            Some(tag) if !tag.is_empty() => Some(Validator::normalize_tag(tag)?),
            _ => None,
        };

        let detail = self.get_list(list_id).await?;
        Ok(filter_entries(detail.entries, filter, tag.as_deref()))
    }

    pub async fn get_incomplete_entries(&self, list_id: &Uuid) -> AppResult<Vec<Entry>> {
        self.get_filtered_entries(list_id, EntryFilter::Incomplete, None)
            .await
    }

    /// Pick one entry uniformly from the eligible subset using `rng`.
    pub async fn get_random_entry<R>(
        &self,
        list_id: &Uuid,
        only_incomplete: bool,
        rng: &mut R,
    ) -> AppResult<Entry>
    where
        R: Rng + Send + ?Sized,
    {
        let detail = self.get_list(list_id).await?;
        let picked = pick_random(detail.entries, only_incomplete, rng)?;

        log_debug!("Random pick from list {}: {}", list_id, picked.id);
        Ok(picked)
    }

    /// Mark every entry incomplete and stamp `last_reset`
    pub async fn reset_list_entries(&self, list_id: &Uuid) -> AppResult<ResetSummary> {
        self.require_list(list_id).await?;

        let at = clock::now();
        let reset_count = self
            .list_repo
            .reset(list_id, at)
            .await
            .map_err(|e| e.context(&format!("resetting list {}", list_id)))?;

        log_info!("Reset {} entries of list {}", reset_count, list_id);
        Ok(ResetSummary {
            list: self.get_list(list_id).await?,
            reset_count,
        })
    }

    /// Add a tag identifier to the list itself
    pub async fn add_tag(&self, list_id: &Uuid, tag: &str) -> AppResult<List> {
        let tag = Validator::normalize_tag(tag)?;
        let mut list = self.require_list(list_id).await?;

        if !list.add_tag(tag) {
            return Ok(list);
        }
        self.save(&list, "tagging").await
    }

    pub async fn add_tag_to_entry(
        &self,
        list_id: &Uuid,
        entry_id: &Uuid,
        tag: &str,
    ) -> AppResult<Entry> {
        self.require_list(list_id).await?;
        self.entry_service
            .change_tag(list_id, entry_id, tag, TagChange::Add)
            .await
    }

    pub async fn remove_tag_from_entry(
        &self,
        list_id: &Uuid,
        entry_id: &Uuid,
        tag: &str,
    ) -> AppResult<Entry> {
        self.require_list(list_id).await?;
        self.entry_service
            .change_tag(list_id, entry_id, tag, TagChange::Remove)
            .await
    }

    /// Union of the tags of all entries in the list, sorted
    pub async fn get_list_tags(&self, list_id: &Uuid) -> AppResult<Vec<String>> {
        let detail = self.get_list(list_id).await?;
        Ok(collect_tags(&detail.entries))
    }

    async fn require_list(&self, id: &Uuid) -> AppResult<List> {
        self.list_repo
            .find_by_id(id)
            .await
            .map_err(|e| e.context(&format!("fetching list {}", id)))?
            .ok_or_else(|| AppError::list_not_found(id))
    }

    async fn save(&self, list: &List, action: &str) -> AppResult<List> {
        self.list_repo
            .update(list)
            .await
            .map_err(|e| e.context(&format!("{} list {}", action, list.id)))
    }
}

/// Order entries by the list's references. Dangling references and
/// unreferenced entries are logged; unreferenced ones are still returned.
fn resolve_entries(list: &List, entries: Vec<Entry>) -> Vec<Entry> {
    let mut by_id: HashMap<Uuid, Entry> =
        entries.into_iter().map(|entry| (entry.id, entry)).collect();
    let mut resolved = Vec::with_capacity(by_id.len());

    for id in &list.entry_ids {
        match by_id.remove(id) {
            Some(entry) => resolved.push(entry),
            None => log_warn!("List {} references missing entry {}", list.id, id),
        }
    }

    if !by_id.is_empty() {
        log_warn!(
            "List {} has {} entries missing from its references",
            list.id,
            by_id.len()
        );
        let mut extra: Vec<Entry> = by_id.into_values().collect();
        extra.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        resolved.extend(extra);
    }

    resolved
}
