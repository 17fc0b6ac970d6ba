//! File-backed document store implementing both repository ports.
//!
//! The whole dataset lives in one [`Snapshot`] behind a single `RwLock`.
//! A mutation works on a copy, writes it to disk, and only then replaces
//! the in-memory state, all under the write guard; a failed write leaves
//! both the file and the state untouched.
pub mod snapshot;

pub use snapshot::Snapshot;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::modules::entry::domain::{Entry, EntryRepository};
use crate::modules::list::domain::{List, ListRepository};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::clock;
use crate::shared::utils::logger::LogContext;
use crate::{log_debug, log_info, log_warn};

pub struct LocalStore {
    path: Option<PathBuf>,
    state: RwLock<Snapshot>,
}

impl LocalStore {
    /// Store that never touches disk
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: RwLock::new(Snapshot::default()),
        }
    }

    /// Load the snapshot at `path`.
    ///
    /// A missing file starts an empty store. An unreadable or corrupt file is
    /// logged and also starts empty; it is overwritten on the next write.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let snapshot = Self::load(&path).await;

        for problem in snapshot.integrity_problems() {
            LogContext::integrity_warning("local store", &problem);
        }

        log_info!(
            "Local store at {} loaded ({} lists, {} entries)",
            path.display(),
            snapshot.lists.len(),
            snapshot.entries.len()
        );

        Self {
            path: Some(path),
            state: RwLock::new(snapshot),
        }
    }

    async fn load(path: &Path) -> Snapshot {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log_debug!("No local store at {}, starting empty", path.display());
                return Snapshot::default();
            }
            Err(e) => {
                log_warn!("Failed to read local store {}: {}", path.display(), e);
                return Snapshot::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log_warn!("Local store {} is corrupt, starting empty: {}", path.display(), e);
                Snapshot::default()
            }
        }
    }

    async fn persist(&self, snapshot: &Snapshot) -> AppResult<()> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };

        let json = serde_json::to_vec_pretty(snapshot)?;
        let tmp = path.with_extension("tmp");

        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|e| AppError::from(e).context(&format!("writing {}", tmp.display())))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| AppError::from(e).context(&format!("replacing {}", path.display())))?;

        Ok(())
    }

    /// Run `change` against a copy of the state and commit it once written.
    async fn mutate<T>(&self, change: impl FnOnce(&mut Snapshot) -> AppResult<T>) -> AppResult<T> {
        let mut state = self.state.write().await;
        let mut draft = state.clone();

        let result = change(&mut draft)?;
        self.persist(&draft).await?;

        *state = draft;
        Ok(result)
    }

    async fn read<T>(&self, query: impl FnOnce(&Snapshot) -> T) -> T {
        let state = self.state.read().await;
        query(&state)
    }
}

fn newest_first(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
}

#[async_trait]
impl EntryRepository for LocalStore {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Entry>> {
        Ok(self.read(|s| s.entries.get(id).cloned()).await)
    }

    async fn find_by_list(&self, list_id: &Uuid) -> AppResult<Vec<Entry>> {
        let mut entries = self.read(|s| s.entries_of(list_id).cloned().collect::<Vec<_>>()).await;
        newest_first(&mut entries);
        Ok(entries)
    }

    async fn find_by_lists(&self, list_ids: &[Uuid]) -> AppResult<Vec<Entry>> {
        let mut entries = self
            .read(|s| {
                s.entries
                    .values()
                    .filter(|entry| list_ids.contains(&entry.list_id))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .await;
        newest_first(&mut entries);
        Ok(entries)
    }

    async fn insert(&self, entry: &Entry) -> AppResult<Entry> {
        self.mutate(|s| {
            let list = s
                .lists
                .get_mut(&entry.list_id)
                .ok_or_else(|| AppError::list_not_found(&entry.list_id))?;

            list.link_entry(entry.id);
            s.entries.insert(entry.id, entry.clone());
            Ok(entry.clone())
        })
        .await
    }

    async fn update(&self, entry: &Entry) -> AppResult<Entry> {
        self.mutate(|s| {
            let stored = s
                .entries
                .get_mut(&entry.id)
                .ok_or_else(|| AppError::entry_not_found(&entry.id))?;

            if stored.list_id != entry.list_id {
                return Err(AppError::Inconsistency(format!(
                    "Entry {} cannot move from list {} to list {}",
                    entry.id, stored.list_id, entry.list_id
                )));
            }

            *stored = entry.clone();
            Ok(entry.clone())
        })
        .await
    }

    async fn delete(&self, id: &Uuid) -> AppResult<Entry> {
        self.mutate(|s| {
            let removed = s
                .entries
                .remove(id)
                .ok_or_else(|| AppError::entry_not_found(id))?;

            let unlinked = s
                .lists
                .get_mut(&removed.list_id)
                .map(|list| list.unlink_entry(id))
                .unwrap_or(false);

            if !unlinked {
                LogContext::integrity_warning(
                    "local store",
                    &format!("deleted entry {} was not linked from list {}", id, removed.list_id),
                );
            }

            Ok(removed)
        })
        .await
    }
}

#[async_trait]
impl ListRepository for LocalStore {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<List>> {
        Ok(self.read(|s| s.lists.get(id).cloned()).await)
    }

    async fn get_all(&self) -> AppResult<Vec<List>> {
        let mut lists = self.read(|s| s.lists.values().cloned().collect::<Vec<_>>()).await;
        lists.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.id.cmp(&b.id)));
        Ok(lists)
    }

    async fn find_pinned(&self) -> AppResult<Vec<List>> {
        Ok(self
            .get_all()
            .await?
            .into_iter()
            .filter(|list| list.is_pinned)
            .collect())
    }

    async fn insert(&self, list: &List) -> AppResult<List> {
        self.mutate(|s| {
            s.lists.insert(list.id, list.clone());
            Ok(list.clone())
        })
        .await
    }

    async fn update(&self, list: &List) -> AppResult<List> {
        self.mutate(|s| {
            let stored = s
                .lists
                .get_mut(&list.id)
                .ok_or_else(|| AppError::list_not_found(&list.id))?;

            // Membership is only changed by entry insert/delete
            let entry_ids = std::mem::take(&mut stored.entry_ids);
            *stored = List {
                entry_ids,
                ..list.clone()
            };
            Ok(stored.clone())
        })
        .await
    }

    async fn delete_cascade(&self, id: &Uuid) -> AppResult<usize> {
        self.mutate(|s| {
            s.lists
                .remove(id)
                .ok_or_else(|| AppError::list_not_found(id))?;

            let before = s.entries.len();
            s.entries.retain(|_, entry| entry.list_id != *id);
            Ok(before - s.entries.len())
        })
        .await
    }

    async fn reset(&self, id: &Uuid, at: DateTime<Utc>) -> AppResult<usize> {
        self.mutate(|s| {
            let list = s
                .lists
                .get_mut(id)
                .ok_or_else(|| AppError::list_not_found(id))?;
            list.mark_reset(at);

            let mut reset = 0;
            for entry in s.entries.values_mut().filter(|entry| entry.list_id == *id) {
                entry.completed = false;
                entry.updated_at = at.max(clock::advance(entry.updated_at));
                reset += 1;
            }
            Ok(reset)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn seeded(store: &LocalStore) -> (List, Entry) {
        let list = ListRepository::insert(store, &List::new("Movies".into()))
            .await
            .unwrap();
        let entry = EntryRepository::insert(store, &Entry::new(list.id, "Inception".into()))
            .await
            .unwrap();
        (list, entry)
    }

    #[tokio::test]
    async fn insert_links_entry_at_front_of_list() {
        let store = LocalStore::in_memory();
        let (list, first) = seeded(&store).await;
        let second = EntryRepository::insert(&store, &Entry::new(list.id, "Tenet".into()))
            .await
            .unwrap();

        let list = ListRepository::find_by_id(&store, &list.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(list.entry_ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn insert_into_missing_list_writes_nothing() {
        let store = LocalStore::in_memory();
        let entry = Entry::new(Uuid::new_v4(), "Inception".into());

        let err = EntryRepository::insert(&store, &entry).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(EntryRepository::find_by_id(&store, &entry.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn list_update_keeps_membership() {
        let store = LocalStore::in_memory();
        let (mut list, entry) = seeded(&store).await;

        list.entry_ids.clear();
        list.name = "Films".into();
        let saved = ListRepository::update(&store, &list).await.unwrap();

        assert_eq!(saved.name, "Films");
        assert_eq!(saved.entry_ids, vec![entry.id]);
    }

    #[tokio::test]
    async fn cascade_removes_only_the_lists_entries() {
        let store = LocalStore::in_memory();
        let (list, entry) = seeded(&store).await;
        let (other, kept) = seeded(&store).await;

        let removed = store.delete_cascade(&list.id).await.unwrap();

        assert_eq!(removed, 1);
        assert!(EntryRepository::find_by_id(&store, &entry.id)
            .await
            .unwrap()
            .is_none());
        assert!(EntryRepository::find_by_id(&store, &kept.id)
            .await
            .unwrap()
            .is_some());
        assert!(ListRepository::find_by_id(&store, &other.id)
            .await
            .unwrap()
            .is_some());
        assert!(matches!(
            store.delete_cascade(&list.id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn snapshot_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("listo.json");

        let store = LocalStore::open(&path).await;
        let (list, entry) = seeded(&store).await;
        drop(store);

        let reopened = LocalStore::open(&path).await;
        let list = ListRepository::find_by_id(&reopened, &list.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(list.entry_ids, vec![entry.id]);
        assert_eq!(
            EntryRepository::find_by_id(&reopened, &entry.id)
                .await
                .unwrap(),
            Some(entry)
        );
    }

    #[tokio::test]
    async fn corrupt_snapshot_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("listo.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let store = LocalStore::open(&path).await;

        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_write_leaves_state_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("listo.json");
        let store = LocalStore::open(&path).await;

        let err = ListRepository::insert(&store, &List::new("Movies".into()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DatabaseError(_)));
        assert!(store.get_all().await.unwrap().is_empty());
    }
}
