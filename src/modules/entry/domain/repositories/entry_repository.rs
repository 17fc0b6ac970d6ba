/// Storage port for entries
///
/// Implementations keep the owning list's entry references in step with the
/// entry records: `insert` and `delete` change both sides in one storage
/// operation, so callers never observe an entry its list does not list.
use crate::modules::entry::domain::entities::Entry;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Entry>>;

    /// Entries of one list, newest first
    async fn find_by_list(&self, list_id: &Uuid) -> AppResult<Vec<Entry>>;

    /// Entries of several lists, newest first within each list
    async fn find_by_lists(&self, list_ids: &[Uuid]) -> AppResult<Vec<Entry>>;

    /// Insert the entry and link it at the front of its list.
    /// Fails with `NotFound` (writing nothing) when the list does not exist.
    async fn insert(&self, entry: &Entry) -> AppResult<Entry>;

    /// Overwrite the entry's fields. The owning list cannot change.
    async fn update(&self, entry: &Entry) -> AppResult<Entry>;

    /// Unlink the entry from its list and delete it, returning the removed record.
    async fn delete(&self, id: &Uuid) -> AppResult<Entry>;
}
