/// Storage port for lists
///
/// Entry membership is owned by the entry repository; `update` writes the
/// list's own fields and never rewrites which entries it holds.
use crate::modules::list::domain::entities::List;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<List>>;

    /// All lists, most recently updated first
    async fn get_all(&self) -> AppResult<Vec<List>>;

    async fn find_pinned(&self) -> AppResult<Vec<List>>;

    async fn insert(&self, list: &List) -> AppResult<List>;

    async fn update(&self, list: &List) -> AppResult<List>;

    /// Delete the list together with all of its entries as one storage
    /// operation. Returns the number of entries removed, `NotFound` if the
    /// list does not exist.
    async fn delete_cascade(&self, id: &Uuid) -> AppResult<usize>;

    /// Mark every entry of the list incomplete and stamp `last_reset`, as one
    /// storage operation. Returns the number of entries reset.
    async fn reset(&self, id: &Uuid, at: DateTime<Utc>) -> AppResult<usize>;
}
