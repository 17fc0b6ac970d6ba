/// PostgreSQL implementation of EntryRepository
///
/// List membership is the `entries.list_id` column, so linking and unlinking
/// an entry is the insert or delete itself. Both also bump the owning list's
/// `updated_at` in the same transaction.
use crate::modules::entry::domain::entities::Entry;
use crate::modules::entry::domain::repositories::EntryRepository;
use crate::modules::entry::infrastructure::models::{EntryChangeset, EntryModel};
use crate::schema::{entries, lists};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::clock;
use crate::shared::utils::logger::TimedOperation;
use crate::shared::Database;
use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;
use tokio::task;
use uuid::Uuid;

pub struct EntryRepositoryImpl {
    db: Arc<Database>,
}

impl EntryRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

fn touch_list(conn: &mut PgConnection, list_id: Uuid) -> QueryResult<usize> {
    diesel::update(lists::table.find(list_id))
        .set(lists::updated_at.eq(clock::now()))
        .execute(conn)
}

#[async_trait]
impl EntryRepository for EntryRepositoryImpl {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Entry>> {
        let db = Arc::clone(&self.db);
        let id = *id;

        task::spawn_blocking(move || -> AppResult<Option<Entry>> {
            let mut conn = db.get_connection()?;

            let model = entries::table
                .find(id)
                .select(EntryModel::as_select())
                .first(&mut conn)
                .optional()?;

            Ok(model.map(Entry::from))
        })
        .await?
    }

    async fn find_by_list(&self, list_id: &Uuid) -> AppResult<Vec<Entry>> {
        self.find_by_lists(&[*list_id]).await
    }

    async fn find_by_lists(&self, list_ids: &[Uuid]) -> AppResult<Vec<Entry>> {
        if list_ids.is_empty() {
            return Ok(Vec::new());
        }

        let db = Arc::clone(&self.db);
        let list_ids = list_ids.to_vec();

        task::spawn_blocking(move || -> AppResult<Vec<Entry>> {
            let mut conn = db.get_connection()?;
            let timer = TimedOperation::new("entries_by_lists");

            let models = entries::table
                .filter(entries::list_id.eq_any(&list_ids))
                .order((entries::list_id, entries::created_at.desc(), entries::id))
                .select(EntryModel::as_select())
                .load(&mut conn)?;

            timer.finish_if_slow(200);
            Ok(models.into_iter().map(Entry::from).collect())
        })
        .await?
    }

    async fn insert(&self, entry: &Entry) -> AppResult<Entry> {
        let db = Arc::clone(&self.db);
        let model = EntryModel::from(entry);

        task::spawn_blocking(move || -> AppResult<Entry> {
            let mut conn = db.get_connection()?;

            conn.transaction::<_, AppError, _>(|conn| {
                // Row lock keeps a concurrent cascade delete from slipping in
                let list = lists::table
                    .find(model.list_id)
                    .select(lists::id)
                    .for_update()
                    .first::<Uuid>(conn)
                    .optional()?;

                if list.is_none() {
                    return Err(AppError::list_not_found(&model.list_id));
                }

                let inserted = diesel::insert_into(entries::table)
                    .values(&model)
                    .returning(EntryModel::as_returning())
                    .get_result(conn)?;

                touch_list(conn, inserted.list_id)?;
                Ok(Entry::from(inserted))
            })
        })
        .await?
    }

    async fn update(&self, entry: &Entry) -> AppResult<Entry> {
        let db = Arc::clone(&self.db);
        let entry = entry.clone();

        task::spawn_blocking(move || -> AppResult<Entry> {
            let mut conn = db.get_connection()?;

            let updated = diesel::update(entries::table.find(entry.id))
                .set(EntryChangeset::from(&entry))
                .returning(EntryModel::as_returning())
                .get_result(&mut conn)
                .optional()?;

            updated
                .map(Entry::from)
                .ok_or_else(|| AppError::entry_not_found(&entry.id))
        })
        .await?
    }

    async fn delete(&self, id: &Uuid) -> AppResult<Entry> {
        let db = Arc::clone(&self.db);
        let id = *id;

        task::spawn_blocking(move || -> AppResult<Entry> {
            let mut conn = db.get_connection()?;

            conn.transaction::<_, AppError, _>(|conn| {
                let deleted = diesel::delete(entries::table.find(id))
                    .returning(EntryModel::as_returning())
                    .get_result(conn)
                    .optional()?
                    .ok_or_else(|| AppError::entry_not_found(&id))?;

                touch_list(conn, deleted.list_id)?;
                Ok(Entry::from(deleted))
            })
        })
        .await?
    }
}
