/// PostgreSQL implementation of ListRepository
///
/// A list's entry references are not stored on the row; they are read from
/// `entries` ordered newest first whenever a list is loaded.
use crate::modules::list::domain::entities::List;
use crate::modules::list::domain::repositories::ListRepository;
use crate::modules::list::infrastructure::models::{ListChangeset, ListModel};
use crate::schema::{entries, lists};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::{LogContext, TimedOperation};
use crate::shared::Database;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task;
use uuid::Uuid;

pub struct ListRepositoryImpl {
    db: Arc<Database>,
}

impl ListRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

/// Attach entry references to loaded list rows, keeping row order
fn with_entry_ids(conn: &mut PgConnection, models: Vec<ListModel>) -> QueryResult<Vec<List>> {
    let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let pairs: Vec<(Uuid, Uuid)> = entries::table
        .filter(entries::list_id.eq_any(&ids))
        .order((entries::created_at.desc(), entries::id))
        .select((entries::list_id, entries::id))
        .load(conn)?;

    let mut by_list: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for (list_id, entry_id) in pairs {
        by_list.entry(list_id).or_default().push(entry_id);
    }

    Ok(models
        .into_iter()
        .map(|model| {
            let entry_ids = by_list.remove(&model.id).unwrap_or_default();
            model.into_list(entry_ids)
        })
        .collect())
}

fn single(conn: &mut PgConnection, model: ListModel) -> QueryResult<List> {
    with_entry_ids(conn, vec![model])?
        .pop()
        .ok_or(diesel::result::Error::NotFound)
}

#[async_trait]
impl ListRepository for ListRepositoryImpl {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<List>> {
        let db = Arc::clone(&self.db);
        let id = *id;

        task::spawn_blocking(move || -> AppResult<Option<List>> {
            let mut conn = db.get_connection()?;

            let model = lists::table
                .find(id)
                .select(ListModel::as_select())
                .first(&mut conn)
                .optional()?;

            match model {
                Some(model) => Ok(Some(single(&mut conn, model)?)),
                None => Ok(None),
            }
        })
        .await?
    }

    async fn get_all(&self) -> AppResult<Vec<List>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Vec<List>> {
            let mut conn = db.get_connection()?;
            let timer = TimedOperation::new("lists_get_all");

            let models = lists::table
                .order((lists::updated_at.desc(), lists::id))
                .select(ListModel::as_select())
                .load(&mut conn)?;
            let lists = with_entry_ids(&mut conn, models)?;

            let elapsed = timer.finish_if_slow(200);
            LogContext::db_operation("SELECT", "lists", Some(elapsed));
            Ok(lists)
        })
        .await?
    }

    async fn find_pinned(&self) -> AppResult<Vec<List>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Vec<List>> {
            let mut conn = db.get_connection()?;

            let models = lists::table
                .filter(lists::is_pinned.eq(true))
                .order(lists::updated_at.desc())
                .select(ListModel::as_select())
                .load(&mut conn)?;

            Ok(with_entry_ids(&mut conn, models)?)
        })
        .await?
    }

    async fn insert(&self, list: &List) -> AppResult<List> {
        let db = Arc::clone(&self.db);
        let model = ListModel::from(list);

        task::spawn_blocking(move || -> AppResult<List> {
            let mut conn = db.get_connection()?;

            let inserted = diesel::insert_into(lists::table)
                .values(&model)
                .returning(ListModel::as_returning())
                .get_result(&mut conn)?;

            LogContext::db_operation("INSERT", "lists", None);
            Ok(inserted.into_list(Vec::new()))
        })
        .await?
    }

    async fn update(&self, list: &List) -> AppResult<List> {
        let db = Arc::clone(&self.db);
        let list = list.clone();

        task::spawn_blocking(move || -> AppResult<List> {
            let mut conn = db.get_connection()?;

            let updated = diesel::update(lists::table.find(list.id))
                .set(ListChangeset::from(&list))
                .returning(ListModel::as_returning())
                .get_result(&mut conn)
                .optional()?
                .ok_or_else(|| AppError::list_not_found(&list.id))?;

            Ok(single(&mut conn, updated)?)
        })
        .await?
    }

    async fn delete_cascade(&self, id: &Uuid) -> AppResult<usize> {
        let db = Arc::clone(&self.db);
        let id = *id;

        task::spawn_blocking(move || -> AppResult<usize> {
            let mut conn = db.get_connection()?;

            conn.transaction::<_, AppError, _>(|conn| {
                let removed =
                    diesel::delete(entries::table.filter(entries::list_id.eq(id))).execute(conn)?;

                let deleted = diesel::delete(lists::table.find(id)).execute(conn)?;
                if deleted == 0 {
                    // Rolls back the entry delete
                    return Err(AppError::list_not_found(&id));
                }

                LogContext::db_operation("DELETE", "lists", None);
                Ok(removed)
            })
        })
        .await?
    }

    async fn reset(&self, id: &Uuid, at: DateTime<Utc>) -> AppResult<usize> {
        let db = Arc::clone(&self.db);
        let id = *id;

        task::spawn_blocking(move || -> AppResult<usize> {
            let mut conn = db.get_connection()?;

            conn.transaction::<_, AppError, _>(|conn| {
                let stamped = diesel::update(lists::table.find(id))
                    .set((lists::last_reset.eq(Some(at)), lists::updated_at.eq(at)))
                    .execute(conn)?;
                if stamped == 0 {
                    return Err(AppError::list_not_found(&id));
                }

                let reset = diesel::update(entries::table.filter(entries::list_id.eq(id)))
                    .set((entries::completed.eq(false), entries::updated_at.eq(at)))
                    .execute(conn)?;

                Ok(reset)
            })
        })
        .await?
    }
}
