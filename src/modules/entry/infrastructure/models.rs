/// Diesel models for the entries table
use crate::modules::entry::domain::entities::Entry;
use crate::schema::entries;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EntryModel {
    pub id: Uuid,
    pub list_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub completed: bool,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable columns; `list_id` and `created_at` never change after insert
#[derive(AsChangeset, Debug)]
#[diesel(table_name = entries)]
#[diesel(treat_none_as_null = true)]
pub struct EntryChangeset<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub completed: bool,
    pub tags: &'a [String],
    pub updated_at: DateTime<Utc>,
}

impl From<EntryModel> for Entry {
    fn from(model: EntryModel) -> Self {
        Entry {
            id: model.id,
            name: model.name,
            description: model.description,
            completed: model.completed,
            created_at: model.created_at,
            updated_at: model.updated_at,
            list_id: model.list_id,
            tags: model.tags,
        }
    }
}

impl From<&Entry> for EntryModel {
    fn from(entry: &Entry) -> Self {
        EntryModel {
            id: entry.id,
            list_id: entry.list_id,
            name: entry.name.clone(),
            description: entry.description.clone(),
            completed: entry.completed,
            tags: entry.tags.clone(),
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

impl<'a> From<&'a Entry> for EntryChangeset<'a> {
    fn from(entry: &'a Entry) -> Self {
        EntryChangeset {
            name: &entry.name,
            description: entry.description.as_deref(),
            completed: entry.completed,
            tags: &entry.tags,
            updated_at: entry.updated_at,
        }
    }
}
