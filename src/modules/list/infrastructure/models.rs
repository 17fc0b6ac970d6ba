/// Diesel models for the lists table
use crate::modules::list::domain::entities::List;
use crate::schema::lists;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ListModel {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub collection_id: Option<Uuid>,
    pub is_pinned: bool,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_reset: Option<DateTime<Utc>>,
}

/// Columns a list update may write
#[derive(AsChangeset, Debug)]
#[diesel(table_name = lists)]
#[diesel(treat_none_as_null = true)]
pub struct ListChangeset<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub collection_id: Option<Uuid>,
    pub is_pinned: bool,
    pub tags: &'a [String],
    pub updated_at: DateTime<Utc>,
    pub last_reset: Option<DateTime<Utc>>,
}

impl ListModel {
    /// Convert to the domain list; membership comes from the entries table
    pub fn into_list(self, entry_ids: Vec<Uuid>) -> List {
        List {
            id: self.id,
            name: self.name,
            description: self.description,
            entry_ids,
            collection_id: self.collection_id,
            is_pinned: self.is_pinned,
            tags: self.tags,
            created_at: self.created_at,
            updated_at: self.updated_at,
            last_reset: self.last_reset,
        }
    }
}

impl From<&List> for ListModel {
    fn from(list: &List) -> Self {
        ListModel {
            id: list.id,
            name: list.name.clone(),
            description: list.description.clone(),
            collection_id: list.collection_id,
            is_pinned: list.is_pinned,
            tags: list.tags.clone(),
            created_at: list.created_at,
            updated_at: list.updated_at,
            last_reset: list.last_reset,
        }
    }
}

impl<'a> From<&'a List> for ListChangeset<'a> {
    fn from(list: &'a List) -> Self {
        ListChangeset {
            name: &list.name,
            description: list.description.as_deref(),
            collection_id: list.collection_id,
            is_pinned: list.is_pinned,
            tags: &list.tags,
            updated_at: list.updated_at,
            last_reset: list.last_reset,
        }
    }
}
