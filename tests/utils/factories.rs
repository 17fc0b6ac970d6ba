/// Service fixtures over the in-memory local store
use listo_lib::infrastructure::local::LocalStore;
use listo_lib::modules::entry::{Entry, EntryService, NewEntry};
use listo_lib::modules::list::{List, ListService, NewList};
use listo_lib::build_services;
use std::sync::Arc;

pub struct Services {
    pub lists: Arc<ListService>,
    pub entries: Arc<EntryService>,
    pub store: Arc<LocalStore>,
}

pub fn services_over(store: Arc<LocalStore>) -> Services {
    let (lists, entries) = build_services(store.clone(), store.clone());
    Services {
        lists,
        entries,
        store,
    }
}

pub fn in_memory_services() -> Services {
    services_over(Arc::new(LocalStore::in_memory()))
}

pub fn new_list(name: &str) -> NewList {
    NewList {
        name: name.to_string(),
        description: None,
    }
}

pub fn new_entry(name: &str, tags: &[&str]) -> NewEntry {
    NewEntry {
        name: name.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..NewEntry::default()
    }
}

/// A list holding the given entries, created in order
pub async fn list_with_entries(services: &Services, name: &str, entries: &[&str]) -> (List, Vec<Entry>) {
    let list = services.lists.create_list(new_list(name)).await.unwrap();
    let mut created = Vec::new();
    for entry in entries {
        created.push(
            services
                .lists
                .add_entry_to_list(&list.id, new_entry(entry, &[]))
                .await
                .unwrap(),
        );
    }
    (list, created)
}
