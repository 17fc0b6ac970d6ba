/// File-backed local store through the services
mod utils;

use listo_lib::infrastructure::local::LocalStore;
use std::sync::Arc;
use tempfile::TempDir;
use utils::factories::{list_with_entries, services_over};

#[tokio::test]
async fn data_survives_a_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("listo.json");

    let services = services_over(Arc::new(LocalStore::open(&path).await));
    let (list, entries) = list_with_entries(&services, "Movies", &["Heat", "Tenet"]).await;
    services.entries.set_completed(&entries[0].id, true).await.unwrap();
    drop(services);

    let reopened = services_over(Arc::new(LocalStore::open(&path).await));
    let detail = reopened.lists.get_list(&list.id).await.unwrap();

    assert_eq!(detail.entries.len(), 2);
    assert_eq!(detail.entries[0].id, entries[1].id);
    assert!(detail.entries[1].completed);
}

#[tokio::test]
async fn persisted_document_uses_lists_and_entries_collections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("listo.json");

    let services = services_over(Arc::new(LocalStore::open(&path).await));
    let (list, entries) = list_with_entries(&services, "Movies", &["Inception"]).await;

    let json: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    let stored_list = &json["lists"][list.id.to_string()];
    let stored_entry = &json["entries"][entries[0].id.to_string()];

    assert_eq!(stored_list["name"], "Movies");
    assert_eq!(stored_list["entries"], serde_json::json!([entries[0].id]));
    assert_eq!(stored_entry["list"], serde_json::json!(list.id));
    assert_eq!(stored_entry["completed"], false);
}

#[tokio::test]
async fn corrupted_file_starts_empty_and_is_replaced() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("listo.json");
    std::fs::write(&path, "[[[").unwrap();

    let services = services_over(Arc::new(LocalStore::open(&path).await));
    assert!(services.lists.get_all_lists().await.unwrap().is_empty());

    list_with_entries(&services, "Fresh", &[]).await;
    let json: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(json["lists"].as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn concurrent_inserts_keep_every_back_link() {
    let dir = TempDir::new().unwrap();
    let services = services_over(Arc::new(
        LocalStore::open(dir.path().join("listo.json")).await,
    ));
    let (list, _) = list_with_entries(&services, "Inbox", &[]).await;

    let adds = (0..20).map(|i| {
        let lists = Arc::clone(&services.lists);
        let list_id = list.id;
        async move {
            lists
                .add_entry_to_list(&list_id, utils::factories::new_entry(&format!("item {}", i), &[]))
                .await
        }
    });
    let results = futures::future::join_all(adds).await;
    assert!(results.iter().all(|r| r.is_ok()));

    let detail = services.lists.get_list(&list.id).await.unwrap();
    assert_eq!(detail.entries.len(), 20);
    assert!(detail.entries.iter().all(|e| e.list_id == list.id));
}
