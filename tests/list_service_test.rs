/// Service-level behaviour of lists and entries over the local store
///
/// Tests cover:
/// - Create/get round trips and partial updates
/// - Entry back-links and cascade delete
/// - Filtering, random selection and reset
/// - Pinning and home ordering
/// - Tag mutation scoped to a list
mod utils;

use listo_lib::modules::entry::EntryUpdate;
use listo_lib::modules::list::{EntryFilter, ListUpdate, NewList};
use listo_lib::shared::AppError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use utils::factories::{in_memory_services, list_with_entries, new_entry, new_list};
use uuid::Uuid;

#[tokio::test]
async fn created_list_reads_back_empty() {
    let services = in_memory_services();

    let list = services
        .lists
        .create_list(NewList {
            name: "Movies".into(),
            description: Some("to watch".into()),
        })
        .await
        .unwrap();
    let detail = services.lists.get_list(&list.id).await.unwrap();

    assert_eq!(detail.name, "Movies");
    assert_eq!(detail.description.as_deref(), Some("to watch"));
    assert!(detail.entries.is_empty());
    assert_eq!(detail.last_reset, None);
}

#[tokio::test]
async fn create_list_requires_a_name() {
    let services = in_memory_services();

    let err = services.lists.create_list(new_list("   ")).await.unwrap_err();

    assert!(matches!(err, AppError::ValidationError(_)));
    assert!(services.lists.get_all_lists().await.unwrap().is_empty());
}

#[tokio::test]
async fn added_entry_is_linked_both_ways() {
    let services = in_memory_services();
    let (list, entries) = list_with_entries(&services, "Movies", &["Inception"]).await;
    let entry = &entries[0];

    assert_eq!(entry.list_id, list.id);
    let detail = services.lists.get_list(&list.id).await.unwrap();
    assert_eq!(detail.entry_ids(), vec![entry.id]);
}

#[tokio::test]
async fn entries_are_listed_newest_first() {
    let services = in_memory_services();
    let (list, entries) = list_with_entries(&services, "Movies", &["Heat", "Tenet", "Dune"]).await;

    let detail = services.lists.get_list(&list.id).await.unwrap();

    let expected: Vec<Uuid> = entries.iter().rev().map(|e| e.id).collect();
    assert_eq!(detail.entry_ids(), expected);
}

#[tokio::test]
async fn adding_to_missing_list_is_not_found() {
    let services = in_memory_services();

    let err = services
        .lists
        .add_entry_to_list(&Uuid::new_v4(), new_entry("Inception", &[]))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn deleting_a_list_removes_its_entries() {
    let services = in_memory_services();
    let (list, entries) = list_with_entries(&services, "Movies", &["Heat", "Tenet"]).await;
    let (other, kept) = list_with_entries(&services, "Books", &["Dune"]).await;

    let (deleted, removed) = services.lists.delete_list(&list.id).await.unwrap();

    assert_eq!(deleted.id, list.id);
    assert_eq!(removed, 2);
    for entry in &entries {
        let err = services.entries.get_entry(&entry.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
    assert!(services.entries.get_entry(&kept[0].id).await.is_ok());
    assert!(services.lists.get_list(&other.id).await.is_ok());
    assert!(matches!(
        services.lists.get_list(&list.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn deleting_an_entry_unlinks_it() {
    let services = in_memory_services();
    let (list, entries) = list_with_entries(&services, "Movies", &["Heat", "Tenet"]).await;

    services.entries.delete_entry(&entries[0].id).await.unwrap();

    let detail = services.lists.get_list(&list.id).await.unwrap();
    assert_eq!(detail.entry_ids(), vec![entries[1].id]);
    assert!(matches!(
        services.entries.delete_entry(&entries[0].id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn completion_filters_return_exact_subsets() {
    let services = in_memory_services();
    let (list, entries) = list_with_entries(&services, "Movies", &["Heat", "Tenet", "Dune"]).await;
    services
        .entries
        .set_completed(&entries[1].id, true)
        .await
        .unwrap();

    let ids = |entries: Vec<listo_lib::modules::entry::Entry>| -> HashSet<Uuid> {
        entries.into_iter().map(|e| e.id).collect()
    };

    let completed = services
        .lists
        .get_filtered_entries(&list.id, EntryFilter::Completed, None)
        .await
        .unwrap();
    let incomplete = services
        .lists
        .get_filtered_entries(&list.id, EntryFilter::Incomplete, None)
        .await
        .unwrap();
    let all = services
        .lists
        .get_filtered_entries(&list.id, EntryFilter::All, None)
        .await
        .unwrap();

    assert_eq!(ids(completed), HashSet::from([entries[1].id]));
    assert_eq!(ids(incomplete), HashSet::from([entries[0].id, entries[2].id]));
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn tag_filter_narrows_entries() {
    let services = in_memory_services();
    let list = services.lists.create_list(new_list("Movies")).await.unwrap();
    let nolan = services
        .lists
        .add_entry_to_list(&list.id, new_entry("Tenet", &["nolan"]))
        .await
        .unwrap();
    services
        .lists
        .add_entry_to_list(&list.id, new_entry("Heat", &["crime"]))
        .await
        .unwrap();

    let tagged = services
        .lists
        .get_filtered_entries(&list.id, EntryFilter::All, Some(" nolan "))
        .await
        .unwrap();

    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0].id, nolan.id);
}

#[tokio::test]
async fn movies_scenario() {
    let services = in_memory_services();
    let l1 = services.lists.create_list(new_list("Movies")).await.unwrap();
    let e1 = services
        .lists
        .add_entry_to_list(&l1.id, new_entry("Inception", &[]))
        .await
        .unwrap();

    let incomplete = services.lists.get_incomplete_entries(&l1.id).await.unwrap();
    assert_eq!(incomplete.iter().map(|e| e.id).collect::<Vec<_>>(), vec![e1.id]);

    services.entries.set_completed(&e1.id, true).await.unwrap();

    let incomplete = services
        .lists
        .get_filtered_entries(&l1.id, EntryFilter::Incomplete, None)
        .await
        .unwrap();
    assert!(incomplete.is_empty());

    let completed = services
        .lists
        .get_filtered_entries(&l1.id, EntryFilter::Completed, None)
        .await
        .unwrap();
    assert_eq!(completed.iter().map(|e| e.id).collect::<Vec<_>>(), vec![e1.id]);
}

#[tokio::test]
async fn random_pick_respects_incomplete_restriction() {
    let services = in_memory_services();
    let (list, entries) = list_with_entries(&services, "Movies", &["Heat", "Tenet", "Dune"]).await;
    services.entries.set_completed(&entries[0].id, true).await.unwrap();
    services.entries.set_completed(&entries[2].id, true).await.unwrap();

    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let picked = services
            .lists
            .get_random_entry(&list.id, true, &mut rng)
            .await
            .unwrap();
        assert_eq!(picked.id, entries[1].id);
    }

    services.entries.set_completed(&entries[1].id, true).await.unwrap();
    let err = services
        .lists
        .get_random_entry(&list.id, true, &mut rng)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NoEligibleEntries(_)));

    // Unrestricted picks still succeed
    assert!(services
        .lists
        .get_random_entry(&list.id, false, &mut rng)
        .await
        .is_ok());
}

#[tokio::test]
async fn random_pick_on_empty_list_has_no_eligible_entries() {
    let services = in_memory_services();
    let list = services.lists.create_list(new_list("Empty")).await.unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    let err = services
        .lists
        .get_random_entry(&list.id, false, &mut rng)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AppError::NoEligibleEntries("No entries found in list".into())
    );
}

#[tokio::test]
async fn reset_clears_completion_and_stamps_last_reset() {
    let services = in_memory_services();
    let (list, entries) = list_with_entries(&services, "Chores", &["Dishes", "Laundry"]).await;
    for entry in &entries {
        services.entries.set_completed(&entry.id, true).await.unwrap();
    }

    let called_at = chrono::Utc::now();
    let summary = services.lists.reset_list_entries(&list.id).await.unwrap();

    assert_eq!(summary.reset_count, 2);
    assert!(summary.list.entries.iter().all(|e| !e.completed));
    let last_reset = summary.list.last_reset.unwrap();
    // Stored timestamps are truncated to microseconds
    assert!(last_reset >= called_at - chrono::Duration::microseconds(1));
}

#[tokio::test]
async fn completing_an_entry_advances_updated_at() {
    let services = in_memory_services();
    let (_, entries) = list_with_entries(&services, "Movies", &["Inception"]).await;
    let before = entries[0].updated_at;

    services
        .entries
        .update_entry(&entries[0].id, EntryUpdate::completed(true))
        .await
        .unwrap();
    let entry = services.entries.get_entry(&entries[0].id).await.unwrap();

    assert!(entry.completed);
    assert!(entry.updated_at > before);
}

#[tokio::test]
async fn partial_list_update_keeps_other_fields() {
    let services = in_memory_services();
    let list = services
        .lists
        .create_list(NewList {
            name: "Movies".into(),
            description: Some("to watch".into()),
        })
        .await
        .unwrap();

    let updated = services
        .lists
        .update_list(
            &list.id,
            ListUpdate {
                name: Some("Films".into()),
                ..ListUpdate::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Films");
    assert_eq!(updated.description.as_deref(), Some("to watch"));

    let err = services
        .lists
        .update_list(&list.id, ListUpdate {
            name: Some("".into()),
            ..ListUpdate::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn move_list_sets_and_clears_collection() {
    let services = in_memory_services();
    let list = services.lists.create_list(new_list("Movies")).await.unwrap();
    let collection = Uuid::new_v4();

    let moved = services
        .lists
        .move_list(&list.id, Some(collection))
        .await
        .unwrap();
    assert_eq!(moved.collection_id, Some(collection));

    let cleared = services.lists.move_list(&list.id, None).await.unwrap();
    assert_eq!(cleared.collection_id, None);
}

#[tokio::test]
async fn pinning_is_exclusive_and_sorts_home_first() {
    let services = in_memory_services();
    let first = services.lists.create_list(new_list("First")).await.unwrap();
    let second = services.lists.create_list(new_list("Second")).await.unwrap();
    let third = services.lists.create_list(new_list("Third")).await.unwrap();

    services.lists.pin_list(&first.id, true).await.unwrap();
    services.lists.pin_list(&second.id, true).await.unwrap();

    let first = services.lists.get_list(&first.id).await.unwrap();
    assert!(!first.is_pinned);

    let home = services.lists.get_home_lists().await.unwrap();
    assert_eq!(home[0].id, second.id);
    assert_eq!(home.iter().filter(|l| l.is_pinned).count(), 1);

    // Plain ordering is by recency only
    let all = services.lists.get_all_lists().await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|w| w[0].updated_at >= w[1].updated_at));
    assert!(all.iter().any(|l| l.id == third.id));
}

#[tokio::test]
async fn entry_tags_are_scoped_to_their_list() {
    let services = in_memory_services();
    let (list, entries) = list_with_entries(&services, "Movies", &["Tenet"]).await;
    let (other, _) = list_with_entries(&services, "Books", &[]).await;
    let entry_id = entries[0].id;

    let tagged = services
        .lists
        .add_tag_to_entry(&list.id, &entry_id, "nolan")
        .await
        .unwrap();
    assert_eq!(tagged.tags, vec!["nolan".to_string()]);

    // Adding twice is a successful no-op
    let again = services
        .lists
        .add_tag_to_entry(&list.id, &entry_id, "nolan")
        .await
        .unwrap();
    assert_eq!(again.tags, vec!["nolan".to_string()]);

    let err = services
        .lists
        .add_tag_to_entry(&other.id, &entry_id, "books")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let untagged = services
        .lists
        .remove_tag_from_entry(&list.id, &entry_id, "nolan")
        .await
        .unwrap();
    assert!(untagged.tags.is_empty());
    assert!(services
        .lists
        .remove_tag_from_entry(&list.id, &entry_id, "nolan")
        .await
        .is_ok());
}

#[tokio::test]
async fn list_tags_are_the_sorted_union_of_entry_tags() {
    let services = in_memory_services();
    let list = services.lists.create_list(new_list("Movies")).await.unwrap();
    for (name, tags) in [("Tenet", vec!["nolan", "scifi"]), ("Heat", vec!["crime", "nolan"])] {
        services
            .lists
            .add_entry_to_list(&list.id, new_entry(name, &tags))
            .await
            .unwrap();
    }

    let tags = services.lists.get_list_tags(&list.id).await.unwrap();

    assert_eq!(tags, vec!["crime", "nolan", "scifi"]);
}

#[tokio::test]
async fn list_level_tags_are_a_set() {
    let services = in_memory_services();
    let list = services.lists.create_list(new_list("Trips")).await.unwrap();

    services.lists.add_tag(&list.id, "summer").await.unwrap();
    let list = services.lists.add_tag(&list.id, " summer ").await.unwrap();

    assert_eq!(list.tags, vec!["summer".to_string()]);
    assert!(matches!(
        services.lists.add_tag(&list.id, "  ").await.unwrap_err(),
        AppError::ValidationError(_)
    ));
}
