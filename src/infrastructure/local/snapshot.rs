use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::modules::entry::domain::Entry;
use crate::modules::list::domain::List;

/// On-disk document: two collections keyed by identifier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub lists: BTreeMap<Uuid, List>,
    #[serde(default)]
    pub entries: BTreeMap<Uuid, Entry>,
}

impl Snapshot {
    pub fn entries_of(&self, list_id: &Uuid) -> impl Iterator<Item = &Entry> + '_ {
        let list_id = *list_id;
        self.entries
            .values()
            .filter(move |entry| entry.list_id == list_id)
    }

    /// Describe every broken link between the two collections
    pub fn integrity_problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for list in self.lists.values() {
            for entry_id in &list.entry_ids {
                match self.entries.get(entry_id) {
                    None => problems.push(format!(
                        "list {} references missing entry {}",
                        list.id, entry_id
                    )),
                    Some(entry) if entry.list_id != list.id => problems.push(format!(
                        "list {} references entry {} owned by list {}",
                        list.id, entry_id, entry.list_id
                    )),
                    Some(_) => {}
                }
            }
        }

        for entry in self.entries.values() {
            match self.lists.get(&entry.list_id) {
                None => problems.push(format!(
                    "entry {} points at missing list {}",
                    entry.id, entry.list_id
                )),
                Some(list) if !list.contains_entry(&entry.id) => problems.push(format!(
                    "entry {} is not referenced by its list {}",
                    entry.id, entry.list_id
                )),
                Some(_) => {}
            }
        }

        problems
    }
}
