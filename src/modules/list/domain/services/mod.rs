pub mod entry_selection;

pub use entry_selection::{collect_tags, filter_entries, pick_random};
