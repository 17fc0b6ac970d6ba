pub mod service;

pub use service::{EntryService, TagChange};
