pub mod entry;
pub mod list;
