pub mod entry;

pub use entry::{Entry, EntryUpdate, NewEntry};
