pub mod entities;
pub mod repositories;

// Re-exports for easy access
pub use entities::{Entry, EntryUpdate, NewEntry};
pub use repositories::EntryRepository;
