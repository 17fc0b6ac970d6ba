pub mod application;
pub mod domain;
pub mod handlers;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::{EntryService, TagChange};
pub use domain::{Entry, EntryRepository, EntryUpdate, NewEntry};
pub use infrastructure::EntryRepositoryImpl;
