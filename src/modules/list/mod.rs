pub mod application;
pub mod domain;
pub mod handlers;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::{ListService, ResetSummary};
pub use domain::{EntryFilter, List, ListDetail, ListRepository, ListUpdate, NewList};
pub use infrastructure::ListRepositoryImpl;
