pub mod entities;
pub mod repositories;
pub mod services;
pub mod value_objects;

// Re-exports for easy access
pub use entities::{List, ListDetail, ListUpdate, NewList};
pub use repositories::ListRepository;
pub use value_objects::EntryFilter;
