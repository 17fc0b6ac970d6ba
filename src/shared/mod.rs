// Shared kernel used by the list and entry modules

pub mod errors; // Shared error types
pub mod infrastructure; // Database pool and migrations
pub mod serde_helpers; // Partial-update deserialization
pub mod utils; // Logging, validation, tag colors

// Re-exports for convenience
pub use errors::{AppError, AppResult};
pub use infrastructure::Database;
