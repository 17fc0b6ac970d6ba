pub mod service;

pub use service::{ListService, ResetSummary};
