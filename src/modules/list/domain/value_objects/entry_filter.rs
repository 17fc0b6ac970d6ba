use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::modules::entry::domain::Entry;
use crate::shared::errors::AppError;

/// Completion filter over a list's entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryFilter {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl EntryFilter {
    pub fn matches(&self, entry: &Entry) -> bool {
        match self {
            EntryFilter::All => true,
            EntryFilter::Completed => entry.completed,
            EntryFilter::Incomplete => !entry.completed,
        }
    }
}

impl FromStr for EntryFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(EntryFilter::All),
            "completed" => Ok(EntryFilter::Completed),
            "incomplete" => Ok(EntryFilter::Incomplete),
            other => Err(AppError::ValidationError(format!(
                "Unknown filter '{}', expected all, completed or incomplete",
                other
            ))),
        }
    }
}

impl fmt::Display for EntryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntryFilter::All => "all",
            EntryFilter::Completed => "completed",
            EntryFilter::Incomplete => "incomplete",
        };
        write!(f, "{}", s)
    }
}
