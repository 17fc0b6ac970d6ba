pub mod entry_filter;

pub use entry_filter::EntryFilter;
