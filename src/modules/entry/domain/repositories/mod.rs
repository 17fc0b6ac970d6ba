pub mod entry_repository;

pub use entry_repository::EntryRepository;
#[cfg(test)]
pub use entry_repository::MockEntryRepository;
