pub mod list;

pub use list::{List, ListDetail, ListUpdate, NewList};
