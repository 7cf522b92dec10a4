//! Database module for medialib
//!
//! This module implements the file-based catalog store and the
//! catalog manager that owns the in-memory records.

mod file_db;
mod manager;
mod models;

pub use file_db::{FileStore, StoreBackend};
pub use manager::CatalogManager;
pub use models::{Catalog, Category, MediaEntry, MediaRecord, NewMedia};
