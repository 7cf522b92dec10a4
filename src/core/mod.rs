//! Configuration and error types shared by the server, the client and the store.

pub mod config;
pub mod error;

pub use error::{CatalogError, CatalogResult};
