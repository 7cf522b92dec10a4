//! Client side of the catalog: HTTP access to the API and terminal rendering.

mod http;
pub mod table;

pub use http::{CatalogClient, ClientError};
