use std::sync::Arc;

use tokio::sync::Mutex;

use crate::database::CatalogManager;

/// Shared state for the catalog handlers.
///
/// The manager does no locking itself, so every handler goes through this mutex
/// and requests touch the catalog one at a time. Mutations hold the lock across
/// the store write, which runs on the blocking pool.
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<Mutex<CatalogManager>>,
}

impl AppState {
    pub fn new(manager: CatalogManager) -> Self {
        Self {
            manager: Arc::new(Mutex::new(manager)),
        }
    }
}
