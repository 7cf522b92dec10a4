use std::path::Path;

use chrono::Local;
use log::{debug, error, info, warn};

use super::file_db::{FileStore, StoreBackend};
use super::models::{Catalog, Category, MediaEntry, MediaRecord, NewMedia};
use crate::core::error::{CatalogError, CatalogResult};

/// Format of `creation_date`
const CREATION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Entries written to an empty store so a fresh install has something to show
const SEED_MEDIA: [(&str, &str, &str, Category); 2] = [
    (
        "The Hitchhiker's Guide to the Galaxy",
        "Douglas Adams",
        "1979-10-12",
        Category::Book,
    ),
    (
        "Inception",
        "Christopher Nolan",
        "2010-07-16",
        Category::Film,
    ),
];

/// Catalog Manager owns the in-memory catalog and keeps the store in sync with it.
///
/// Every mutation rewrites the whole store. When that write fails the mutation
/// is undone in memory, so the catalog never holds state the store does not.
/// The manager does no locking of its own; callers sharing it across tasks
/// wrap it in a mutex.
pub struct CatalogManager {
    /// Where the catalog is persisted
    store: Box<dyn StoreBackend>,

    /// Identifier to entry, in insertion order
    catalog: Catalog,
}

impl CatalogManager {
    /// Open a catalog stored in `data_dir/file_name`
    pub fn with_file(data_dir: impl AsRef<Path>, file_name: &str) -> CatalogResult<Self> {
        Self::open(Box::new(FileStore::new(data_dir, file_name)))
    }

    /// Open a catalog on top of `store`, seeding it when it holds no records
    pub fn open(store: Box<dyn StoreBackend>) -> CatalogResult<Self> {
        store.prepare()?;

        let catalog = match store.load() {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(
                    "Could not load catalog from {}: {}. Starting with an empty catalog",
                    store.location(),
                    e
                );
                Catalog::new()
            }
        };

        let mut manager = Self { store, catalog };

        if manager.catalog.is_empty() {
            manager.seed();
        }

        info!(
            "Catalog ready with {} records from {}",
            manager.catalog.len(),
            manager.store.location()
        );
        Ok(manager)
    }

    fn seed(&mut self) {
        info!("Catalog is empty, adding demonstration records");

        for (name, author, publication_date, category) in SEED_MEDIA {
            let id = self.catalog.len().saturating_add(1).to_string();
            let entry = MediaEntry {
                name: name.to_string(),
                author: author.to_string(),
                publication_date: publication_date.to_string(),
                category: category.to_string(),
                creation_date: now(),
            };
            self.catalog.insert(id, entry);
        }

        if let Err(e) = self.store.save(&self.catalog) {
            error!("Failed to persist demonstration records: {}", e);
        }
    }

    /// All records, in catalog order
    pub fn list_all(&self) -> Vec<MediaRecord> {
        self.catalog
            .iter()
            .map(|(id, entry)| MediaRecord::new(id.clone(), entry.clone()))
            .collect()
    }

    /// Records whose category is exactly `category`, in catalog order.
    /// The argument is not checked against the known categories.
    pub fn list_by_category(&self, category: &str) -> Vec<MediaRecord> {
        self.catalog
            .iter()
            .filter(|(_, entry)| entry.category == category)
            .map(|(id, entry)| MediaRecord::new(id.clone(), entry.clone()))
            .collect()
    }

    /// The record stored under `id`
    pub fn get_by_id(&self, id: &str) -> Option<MediaRecord> {
        self.catalog
            .get(id)
            .map(|entry| MediaRecord::new(id, entry.clone()))
    }

    /// First record, in catalog order, whose name equals `name` ignoring case
    pub fn search_by_name(&self, name: &str) -> Option<MediaRecord> {
        let wanted = name.to_lowercase();

        self.catalog
            .iter()
            .find(|(_, entry)| entry.name.to_lowercase() == wanted)
            .map(|(id, entry)| MediaRecord::new(id.clone(), entry.clone()))
    }

    /// Add a record and persist the catalog
    pub fn add(&mut self, media: NewMedia) -> CatalogResult<MediaRecord> {
        let category: Category = media.category.parse()?;
        let id = self.next_id()?;

        let entry = MediaEntry {
            name: media.name,
            author: media.author,
            publication_date: media.publication_date,
            category: category.to_string(),
            creation_date: now(),
        };

        self.catalog.insert(id.clone(), entry.clone());

        if let Err(e) = self.store.save(&self.catalog) {
            error!("Failed to persist new record {}: {}", id, e);
            self.catalog.shift_remove(&id);
            return Err(e);
        }

        debug!("Added record {} ({})", id, entry.name);
        Ok(MediaRecord::new(id, entry))
    }

    /// Delete the record stored under `id` and persist the catalog.
    /// Returns `false` when there is no such record.
    pub fn delete(&mut self, id: &str) -> CatalogResult<bool> {
        let Some((index, key, entry)) = self.catalog.shift_remove_full(id) else {
            return Ok(false);
        };

        if let Err(e) = self.store.save(&self.catalog) {
            error!("Failed to persist deletion of record {}: {}", key, e);
            self.catalog.shift_insert(index, key, entry);
            return Err(e);
        }

        debug!("Deleted record {}", key);
        Ok(true)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// One past the largest all-digit key, or 1 when there is none.
    /// An all-digit key beyond `u64` exhausts the id space like `u64::MAX` does.
    fn next_id(&self) -> CatalogResult<String> {
        let mut max: Option<u64> = None;
        for key in self.catalog.keys() {
            if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            let value = key
                .parse::<u64>()
                .map_err(|_| CatalogError::IdSpaceExhausted)?;
            max = max.max(Some(value));
        }

        match max {
            None => Ok("1".to_string()),
            Some(max) => max
                .checked_add(1)
                .map(|next| next.to_string())
                .ok_or(CatalogError::IdSpaceExhausted),
        }
    }
}

fn now() -> String {
    Local::now().format(CREATION_DATE_FORMAT).to_string()
}
