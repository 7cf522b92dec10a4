use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::models::Catalog;
use crate::core::error::{CatalogError, CatalogResult};

/// Storage seam between the catalog manager and the disk
#[cfg_attr(test, mockall::automock)]
pub trait StoreBackend: Send {
    /// Human-readable location, for logs
    fn location(&self) -> String;

    /// Make sure the storage location exists
    fn prepare(&self) -> CatalogResult<()>;

    /// Read the whole catalog. A missing or empty store is an empty catalog.
    fn load(&self) -> CatalogResult<Catalog>;

    /// Replace the stored catalog with `catalog`
    fn save(&self, catalog: &Catalog) -> CatalogResult<()>;
}

/// A catalog stored as one JSON object in a file
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory where the store file lives
    data_dir: PathBuf,

    /// Name of the store file
    file_name: String,
}

impl FileStore {
    /// Create a store for `data_dir/file_name`. Nothing is touched on disk yet.
    pub fn new(data_dir: impl AsRef<Path>, file_name: &str) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            file_name: file_name.to_string(),
        }
    }

    /// Get the path to the store file
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }

    fn write_to(&self, path: &Path, catalog: &Catalog) -> std::io::Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);

        let mut serializer =
            serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(b"    "));
        catalog.serialize(&mut serializer)?;

        let mut writer = serializer.into_inner();
        writer.flush()?;
        writer.get_ref().sync_all()
    }
}

impl StoreBackend for FileStore {
    fn location(&self) -> String {
        self.path().display().to_string()
    }

    fn prepare(&self) -> CatalogResult<()> {
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    fn load(&self) -> CatalogResult<Catalog> {
        let path = self.path();

        if !path.exists() {
            debug!("Store file not found at {:?}, starting with empty catalog", path);
            return Ok(Catalog::new());
        }

        let file = File::open(&path)?;
        if file.metadata()?.len() == 0 {
            debug!("Store file {:?} is empty", path);
            return Ok(Catalog::new());
        }

        info!("Loading catalog from {:?}", path);

        let reader = BufReader::new(file);
        let catalog: Catalog = serde_json::from_reader(reader)
            .map_err(|source| CatalogError::MalformedStore {
                path: path.clone(),
                source,
            })?;

        info!("Loaded {} records from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    fn save(&self, catalog: &Catalog) -> CatalogResult<()> {
        let path = self.path();
        let temp_path = path.with_extension("tmp");

        debug!("Saving {} records to {:?}", catalog.len(), path);

        // Write the full document next to the store, then swap it in
        self.write_to(&temp_path, catalog)
            .and_then(|()| fs::rename(&temp_path, &path))
            .map_err(|source| {
                let _ = fs::remove_file(&temp_path);
                CatalogError::Persistence {
                    path: path.clone(),
                    source,
                }
            })?;

        info!("Saved {} records to {:?}", catalog.len(), path);
        Ok(())
    }
}
