use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::CatalogError;

/// In-memory catalog: identifier to entry, in insertion order
pub type Catalog = IndexMap<String, MediaEntry>;

/// Media categories accepted by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Book,
    Film,
    Magazine,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 3] = [Category::Book, Category::Film, Category::Magazine];

    /// The category's canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Book => "Book",
            Category::Film => "Film",
            Category::Magazine => "Magazine",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    /// Exact, case-sensitive match on the canonical name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| CatalogError::InvalidCategory(s.to_string()))
    }
}

/// A stored catalog entry. The identifier is the key it is stored under.
///
/// Every field falls back to an empty string, so one incomplete entry in a
/// hand-edited store does not make the whole file unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaEntry {
    #[serde(default)]
    pub name: String,
    /// Author or director
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub publication_date: String,
    /// Kept as text so store files with unknown categories still load
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub creation_date: String,
}

/// A catalog entry together with its identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub id: String,
    #[serde(flatten)]
    pub entry: MediaEntry,
}

impl MediaRecord {
    pub fn new(id: impl Into<String>, entry: MediaEntry) -> Self {
        Self {
            id: id.into(),
            entry,
        }
    }
}

/// Input to `CatalogManager::add`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMedia {
    pub name: String,
    pub author: String,
    pub publication_date: String,
    pub category: String,
}

impl NewMedia {
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        publication_date: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            publication_date: publication_date.into(),
            category: category.into(),
        }
    }
}
