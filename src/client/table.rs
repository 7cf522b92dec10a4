//! Plain-text rendering of records for the terminal client.

use tabled::{Table, Tabled};

use crate::database::MediaRecord;

#[derive(Tabled)]
struct MediaRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Publication date")]
    publication_date: String,
    #[tabled(rename = "Category")]
    category: String,
}

impl From<&MediaRecord> for MediaRow {
    fn from(record: &MediaRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.entry.name.clone(),
            author: record.entry.author.clone(),
            publication_date: record.entry.publication_date.clone(),
            category: record.entry.category.clone(),
        }
    }
}

/// Render records as a table with a header row
pub fn render_table(records: &[MediaRecord]) -> String {
    let rows: Vec<MediaRow> = records.iter().map(MediaRow::from).collect();
    Table::new(rows).to_string()
}

/// Every field of one record, one per line
pub fn render_details(record: &MediaRecord) -> String {
    let entry = &record.entry;
    format!(
        "ID: {}\nName: {}\nAuthor / Director: {}\nCategory: {}\nPublication date: {}\nCreation date: {}\n",
        record.id,
        entry.name,
        entry.author,
        entry.category,
        entry.publication_date,
        entry.creation_date
    )
}
