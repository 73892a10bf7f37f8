use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::info;

use super::missing_columns;
use crate::error::{Error, Result};
use crate::models::PublicationRecord;

/// Columns the export must carry; any others are ignored.
pub const PUBLICATION_COLUMNS: [&str; 7] = [
    "Authors",
    "Authors with affiliations",
    "Correspondence Address",
    "Title",
    "Source title",
    "Year",
    "Link",
];

pub fn load_publications(path: &Path) -> Result<Vec<PublicationRecord>> {
    let file = std::fs::File::open(path)?;
    read_publications(file)
}

/// Read a bibliographic CSV export, rows in file order.
pub fn read_publications(reader: impl Read) -> Result<Vec<PublicationRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: StringRecord = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim())
        .collect();

    let present: Vec<String> = headers.iter().map(str::to_string).collect();
    let missing = missing_columns(&PUBLICATION_COLUMNS, &present);
    if !missing.is_empty() {
        return Err(Error::MissingColumns {
            table: "publication export",
            columns: missing,
        });
    }
    reader.set_headers(headers);

    let records = reader
        .deserialize::<PublicationRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    info!(publications = records.len(), "publication export loaded");
    Ok(records)
}
