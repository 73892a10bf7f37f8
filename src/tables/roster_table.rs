//! Faculty roster loading and cleaning.
//!
//! The roster export labels its columns ` --FIRST NAME`, ` LAST NAME`,
//! ` PREVIOUS LAST NAME`, ` DEPARTMENT NAME` and `FACULTY TRACK`. Headers are
//! matched after trimming whitespace and leading dashes, ignoring case.

use std::io::{Cursor, Read};
use std::path::Path;

use calamine::{Data, Reader, Xlsx};
use tracing::{info, warn};

use super::{extension, missing_columns};
use crate::error::{Error, Result};
use crate::models::RosterEntry;
use crate::utils::{capitalize_first, normalize_department};

const FIRST_NAME: &str = "FIRST NAME";
const LAST_NAME: &str = "LAST NAME";
const PREVIOUS_LAST_NAME: &str = "PREVIOUS LAST NAME";
const DEPARTMENT_NAME: &str = "DEPARTMENT NAME";
const FACULTY_TRACK: &str = "FACULTY TRACK";

pub const ROSTER_COLUMNS: [&str; 5] = [
    FIRST_NAME,
    LAST_NAME,
    PREVIOUS_LAST_NAME,
    DEPARTMENT_NAME,
    FACULTY_TRACK,
];

/// Load a roster file, `.xlsx` or `.csv` by extension.
pub fn load_roster(path: &Path) -> Result<Vec<RosterEntry>> {
    let bytes = std::fs::read(path)?;
    let file_name = path.to_string_lossy();
    read_roster(&file_name, &bytes)
}

/// Decode uploaded roster bytes; anything not named `.csv` is read as XLSX.
pub fn read_roster(file_name: &str, bytes: &[u8]) -> Result<Vec<RosterEntry>> {
    match extension(file_name).as_str() {
        "csv" => read_roster_csv(bytes),
        _ => read_roster_xlsx(bytes),
    }
}

pub fn read_roster_xlsx(bytes: &[u8]) -> Result<Vec<RosterEntry>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(Error::EmptyWorkbook)??;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>());
    let headers = rows.next().unwrap_or_default();

    clean_roster(&headers, rows)
}

pub fn read_roster_csv(reader: impl Read) -> Result<Vec<RosterEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_string).collect::<Vec<_>>()))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    clean_roster(&headers, rows.into_iter())
}

/// Validate headers and turn raw rows into roster entries.
///
/// Rows without a faculty track are not faculty and are dropped. Names get
/// their first letter capitalized; `&` in department names becomes `and`.
pub fn clean_roster(
    headers: &[String],
    rows: impl Iterator<Item = Vec<String>>,
) -> Result<Vec<RosterEntry>> {
    let headers: Vec<String> = headers.iter().map(|h| canonical_header(h)).collect();
    let missing = missing_columns(&ROSTER_COLUMNS, &headers);
    if !missing.is_empty() {
        return Err(Error::MissingColumns {
            table: "roster",
            columns: missing,
        });
    }

    let position = |name: &str| headers.iter().position(|h| h == name).unwrap_or_default();
    let first_col = position(FIRST_NAME);
    let last_col = position(LAST_NAME);
    let previous_col = position(PREVIOUS_LAST_NAME);
    let department_col = position(DEPARTMENT_NAME);
    let track_col = position(FACULTY_TRACK);

    let mut entries = Vec::new();
    let mut without_track = 0usize;

    for (line, row) in rows.enumerate() {
        let field = |col: usize| row.get(col).map(|v| v.trim()).unwrap_or_default();

        let track = field(track_col);
        if track.is_empty() {
            without_track += 1;
            continue;
        }

        let first_name = capitalize_first(field(first_col));
        let last_name = capitalize_first(field(last_col));
        if first_name.is_empty() || last_name.is_empty() {
            warn!(row = line + 2, "roster row without first or last name dropped");
            continue;
        }

        let previous = field(previous_col);
        entries.push(RosterEntry {
            first_name,
            last_name,
            previous_last_name: (!previous.is_empty()).then(|| previous.to_string()),
            department: normalize_department(field(department_col)),
            track: track.to_string(),
        });
    }

    info!(
        entries = entries.len(),
        without_track,
        "roster loaded"
    );
    Ok(entries)
}

fn canonical_header(raw: &str) -> String {
    raw.trim()
        .trim_start_matches('-')
        .trim()
        .to_uppercase()
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}
