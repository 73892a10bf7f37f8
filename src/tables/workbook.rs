//! Tracking workbook output.
//!
//! Every worksheet of the uploaded template is copied cell by cell, keeping
//! dates, durations and formulas typed. Reconciled rows are appended after
//! the last used row of the first worksheet and then highlighted by index
//! according to their flags. Cell styling of the template is not carried over.

use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};
use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{Color, ExcelDateTime, Format, FormatPattern, Formula, Workbook, Worksheet, XlsxError};

use crate::error::{Error, Result};
use crate::models::{Highlight, ReconciledRow};

const DATE_FORMAT: &str = "yyyy-mm-dd";
const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
const TIME_FORMAT: &str = "hh:mm:ss";
const DURATION_FORMAT: &str = "[h]:mm:ss";

/// Uploaded output template
#[derive(Debug, Clone)]
pub struct OutputTemplate {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Excel serial date-time (1900 date system)
    DateTime(f64),
    /// Excel serial duration in days
    Duration(f64),
    /// Formula text without the leading `=`
    Formula(String),
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) if dt.is_duration() => Cell::Duration(dt.as_f64()),
            Data::DateTime(dt) => Cell::DateTime(dt.as_f64()),
            Data::DateTimeIso(iso) => match ExcelDateTime::parse_from_str(iso) {
                Ok(dt) => Cell::DateTime(dt.to_excel()),
                Err(_) => Cell::Text(iso.clone()),
            },
            other => Cell::Text(other.to_string()),
        }
    }
}

/// One copied worksheet
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: Vec::new(),
        }
    }

    fn load(workbook: &mut Xlsx<Cursor<&[u8]>>, name: &str) -> Result<Self> {
        let mut sheet = Sheet::new(name);

        let values = workbook.worksheet_range(name)?;
        if let Some((first_row, first_col)) = values.start() {
            for (r, row) in values.rows().enumerate() {
                for (c, data) in row.iter().enumerate() {
                    let cell = Cell::from(data);
                    if cell != Cell::Empty {
                        sheet.set(first_row as usize + r, first_col as usize + c, cell);
                    }
                }
            }
        }

        let formulas: Range<String> = workbook.worksheet_formula(name)?;
        if let Some((first_row, first_col)) = formulas.start() {
            for (r, c, formula) in formulas.used_cells() {
                let formula = formula.trim_start_matches('=').to_string();
                sheet.set(
                    first_row as usize + r,
                    first_col as usize + c,
                    Cell::Formula(formula),
                );
            }
        }

        Ok(sheet)
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, Cell::Empty);
        }
        cells[col] = cell;
    }
}

/// In-memory copy of the tracking workbook; rows go to the first worksheet
#[derive(Debug, Clone)]
pub struct TrackingWorkbook {
    sheets: Vec<Sheet>,
    highlights: Vec<(usize, Highlight)>,
}

impl TrackingWorkbook {
    pub fn new(name: &str) -> Self {
        Self {
            sheets: vec![Sheet::new(name)],
            highlights: Vec::new(),
        }
    }

    /// Copy every worksheet of an XLSX template.
    pub fn from_template(bytes: &[u8]) -> Result<Self> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
        let names = workbook.sheet_names();
        if names.is_empty() {
            return Err(Error::EmptyWorkbook);
        }

        let sheets = names
            .iter()
            .map(|name| Sheet::load(&mut workbook, name))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            sheets,
            highlights: Vec::new(),
        })
    }

    fn tracking(&self) -> &Sheet {
        &self.sheets[0]
    }

    /// Name of the worksheet rows are appended to
    pub fn name(&self) -> &str {
        &self.tracking().name
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.tracking().rows
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    /// Append a row of cells, returning its zero-based index.
    pub fn append(&mut self, cells: Vec<Cell>) -> usize {
        let rows = &mut self.sheets[0].rows;
        rows.push(cells);
        rows.len() - 1
    }

    pub fn annotate(&mut self, row: usize, highlight: Highlight) {
        self.highlights.retain(|(r, _)| *r != row);
        self.highlights.push((row, highlight));
    }

    pub fn highlight_at(&self, row: usize) -> Option<Highlight> {
        self.highlights
            .iter()
            .find(|(r, _)| *r == row)
            .map(|(_, highlight)| *highlight)
    }

    /// Append one reconciled row and highlight it when a flag is raised.
    pub fn append_reconciled(&mut self, reconciled: &ReconciledRow) -> usize {
        let cells = reconciled
            .row
            .cells()
            .iter()
            .enumerate()
            .map(|(col, value)| match col {
                YEAR_COLUMN => year_cell(value),
                _ => Cell::Text(value.to_string()),
            })
            .collect();

        let index = self.append(cells);
        if let Some(highlight) = reconciled.highlight() {
            self.annotate(index, highlight);
        }
        index
    }

    pub fn to_xlsx(&self) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();

        for (position, sheet) in self.sheets.iter().enumerate() {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&sheet.name)?;

            for (r, cells) in sheet.rows.iter().enumerate() {
                let row_fill = match position {
                    0 => self.highlight_at(r).map(fill),
                    _ => None,
                };
                for (c, cell) in cells.iter().enumerate() {
                    write_cell(worksheet, r as u32, c as u16, cell, row_fill.as_ref())?;
                }
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}

const YEAR_COLUMN: usize = 8;

fn year_cell(value: &str) -> Cell {
    match value.trim().parse::<i64>() {
        Ok(year) => Cell::Number(year as f64),
        Err(_) => Cell::Text(value.to_string()),
    }
}

fn fill(highlight: Highlight) -> Format {
    Format::new()
        .set_pattern(FormatPattern::Solid)
        .set_background_color(Color::RGB(highlight.rgb()))
}

fn datetime_format(serial: f64) -> &'static str {
    if serial < 1.0 {
        TIME_FORMAT
    } else if serial.fract() == 0.0 {
        DATE_FORMAT
    } else {
        DATETIME_FORMAT
    }
}

/// Fill plus the number format a typed cell needs, if either applies
fn cell_format(cell: &Cell, fill: Option<&Format>) -> Option<Format> {
    let num_format = match cell {
        Cell::DateTime(serial) => Some(datetime_format(*serial)),
        Cell::Duration(_) => Some(DURATION_FORMAT),
        _ => None,
    };

    match (fill, num_format) {
        (Some(fill), Some(num_format)) => Some(fill.clone().set_num_format(num_format)),
        (Some(fill), None) => Some(fill.clone()),
        (None, Some(num_format)) => Some(Format::new().set_num_format(num_format)),
        (None, None) => None,
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    fill: Option<&Format>,
) -> std::result::Result<(), XlsxError> {
    let format = cell_format(cell, fill);

    match (cell, format.as_ref()) {
        (Cell::Empty, Some(format)) => {
            worksheet.write_blank(row, col, format)?;
        }
        (Cell::Empty, None) => {}
        (Cell::Text(s), Some(format)) => {
            worksheet.write_with_format(row, col, s.as_str(), format)?;
        }
        (Cell::Text(s), None) => {
            worksheet.write(row, col, s.as_str())?;
        }
        (Cell::Number(n) | Cell::DateTime(n) | Cell::Duration(n), Some(format)) => {
            worksheet.write_number_with_format(row, col, *n, format)?;
        }
        (Cell::Number(n) | Cell::DateTime(n) | Cell::Duration(n), None) => {
            worksheet.write_number(row, col, *n)?;
        }
        (Cell::Bool(b), Some(format)) => {
            worksheet.write_with_format(row, col, *b, format)?;
        }
        (Cell::Bool(b), None) => {
            worksheet.write(row, col, *b)?;
        }
        (Cell::Formula(f), Some(format)) => {
            worksheet.write_formula_with_format(row, col, Formula::new(f), format)?;
        }
        (Cell::Formula(f), None) => {
            worksheet.write_formula(row, col, Formula::new(f))?;
        }
    }
    Ok(())
}

/// Download name for a finished run, e.g. `"(3_7_2024) tracking.xlsx"`.
pub fn download_name(template_name: &str, date: NaiveDate) -> String {
    format!(
        "({}_{}_{}) {}",
        date.month(),
        date.day(),
        date.year(),
        template_name
    )
}
