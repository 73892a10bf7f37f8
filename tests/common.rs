#![allow(dead_code)]

use axum::Router;
use pubtrack::{router, AppState, Settings};
use rust_xlsxwriter::Workbook;

pub const INSTITUTION: &str = "University of Chicago";

pub const ROSTER_HEADERS: [&str; 5] = [
    " --FIRST NAME",
    " LAST NAME",
    " PREVIOUS LAST NAME",
    " DEPARTMENT NAME",
    "FACULTY TRACK",
];

pub const PUBLICATION_HEADER: &str =
    "Authors,Title,Year,Source title,Link,Affiliations,Authors with affiliations,Correspondence Address";

/// Create the application router for testing
pub fn create_test_app() -> Router {
    let settings = Settings {
        institution: INSTITUTION.to_string(),
        ..Settings::default()
    };
    router(AppState::new(settings))
}

/// Roster workbook in the raw export layout
pub fn roster_xlsx(rows: &[[&str; 5]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in ROSTER_HEADERS.iter().enumerate() {
        sheet.write(0, col as u16, *header).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet.write(r as u32 + 1, col as u16, *value).unwrap();
            }
        }
    }
    workbook.save_to_buffer().unwrap()
}

/// Empty tracking workbook with a header row
pub fn template_xlsx() -> Vec<u8> {
    let headers = [
        "Corresponding Authors",
        "Corresponding Departments",
        "Corresponding Tracks",
        "Other Authors",
        "Other Departments",
        "Other Tracks",
        "Journal",
        "Title",
        "Year",
        "Link",
    ];
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Publications").unwrap();
    for (col, header) in headers.iter().enumerate() {
        sheet.write(0, col as u16, *header).unwrap();
    }
    workbook.save_to_buffer().unwrap()
}

/// Quote a CSV field
pub fn q(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// One export line: authors, title, year, journal, link, affiliated authors, correspondence
pub fn publication_line(
    authors: &str,
    title: &str,
    year: &str,
    affiliated: &str,
    correspondence: &str,
) -> String {
    [
        q(authors),
        q(title),
        year.to_string(),
        q("Journal of Tests"),
        q(&format!("https://example.org/{}", title.replace(' ', "-"))),
        q(INSTITUTION),
        q(affiliated),
        if correspondence.is_empty() {
            String::new()
        } else {
            q(correspondence)
        },
    ]
    .join(",")
}

pub fn publication_csv(lines: &[String]) -> String {
    let mut text = String::from(PUBLICATION_HEADER);
    for line in lines {
        text.push('\n');
        text.push_str(line);
    }
    text.push('\n');
    text
}
