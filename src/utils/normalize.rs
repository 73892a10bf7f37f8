//! Name normalization for author matching.
//!
//! Bibliographic exports spell each author as a surname followed by given
//! names or initials. Matching only ever compares the surname and the first
//! initial, so every parser here reduces its input to an [`AuthorToken`].
//! Fragments that cannot be reduced are reported as a [`ParseSkip`] and the
//! caller moves on to the next fragment.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Surname plus first initial of one author, as written in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorToken {
    pub surname: String,
    pub initial: char,
}

impl AuthorToken {
    pub fn new(surname: &str, initial: char) -> Self {
        Self {
            surname: surname.trim().to_string(),
            initial,
        }
    }

    /// Case-insensitive lookup key, e.g. `"chen m"`.
    ///
    /// ```
    /// use pubtrack::utils::AuthorToken;
    ///
    /// assert_eq!(AuthorToken::new("Chen", 'M').key(), "chen m");
    /// assert_eq!(AuthorToken::new("Van  Der Berg", 'J').key(), "van der berg j");
    /// ```
    pub fn key(&self) -> String {
        token_key(&self.surname, self.initial)
    }
}

impl fmt::Display for AuthorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.surname, self.initial)
    }
}

/// Build the lookup key for a surname and initial.
pub fn token_key(surname: &str, initial: char) -> String {
    let surname = normalize_whitespace(surname).to_lowercase();
    let initial: String = initial.to_lowercase().collect();
    format!("{} {}", surname, initial)
}

/// Why a fragment of author text was not turned into a token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSkip {
    #[error("empty fragment")]
    Empty,
    #[error("no surname in {0:?}")]
    MissingSurname(String),
    #[error("no given name in {0:?}")]
    MissingGivenName(String),
}

/// Author from the "Authors with affiliations" column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliatedAuthor {
    pub token: AuthorToken,
    /// Everything after the given name, e.g. `"University of Chicago, Genetics"`
    pub affiliation: Option<String>,
}

/// Parse a `"Surname, Given, affiliation..."` entry.
///
/// ```
/// use pubtrack::utils::parse_affiliated_entry;
///
/// let author = parse_affiliated_entry("Chen, M., University of Chicago, Genetics").unwrap();
/// assert_eq!(author.token.to_string(), "Chen M");
/// assert_eq!(author.affiliation.as_deref(), Some("University of Chicago, Genetics"));
/// ```
pub fn parse_affiliated_entry(entry: &str) -> Result<AffiliatedAuthor, ParseSkip> {
    let entry = entry.trim();
    if entry.is_empty() {
        return Err(ParseSkip::Empty);
    }

    let mut parts = entry.split(',').map(str::trim);
    let token = surname_and_given(parts.next(), parts.next(), entry)?;

    let affiliation = parts
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    Ok(AffiliatedAuthor {
        token,
        affiliation: (!affiliation.is_empty()).then_some(affiliation),
    })
}

/// Parse a `"Surname G."` entry from the plain "Authors" column.
///
/// The last word carries the initials; every word before it is the surname.
///
/// ```
/// use pubtrack::utils::parse_plain_author;
///
/// assert_eq!(parse_plain_author("Chen M.").unwrap().to_string(), "Chen M");
/// assert_eq!(parse_plain_author("Van Der Berg J.A.").unwrap().to_string(), "Van Der Berg J");
/// assert!(parse_plain_author("Chen").is_err());
/// ```
pub fn parse_plain_author(entry: &str) -> Result<AuthorToken, ParseSkip> {
    let words: Vec<&str> = entry.split_whitespace().collect();
    match words.as_slice() {
        [] => Err(ParseSkip::Empty),
        [_] => Err(ParseSkip::MissingGivenName(entry.trim().to_string())),
        [surname @ .., given] => {
            let initial = first_char(given)
                .ok_or_else(|| ParseSkip::MissingGivenName(entry.trim().to_string()))?;
            Ok(AuthorToken::new(&surname.join(" "), initial))
        }
    }
}

/// Parse the name at the start of one correspondence address block.
///
/// Only the text before the first `;` is considered.
///
/// ```
/// use pubtrack::utils::parse_correspondence_name;
///
/// let token = parse_correspondence_name("Chen, M.; Genetics, University of Chicago").unwrap();
/// assert_eq!(token.to_string(), "Chen M");
/// ```
pub fn parse_correspondence_name(block: &str) -> Result<AuthorToken, ParseSkip> {
    let name = block.split(';').next().unwrap_or_default().trim();
    if name.is_empty() {
        return Err(ParseSkip::Empty);
    }

    let mut parts = name.split(',').map(str::trim);
    surname_and_given(parts.next(), parts.next(), name)
}

/// Split the plain "Authors" column into entries.
///
/// Older exports separate authors with commas, newer ones with semicolons.
pub fn split_author_list(authors: &str) -> impl Iterator<Item = &str> {
    authors
        .split([',', ';'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}

/// Split the "Authors with affiliations" column into entries.
pub fn split_affiliated_list(authors: &str) -> impl Iterator<Item = &str> {
    authors
        .split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}

fn surname_and_given(
    surname: Option<&str>,
    given: Option<&str>,
    source: &str,
) -> Result<AuthorToken, ParseSkip> {
    let surname = surname
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ParseSkip::MissingSurname(source.to_string()))?;
    let initial = given
        .and_then(first_char)
        .ok_or_else(|| ParseSkip::MissingGivenName(source.to_string()))?;

    Ok(AuthorToken::new(surname, initial))
}

/// First character of a given name, ignoring leading whitespace
pub fn first_char(given: &str) -> Option<char> {
    given.trim().chars().next()
}

/// Collapse runs of whitespace into single spaces and trim.
///
/// ```
/// use pubtrack::utils::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("  Internal   Medicine "), "Internal Medicine");
/// ```
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Uppercase the first character, leave the rest untouched.
///
/// ```
/// use pubtrack::utils::capitalize_first;
///
/// assert_eq!(capitalize_first("maria"), "Maria");
/// assert_eq!(capitalize_first("mcDonald"), "McDonald");
/// ```
pub fn capitalize_first(s: &str) -> String {
    let s = s.trim();
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Department names are compared against affiliation text, which spells
/// out "and" where the roster uses an ampersand.
pub fn normalize_department(name: &str) -> String {
    normalize_whitespace(&name.replace('&', "and"))
}
