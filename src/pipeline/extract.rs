use tracing::debug;

use crate::models::{Flag, PublicationRecord};
use crate::utils::{
    parse_affiliated_entry, parse_plain_author, split_affiliated_list, split_author_list,
    AffiliatedAuthor, AuthorToken, ParseSkip,
};

/// Authors pulled out of one publication row
#[derive(Debug, Clone, Default)]
pub struct ExtractedAuthors {
    /// Authors eligible for roster matching, each with its own affiliation text
    pub candidates: Vec<AffiliatedAuthor>,
    /// Every author in listing order, affiliated or not
    pub all_authors: Vec<AuthorToken>,
    /// `Strange` when an author had to be recovered from the plain list
    pub parsing_flag: Flag,
    pub skipped: Vec<ParseSkip>,
}

/// Run the affiliated and full extraction passes over one publication.
///
/// Entries of "Authors with affiliations" that mention `institution` become
/// matching candidates. Plain "Authors" entries with no counterpart in the
/// affiliated list are appended to both lists without affiliation text.
pub fn extract_authors(record: &PublicationRecord, institution: &str) -> ExtractedAuthors {
    let mut extracted = ExtractedAuthors::default();

    for entry in split_affiliated_list(&record.authors_with_affiliations) {
        match parse_affiliated_entry(entry) {
            Ok(author) => {
                extracted.all_authors.push(author.token.clone());
                if entry.contains(institution) {
                    extracted.candidates.push(author);
                }
            }
            Err(skip) => extracted.skipped.push(skip),
        }
    }

    for entry in split_author_list(&record.authors) {
        let token = match parse_plain_author(entry) {
            Ok(token) => token,
            Err(skip) => {
                extracted.skipped.push(skip);
                continue;
            }
        };

        let key = token.key();
        if extracted.all_authors.iter().any(|known| known.key() == key) {
            continue;
        }

        debug!(author = %token, title = %record.title, "author missing from affiliation list");
        extracted.all_authors.push(token.clone());
        extracted.candidates.push(AffiliatedAuthor {
            token,
            affiliation: None,
        });
        extracted.parsing_flag = Flag::Strange;
    }

    extracted
}
