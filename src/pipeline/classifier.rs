use crate::models::{FacultyIdentity, Flag};
use crate::utils::{parse_correspondence_name, AuthorToken, ParseSkip};

use super::matcher::MatchedAuthors;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub corresponding: Vec<(AuthorToken, FacultyIdentity)>,
    pub non_corresponding: Vec<(AuthorToken, FacultyIdentity)>,
    pub parsing_flag: Flag,
    pub correspondence_flag: Flag,
    pub skipped: Vec<ParseSkip>,
}

/// Split matched authors into corresponding and non-corresponding groups.
///
/// With a correspondence address, every address block names one
/// corresponding author. Without one, the last listed author is used and the
/// correspondence flag is raised. An address naming nobody from `matched`
/// leaves the corresponding group empty and the flag `Normal`.
pub fn classify(
    matched: &MatchedAuthors,
    correspondence_address: Option<&str>,
    all_authors: &[AuthorToken],
    parsing_flag: Flag,
) -> Classification {
    let mut skipped = Vec::new();

    let (named, correspondence_flag) = match correspondence_address {
        Some(address) => {
            let mut named = Vec::new();
            for block in address.lines() {
                match parse_correspondence_name(block) {
                    Ok(token) => named.push(token),
                    Err(skip) => skipped.push(skip),
                }
            }
            (named, Flag::Normal)
        }
        None => (all_authors.last().cloned().into_iter().collect(), Flag::Strange),
    };

    let mut corresponding: Vec<(AuthorToken, FacultyIdentity)> = Vec::new();
    for token in &named {
        let key = token.key();
        if corresponding.iter().any(|(known, _)| known.key() == key) {
            continue;
        }
        if let Some(entry) = matched.get(token) {
            corresponding.push(entry.clone());
        }
    }

    let non_corresponding = matched
        .iter()
        .filter(|(token, _)| {
            let key = token.key();
            !corresponding.iter().any(|(known, _)| known.key() == key)
        })
        .cloned()
        .collect();

    Classification {
        corresponding,
        non_corresponding,
        parsing_flag,
        correspondence_flag,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str) -> FacultyIdentity {
        FacultyIdentity {
            full_name: name.into(),
            department: "Genetics".into(),
            track: "Tenure".into(),
        }
    }

    fn matched(names: &[(&str, char, &str)]) -> MatchedAuthors {
        let mut matched = MatchedAuthors::default();
        for (surname, initial, full) in names {
            matched.insert(AuthorToken::new(surname, *initial), identity(full));
        }
        matched
    }

    fn names(group: &[(AuthorToken, FacultyIdentity)]) -> Vec<&str> {
        group.iter().map(|(_, i)| i.full_name.as_str()).collect()
    }

    #[test]
    fn test_address_names_corresponding_authors() {
        let matched = matched(&[("Chen", 'M', "Maria Chen"), ("Smith", 'J', "John Smith")]);
        let result = classify(
            &matched,
            Some("Smith, J.; Genetics, University of Chicago"),
            &[],
            Flag::Normal,
        );

        assert_eq!(names(&result.corresponding), vec!["John Smith"]);
        assert_eq!(names(&result.non_corresponding), vec!["Maria Chen"]);
        assert_eq!(result.correspondence_flag, Flag::Normal);
    }

    #[test]
    fn test_multiple_address_blocks_keep_address_order() {
        let matched = matched(&[
            ("Chen", 'M', "Maria Chen"),
            ("Smith", 'J', "John Smith"),
            ("Doe", 'A', "Ann Doe"),
        ]);
        let address = "Doe, A.; Surgery\nchen, m.; Genetics\nDoe, Ann; duplicate block";
        let result = classify(&matched, Some(address), &[], Flag::Normal);

        assert_eq!(names(&result.corresponding), vec!["Ann Doe", "Maria Chen"]);
        assert_eq!(names(&result.non_corresponding), vec!["John Smith"]);
    }

    #[test]
    fn test_unparsable_blocks_are_skipped() {
        let matched = matched(&[("Chen", 'M', "Maria Chen")]);
        let result = classify(&matched, Some("Genetics only\nChen, M.; x"), &[], Flag::Normal);

        assert_eq!(names(&result.corresponding), vec!["Maria Chen"]);
        assert_eq!(result.skipped.len(), 1);
    }

    #[test]
    fn test_missing_address_uses_last_author() {
        let matched = matched(&[("Chen", 'M', "Maria Chen"), ("Smith", 'J', "John Smith")]);
        let all = vec![
            AuthorToken::new("Chen", 'M'),
            AuthorToken::new("Doe", 'A'),
            AuthorToken::new("Smith", 'J'),
        ];
        let result = classify(&matched, None, &all, Flag::Strange);

        assert_eq!(names(&result.corresponding), vec!["John Smith"]);
        assert_eq!(names(&result.non_corresponding), vec!["Maria Chen"]);
        assert_eq!(result.correspondence_flag, Flag::Strange);
        assert_eq!(result.parsing_flag, Flag::Strange);
    }

    #[test]
    fn test_missing_address_last_author_unmatched() {
        let matched = matched(&[("Chen", 'M', "Maria Chen")]);
        let all = vec![AuthorToken::new("Chen", 'M'), AuthorToken::new("Doe", 'A')];
        let result = classify(&matched, None, &all, Flag::Normal);

        assert!(result.corresponding.is_empty());
        assert_eq!(names(&result.non_corresponding), vec!["Maria Chen"]);
        assert_eq!(result.correspondence_flag, Flag::Strange);
    }

    #[test]
    fn test_address_without_matched_author_stays_normal() {
        let matched = matched(&[("Chen", 'M', "Maria Chen")]);
        let result = classify(&matched, Some("Outsider, O.; Elsewhere"), &[], Flag::Normal);

        assert!(result.corresponding.is_empty());
        assert_eq!(result.correspondence_flag, Flag::Normal);
        assert_eq!(names(&result.non_corresponding), vec!["Maria Chen"]);
    }

    #[test]
    fn test_groups_partition_matched_set() {
        let matched = matched(&[
            ("Chen", 'M', "Maria Chen"),
            ("Smith", 'J', "John Smith"),
            ("Doe", 'A', "Ann Doe"),
        ]);
        let result = classify(&matched, Some("Smith, J.; a\nDoe, A.; b"), &[], Flag::Normal);

        let mut union: Vec<_> = names(&result.corresponding);
        union.extend(names(&result.non_corresponding));
        union.sort();
        assert_eq!(union, vec!["Ann Doe", "John Smith", "Maria Chen"]);

        for name in names(&result.corresponding) {
            assert!(!names(&result.non_corresponding).contains(&name));
        }
    }
}
