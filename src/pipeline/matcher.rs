use crate::models::{FacultyIdentity, UNKNOWN_TRACK};
use crate::utils::{AffiliatedAuthor, AuthorToken};

use super::roster::RosterIndex;

/// Department-affiliated authors of one publication, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchedAuthors {
    entries: Vec<(AuthorToken, FacultyIdentity)>,
}

impl MatchedAuthors {
    /// Insert or replace by token key; a replaced entry keeps its position.
    pub fn insert(&mut self, token: AuthorToken, identity: FacultyIdentity) {
        let key = token.key();
        match self.entries.iter_mut().find(|(known, _)| known.key() == key) {
            Some(slot) => *slot = (token, identity),
            None => self.entries.push((token, identity)),
        }
    }

    pub fn get(&self, token: &AuthorToken) -> Option<&(AuthorToken, FacultyIdentity)> {
        let key = token.key();
        self.entries.iter().find(|(known, _)| known.key() == key)
    }

    pub fn contains(&self, token: &AuthorToken) -> bool {
        self.get(token).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(AuthorToken, FacultyIdentity)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve candidates against the roster.
///
/// A roster hit on either surname alias wins. Otherwise the first roster
/// department found verbatim in the author's affiliation text produces a
/// fallback identity with an unknown track. Anything else is dropped.
pub fn match_authors(candidates: &[AffiliatedAuthor], index: &RosterIndex) -> MatchedAuthors {
    let mut matched = MatchedAuthors::default();

    for candidate in candidates {
        if let Some(identity) = resolve(candidate, index) {
            matched.insert(candidate.token.clone(), identity);
        }
    }

    matched
}

fn resolve(candidate: &AffiliatedAuthor, index: &RosterIndex) -> Option<FacultyIdentity> {
    if let Some(identity) = index.lookup(&candidate.token) {
        return Some(identity.clone());
    }

    let affiliation = candidate.affiliation.as_deref()?;
    find_department(affiliation, index).map(|_| FacultyIdentity {
        full_name: candidate.token.to_string(),
        department: affiliation.to_string(),
        track: UNKNOWN_TRACK.to_string(),
    })
}

/// First roster department, in roster order, contained in `affiliation`
/// ignoring case.
pub fn find_department<'a>(affiliation: &str, index: &'a RosterIndex) -> Option<&'a str> {
    let affiliation = affiliation.to_lowercase();
    index
        .departments()
        .iter()
        .map(String::as_str)
        .find(|department| affiliation.contains(&department.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RosterEntry;

    fn roster(departments: &[&str]) -> RosterIndex {
        let entries: Vec<RosterEntry> = departments
            .iter()
            .enumerate()
            .map(|(i, department)| RosterEntry {
                first_name: "Maria".into(),
                last_name: format!("Person{}", i),
                previous_last_name: None,
                department: department.to_string(),
                track: "Tenure".into(),
            })
            .collect();
        RosterIndex::build(&entries)
    }

    fn candidate(surname: &str, initial: char, affiliation: Option<&str>) -> AffiliatedAuthor {
        AffiliatedAuthor {
            token: AuthorToken::new(surname, initial),
            affiliation: affiliation.map(Into::into),
        }
    }

    #[test]
    fn test_roster_hit() {
        let index = roster(&["Genetics"]);
        let matched = match_authors(&[candidate("person0", 'm', None)], &index);

        assert_eq!(matched.len(), 1);
        let (_, identity) = matched.iter().next().unwrap();
        assert_eq!(identity.full_name, "Maria Person0");
        assert_eq!(identity.track, "Tenure");
    }

    #[test]
    fn test_affiliation_fallback() {
        let index = roster(&["Genetics"]);
        let affiliation = "University of Chicago, Department of Genetics, Chicago, IL";
        let matched = match_authors(&[candidate("Doe", 'A', Some(affiliation))], &index);

        let (token, identity) = matched.iter().next().unwrap();
        assert_eq!(token.to_string(), "Doe A");
        assert_eq!(
            identity,
            &FacultyIdentity {
                full_name: "Doe A".into(),
                department: affiliation.into(),
                track: "-".into(),
            }
        );
    }

    #[test]
    fn test_no_affiliation_no_fallback() {
        let index = roster(&["Genetics"]);
        let matched = match_authors(&[candidate("Doe", 'A', None)], &index);
        assert!(matched.is_empty());
    }

    #[test]
    fn test_unrelated_affiliation_is_dropped() {
        let index = roster(&["Genetics"]);
        let matched = match_authors(
            &[candidate("Doe", 'A', Some("University of Chicago, Physics"))],
            &index,
        );
        assert!(matched.is_empty());
    }

    #[test]
    fn test_department_substring_respects_roster_order() {
        let affiliation = "University of Chicago, Internal Medicine";

        let index = roster(&["Medicine", "Internal Medicine"]);
        assert_eq!(find_department(affiliation, &index), Some("Medicine"));

        let index = roster(&["Internal Medicine", "Medicine"]);
        assert_eq!(find_department(affiliation, &index), Some("Internal Medicine"));

        assert_eq!(
            find_department("University of Chicago, Department of Medicine", &index),
            Some("Medicine")
        );

        let matched = match_authors(&[candidate("Doe", 'A', Some(affiliation))], &index);
        let (_, identity) = matched.iter().next().unwrap();
        assert_eq!(identity.department, affiliation);
        assert_eq!(identity.track, "-");
    }

    #[test]
    fn test_department_match_ignores_case() {
        let affiliation = "University of Chicago, Department of Genetics";

        let index = roster(&["GENETICS"]);
        assert_eq!(find_department(affiliation, &index), Some("GENETICS"));

        let matched = match_authors(&[candidate("Doe", 'A', Some(affiliation))], &index);
        assert_eq!(matched.len(), 1);
        let (_, identity) = matched.iter().next().unwrap();
        assert_eq!(identity.department, affiliation);

        let index = roster(&["Internal medicine", "MEDICINE"]);
        assert_eq!(
            find_department("University of Chicago, INTERNAL MEDICINE", &index),
            Some("Internal medicine")
        );
    }

    #[test]
    fn test_duplicate_token_keeps_first_position() {
        let index = roster(&["Genetics", "Surgery"]);
        let matched = match_authors(
            &[
                candidate("Doe", 'A', Some("Genetics")),
                candidate("person1", 'M', None),
                candidate("DOE", 'A', Some("Surgery")),
            ],
            &index,
        );

        let names: Vec<_> = matched.iter().map(|(t, _)| t.to_string()).collect();
        assert_eq!(names, vec!["DOE A", "person1 M"]);
        assert_eq!(matched.iter().next().unwrap().1.department, "Surgery");
    }
}
