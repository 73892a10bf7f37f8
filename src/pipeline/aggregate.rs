use crate::models::{FacultyIdentity, OutputRow, PublicationRecord, ReconciledRow};
use crate::utils::AuthorToken;

use super::classifier::Classification;

/// Placeholder for an empty author group
pub const EMPTY_GROUP: &str = "-";

/// Build the output row for one classified publication.
pub fn aggregate(classification: &Classification, record: &PublicationRecord) -> ReconciledRow {
    let (corresponding_names, corresponding_departments, corresponding_tracks) =
        join_group(&classification.corresponding);
    let (non_corresponding_names, non_corresponding_departments, non_corresponding_tracks) =
        join_group(&classification.non_corresponding);

    ReconciledRow {
        row: OutputRow {
            corresponding_names,
            corresponding_departments,
            corresponding_tracks,
            non_corresponding_names,
            non_corresponding_departments,
            non_corresponding_tracks,
            journal: record.source_title.clone(),
            title: record.title.clone(),
            year: record.year.clone(),
            link: record.link.clone(),
        },
        parsing_flag: classification.parsing_flag,
        correspondence_flag: classification.correspondence_flag,
    }
}

fn join_group(group: &[(AuthorToken, FacultyIdentity)]) -> (String, String, String) {
    if group.is_empty() {
        return (EMPTY_GROUP.into(), EMPTY_GROUP.into(), EMPTY_GROUP.into());
    }

    let join = |field: fn(&FacultyIdentity) -> &str| {
        group
            .iter()
            .map(|(_, identity)| field(identity))
            .collect::<Vec<_>>()
            .join(", ")
    };

    (
        join(|i| i.full_name.as_str()),
        join(|i| i.department.as_str()),
        join(|i| i.track.as_str()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Flag;

    fn entry(surname: &str, full: &str, department: &str, track: &str) -> (AuthorToken, FacultyIdentity) {
        (
            AuthorToken::new(surname, full.chars().next().unwrap()),
            FacultyIdentity {
                full_name: full.into(),
                department: department.into(),
                track: track.into(),
            },
        )
    }

    fn record() -> PublicationRecord {
        PublicationRecord {
            title: "Gene regulation".into(),
            source_title: "Nature".into(),
            year: "2023".into(),
            link: "https://example.org/1".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_joins_each_group() {
        let classification = Classification {
            corresponding: vec![entry("Chen", "Maria Chen", "Genetics", "Tenure")],
            non_corresponding: vec![
                entry("Smith", "John Smith", "Surgery", "Clinical"),
                entry("Doe", "Ann Doe", "Medicine", "Research"),
            ],
            ..Default::default()
        };

        let reconciled = aggregate(&classification, &record());
        let row = &reconciled.row;
        assert_eq!(row.corresponding_names, "Maria Chen");
        assert_eq!(row.non_corresponding_names, "John Smith, Ann Doe");
        assert_eq!(row.non_corresponding_departments, "Surgery, Medicine");
        assert_eq!(row.non_corresponding_tracks, "Clinical, Research");
        assert_eq!(row.journal, "Nature");
        assert_eq!(row.title, "Gene regulation");
        assert_eq!(row.year, "2023");
        assert_eq!(row.link, "https://example.org/1");
    }

    #[test]
    fn test_empty_groups_use_dash() {
        let classification = Classification {
            non_corresponding: vec![entry("Chen", "Maria Chen", "Genetics", "Tenure")],
            correspondence_flag: Flag::Strange,
            ..Default::default()
        };

        let reconciled = aggregate(&classification, &record());
        assert_eq!(reconciled.row.corresponding_names, "-");
        assert_eq!(reconciled.row.corresponding_departments, "-");
        assert_eq!(reconciled.row.corresponding_tracks, "-");
        assert_eq!(reconciled.correspondence_flag, Flag::Strange);
        assert_eq!(reconciled.parsing_flag, Flag::Normal);
    }
}
