use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the bibliographic export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PublicationRecord {
    #[serde(rename = "Authors")]
    pub authors: String,
    #[serde(rename = "Authors with affiliations")]
    pub authors_with_affiliations: String,
    #[serde(rename = "Correspondence Address", default)]
    pub correspondence_address: Option<String>,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Source title")]
    pub source_title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Link")]
    pub link: String,
}

impl PublicationRecord {
    /// Correspondence address, or `None` when the cell is missing or blank
    pub fn correspondence(&self) -> Option<&str> {
        self.correspondence_address
            .as_deref()
            .filter(|address| !address.trim().is_empty())
    }
}

/// Anomaly marker raised when a fallback path was taken
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Flag {
    #[default]
    Normal,
    Strange,
}

impl Flag {
    pub fn is_strange(self) -> bool {
        self == Flag::Strange
    }
}

/// Summary row appended to the tracking workbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OutputRow {
    pub corresponding_names: String,
    pub corresponding_departments: String,
    pub corresponding_tracks: String,
    pub non_corresponding_names: String,
    pub non_corresponding_departments: String,
    pub non_corresponding_tracks: String,
    pub journal: String,
    pub title: String,
    pub year: String,
    pub link: String,
}

impl OutputRow {
    /// Cell values in workbook column order
    pub fn cells(&self) -> [&str; 10] {
        [
            &self.corresponding_names,
            &self.corresponding_departments,
            &self.corresponding_tracks,
            &self.non_corresponding_names,
            &self.non_corresponding_departments,
            &self.non_corresponding_tracks,
            &self.journal,
            &self.title,
            &self.year,
            &self.link,
        ]
    }
}

/// Output row together with the flags that drive highlighting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReconciledRow {
    pub row: OutputRow,
    pub parsing_flag: Flag,
    pub correspondence_flag: Flag,
}

impl ReconciledRow {
    pub fn highlight(&self) -> Option<Highlight> {
        Highlight::from_flags(self.parsing_flag, self.correspondence_flag)
    }
}

/// Row fill applied in the output workbook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum Highlight {
    /// Both parsing and correspondence fell back
    Both,
    /// Corresponding author taken from the last listed author
    Correspondence,
    /// At least one author recovered from the plain author list
    Parsing,
}

impl Highlight {
    pub fn from_flags(parsing: Flag, correspondence: Flag) -> Option<Self> {
        match (parsing, correspondence) {
            (Flag::Strange, Flag::Strange) => Some(Highlight::Both),
            (Flag::Normal, Flag::Strange) => Some(Highlight::Correspondence),
            (Flag::Strange, Flag::Normal) => Some(Highlight::Parsing),
            (Flag::Normal, Flag::Normal) => None,
        }
    }

    /// RGB fill colour
    pub fn rgb(self) -> u32 {
        match self {
            Highlight::Both => 0x00CCFF,
            Highlight::Correspondence => 0xFFFF99,
            Highlight::Parsing => 0x008000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_from_flags() {
        use Flag::*;
        assert_eq!(Highlight::from_flags(Strange, Strange), Some(Highlight::Both));
        assert_eq!(Highlight::from_flags(Normal, Strange), Some(Highlight::Correspondence));
        assert_eq!(Highlight::from_flags(Strange, Normal), Some(Highlight::Parsing));
        assert_eq!(Highlight::from_flags(Normal, Normal), None);
    }

    #[test]
    fn test_blank_correspondence_is_absent() {
        let mut record = PublicationRecord::default();
        assert_eq!(record.correspondence(), None);

        record.correspondence_address = Some("   ".into());
        assert_eq!(record.correspondence(), None);

        record.correspondence_address = Some("Chen, M.; Genetics".into());
        assert_eq!(record.correspondence(), Some("Chen, M.; Genetics"));
    }
}
