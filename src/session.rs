//! Upload handshake state.
//!
//! A run needs three artifacts: the roster, the publication export and the
//! output template. They arrive one request at a time and are held here
//! until a submit takes all three out and leaves the session empty.

use crate::error::{Error, Result};
use crate::models::{PublicationRecord, RosterEntry};
use crate::tables::OutputTemplate;

#[derive(Debug, Default)]
pub struct UploadSession {
    pub roster: Option<Vec<RosterEntry>>,
    pub publications: Option<Vec<PublicationRecord>>,
    pub template: Option<OutputTemplate>,
    /// Whether the landing page shows usage information
    pub show_info: bool,
}

/// Inputs of one run, owned by the run
#[derive(Debug)]
pub struct RunInputs {
    pub roster: Vec<RosterEntry>,
    pub publications: Vec<PublicationRecord>,
    pub template: OutputTemplate,
}

/// Which artifacts are loaded: roster, publications, template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadStatus {
    pub roster: bool,
    pub publications: bool,
    pub template: bool,
}

impl UploadStatus {
    pub fn all_loaded(&self) -> bool {
        self.roster && self.publications && self.template
    }
}

impl UploadSession {
    pub fn status(&self) -> UploadStatus {
        UploadStatus {
            roster: self.roster.is_some(),
            publications: self.publications.is_some(),
            template: self.template.is_some(),
        }
    }

    /// Take all three artifacts, or none if any is still missing.
    pub fn take_inputs(&mut self) -> Result<RunInputs> {
        if self.roster.is_none() {
            return Err(Error::MissingUpload("faculty roster"));
        }
        if self.publications.is_none() {
            return Err(Error::MissingUpload("publication export"));
        }
        if self.template.is_none() {
            return Err(Error::MissingUpload("output template"));
        }

        match (self.roster.take(), self.publications.take(), self.template.take()) {
            (Some(roster), Some(publications), Some(template)) => Ok(RunInputs {
                roster,
                publications,
                template,
            }),
            _ => Err(Error::MissingUpload("run inputs")),
        }
    }
}
