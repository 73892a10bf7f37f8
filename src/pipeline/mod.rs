//! Author reconciliation pipeline.
//!
//! For each publication: extract author tokens, match them against the
//! roster, split corresponding from non-corresponding authors, and aggregate
//! the result into one output row.

pub mod aggregate;
pub mod classifier;
pub mod extract;
pub mod matcher;
pub mod roster;

pub use aggregate::*;
pub use classifier::*;
pub use extract::*;
pub use matcher::*;
pub use roster::*;

use tracing::{debug, info};

use crate::models::{PublicationRecord, ReconciledRow};

/// Everything a run needs besides the publications themselves.
#[derive(Debug, Clone, Copy)]
pub struct RunContext<'a> {
    pub index: &'a RosterIndex,
    /// Text identifying the tracked institution inside affiliation entries
    pub institution: &'a str,
}

impl<'a> RunContext<'a> {
    pub fn new(index: &'a RosterIndex, institution: &'a str) -> Self {
        Self { index, institution }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub rows: Vec<ReconciledRow>,
    /// Publications without any department-affiliated author
    pub skipped_publications: usize,
}

/// Reconcile one publication; `None` when no author is department-affiliated.
pub fn reconcile_publication(
    ctx: &RunContext<'_>,
    record: &PublicationRecord,
) -> Option<ReconciledRow> {
    let extracted = extract_authors(record, ctx.institution);
    for skip in &extracted.skipped {
        debug!(title = %record.title, reason = %skip, "skipped author fragment");
    }

    let matched = match_authors(&extracted.candidates, ctx.index);
    if matched.is_empty() {
        return None;
    }

    let classification = classify(
        &matched,
        record.correspondence(),
        &extracted.all_authors,
        extracted.parsing_flag,
    );
    for skip in &classification.skipped {
        debug!(title = %record.title, reason = %skip, "skipped correspondence block");
    }

    Some(aggregate(&classification, record))
}

/// Reconcile publications in input order.
pub fn reconcile<'r>(
    ctx: &RunContext<'_>,
    records: impl IntoIterator<Item = &'r PublicationRecord>,
) -> RunReport {
    let mut report = RunReport::default();

    for record in records {
        match reconcile_publication(ctx, record) {
            Some(row) => report.rows.push(row),
            None => report.skipped_publications += 1,
        }
    }

    info!(
        rows = report.rows.len(),
        skipped = report.skipped_publications,
        "reconciliation finished"
    );
    report
}
