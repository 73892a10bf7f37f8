//! Roster lookup keyed by surname + first initial.
//!
//! Every roster entry is reachable under its current surname and, when the
//! roster records one, its previous surname. The first entry to claim a key
//! keeps it; later claimants are reported as [`AliasCollision`]s.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::models::{FacultyIdentity, RosterEntry};
use crate::utils::{first_char, normalize_whitespace, token_key, AuthorToken};

/// Two roster entries claiming the same surname + initial
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AliasCollision {
    pub key: String,
    pub kept: String,
    pub ignored: String,
}

#[derive(Debug, Clone, Default)]
pub struct RosterIndex {
    by_key: HashMap<String, FacultyIdentity>,
    departments: Vec<String>,
    collisions: Vec<AliasCollision>,
}

impl RosterIndex {
    pub fn build<'a>(entries: impl IntoIterator<Item = &'a RosterEntry>) -> Self {
        let mut index = RosterIndex::default();
        for entry in entries {
            index.insert(entry);
        }
        index
    }

    fn insert(&mut self, entry: &RosterEntry) {
        let department = normalize_whitespace(&entry.department);
        if !department.is_empty() && !self.departments.contains(&department) {
            self.departments.push(department);
        }

        let Some(initial) = first_char(&entry.first_name) else {
            warn!(last_name = %entry.last_name, "roster entry has no first name, not indexed");
            return;
        };

        let identity = entry.identity();
        let aliases = std::iter::once(entry.last_name.as_str())
            .chain(entry.previous_last_name.as_deref())
            .filter(|surname| !surname.trim().is_empty());

        let mut claimed: Vec<String> = Vec::with_capacity(2);
        for surname in aliases {
            let key = token_key(surname, initial);
            if claimed.contains(&key) {
                continue;
            }

            match self.by_key.get(&key) {
                Some(kept) => {
                    warn!(
                        key = %key,
                        kept = %kept.full_name,
                        ignored = %identity.full_name,
                        "roster alias already taken, keeping first entry"
                    );
                    self.collisions.push(AliasCollision {
                        key: key.clone(),
                        kept: kept.full_name.clone(),
                        ignored: identity.full_name.clone(),
                    });
                }
                None => {
                    self.by_key.insert(key.clone(), identity.clone());
                }
            }
            claimed.push(key);
        }
    }

    pub fn lookup(&self, token: &AuthorToken) -> Option<&FacultyIdentity> {
        self.by_key.get(&token.key())
    }

    /// Distinct department names in roster order
    pub fn departments(&self) -> &[String] {
        &self.departments
    }

    pub fn collisions(&self) -> &[AliasCollision] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
