//! The CV aggregate and the desired-state inputs the reconciliation works on.
//!
//! A `CurriculumVitae` read model is always fully populated: its contact and
//! both link sets are resolved by the store in batched queries, never lazily.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Contact, ContactInput, Project, ProjectInput, Skill, SkillInput};

/// A fully populated CV as read from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurriculumVitae {
  pub id:         i64,
  pub first_name: String,
  pub last_name:  String,
  pub bio:        String,
  /// Every CV has exactly one contact; the reference is set atomically with
  /// the rest of the row.
  pub contact:    Contact,
  pub skills:     Vec<Skill>,
  pub projects:   Vec<Project>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Desired state for a new CV. Nested entries are resolved to existing rows
/// by natural key, or created, inside the same transaction as the CV row.
#[derive(Debug, Clone)]
pub struct NewCurriculumVitae {
  pub first_name: String,
  pub last_name:  String,
  pub bio:        String,
  pub contact:    ContactInput,
  pub skills:     Vec<SkillInput>,
  pub projects:   Vec<ProjectInput>,
}

/// Partial update for a CV.
///
/// Scalars and the contact follow the usual patch rule: `None` means leave
/// untouched. The link sets distinguish three cases — `None` leaves the
/// existing links alone, `Some(vec![])` clears them, and a non-empty list
/// replaces them wholesale.
#[derive(Debug, Clone, Default)]
pub struct CurriculumVitaePatch {
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub bio:        Option<String>,
  pub contact:    Option<ContactInput>,
  pub skills:     Option<Vec<SkillInput>>,
  pub projects:   Option<Vec<ProjectInput>>,
}
