//! The shared portfolio entities: skills, projects and contacts.
//!
//! These rows live independently of any CV. A CV only holds references to
//! them; several CVs may point at the same row. Each entity carries a natural
//! key (`name`, or the `(type, contact_link)` pair) that the store keeps
//! globally unique.

use serde::{Deserialize, Serialize};

// ─── Skill ───────────────────────────────────────────────────────────────────

/// A named skill. `name` is globally unique, matched case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
  pub id:   i64,
  pub name: String,
}

/// Fields accepted when creating a skill through the flat CRUD surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillInput {
  pub name: String,
}

/// Partial update for a skill. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct SkillPatch {
  pub name: Option<String>,
}

// ─── Project ─────────────────────────────────────────────────────────────────

/// A portfolio project. `name` is globally unique; the description belongs to
/// whoever created the row first (nested re-references never overwrite it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
  pub id:          i64,
  pub name:        String,
  pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInput {
  pub name:        String,
  pub description: String,
}

/// Partial update for a project. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
  pub name:        Option<String>,
  pub description: Option<String>,
}

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A way of reaching a person — an email address, a profile URL, a phone
/// number. Unique per `(type, contact_link)` pair; shared between CVs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  pub id:           i64,
  /// Free-form channel label: `"email"`, `"linkedin"`, `"phone"`, …
  #[serde(rename = "type")]
  pub kind:         String,
  pub contact_link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInput {
  #[serde(rename = "type")]
  pub kind:         String,
  pub contact_link: String,
}

/// Partial update for a contact. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
  pub kind:         Option<String>,
  pub contact_link: Option<String>,
}
