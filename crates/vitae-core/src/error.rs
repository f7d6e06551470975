//! Error types for `vitae-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("skill not found: {0}")]
  SkillNotFound(i64),

  #[error("project not found: {0}")]
  ProjectNotFound(i64),

  #[error("contact not found: {0}")]
  ContactNotFound(i64),

  #[error("curriculum vitae not found: {0}")]
  CvNotFound(i64),

  #[error("skill with name {0:?} already exists")]
  DuplicateSkillName(String),

  #[error("project with name {0:?} already exists")]
  DuplicateProjectName(String),

  #[error("contact with type {kind:?} and contact_link {link:?} already exists")]
  DuplicateContact { kind: String, link: String },

  #[error("store error: {0}")]
  Store(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
