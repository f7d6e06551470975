//! Error type for `vitae-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// Raised by statements running inside a transaction closure, where the
  /// `tokio_rusqlite` wrapper is not in play.
  #[error("database error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

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
}

impl From<Error> for vitae_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::SkillNotFound(id) => vitae_core::Error::SkillNotFound(id),
      Error::ProjectNotFound(id) => vitae_core::Error::ProjectNotFound(id),
      Error::ContactNotFound(id) => vitae_core::Error::ContactNotFound(id),
      Error::CvNotFound(id) => vitae_core::Error::CvNotFound(id),
      Error::DuplicateSkillName(name) => {
        vitae_core::Error::DuplicateSkillName(name)
      }
      Error::DuplicateProjectName(name) => {
        vitae_core::Error::DuplicateProjectName(name)
      }
      Error::DuplicateContact { kind, link } => {
        vitae_core::Error::DuplicateContact { kind, link }
      }
      other => vitae_core::Error::Store(other.to_string()),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
