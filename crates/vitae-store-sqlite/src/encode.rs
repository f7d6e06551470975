//! Conversions between domain types and their SQLite column representations.
//!
//! Timestamps are stored as RFC 3339 strings; everything else maps onto TEXT
//! and INTEGER columns directly.

use chrono::{DateTime, Utc};
use vitae_core::{audit::RequestLog, cv::CurriculumVitae, entity::Contact};

use crate::{Error, Result};

// ─── Timestamps ──────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw columns of a `curriculum_vitae` row joined with its contact.
pub struct RawCv {
  pub id:           i64,
  pub first_name:   String,
  pub last_name:    String,
  pub bio:          String,
  pub created_at:   String,
  pub updated_at:   String,
  pub contact_id:   i64,
  pub contact_kind: String,
  pub contact_link: String,
}

impl RawCv {
  /// Assemble the full read model; link sets are fetched separately.
  pub fn into_cv(
    self,
    skills: Vec<vitae_core::entity::Skill>,
    projects: Vec<vitae_core::entity::Project>,
  ) -> Result<CurriculumVitae> {
    Ok(CurriculumVitae {
      id:         self.id,
      first_name: self.first_name,
      last_name:  self.last_name,
      bio:        self.bio,
      contact:    Contact {
        id:           self.contact_id,
        kind:         self.contact_kind,
        contact_link: self.contact_link,
      },
      skills,
      projects,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw columns of a `request_logs` row.
pub struct RawRequestLog {
  pub id:           i64,
  pub timestamp:    String,
  pub method:       String,
  pub path:         String,
  pub query_string: String,
  pub remote_ip:    Option<String>,
  pub user:         Option<String>,
}

impl RawRequestLog {
  pub fn into_log(self) -> Result<RequestLog> {
    Ok(RequestLog {
      id:           self.id,
      timestamp:    decode_dt(&self.timestamp)?,
      method:       self.method,
      path:         self.path,
      query_string: self.query_string,
      remote_ip:    self.remote_ip,
      user:         self.user,
    })
  }
}
