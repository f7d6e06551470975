//! The `CvStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `vitae-store-sqlite`).
//! Higher layers (`vitae-api`, `vitae-web`) depend on this abstraction, not
//! on any concrete backend.
//!
//! Natural-key uniqueness, the nested get-or-create reconciliation and the
//! atomicity of multi-step CV writes are all obligations of the backend;
//! callers validate their inputs and hand over desired state.

use std::future::Future;

use crate::{
  audit::{NewRequestLog, RequestLog},
  cv::{CurriculumVitae, CurriculumVitaePatch, NewCurriculumVitae},
  entity::{
    Contact, ContactInput, ContactPatch, Project, ProjectInput, ProjectPatch,
    Skill, SkillInput, SkillPatch,
  },
};

/// Abstraction over a vitae entity-store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (tokio with axum).
///
/// Error contract: `get_*` methods signal an unknown id with `Ok(None)`;
/// `update_*`/`delete_*` signal it with the corresponding `*NotFound` error.
/// Flat `create_*` methods reject an already-taken natural key with the
/// corresponding `Duplicate*` error — only the nested CV reconciliation
/// performs get-or-create.
pub trait CvStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  // ── Skills ────────────────────────────────────────────────────────────

  fn create_skill(
    &self,
    input: SkillInput,
  ) -> impl Future<Output = Result<Skill, Self::Error>> + Send + '_;

  fn get_skill(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Skill>, Self::Error>> + Send + '_;

  fn list_skills(
    &self,
  ) -> impl Future<Output = Result<Vec<Skill>, Self::Error>> + Send + '_;

  fn update_skill(
    &self,
    id: i64,
    patch: SkillPatch,
  ) -> impl Future<Output = Result<Skill, Self::Error>> + Send + '_;

  fn delete_skill(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Projects ──────────────────────────────────────────────────────────

  fn create_project(
    &self,
    input: ProjectInput,
  ) -> impl Future<Output = Result<Project, Self::Error>> + Send + '_;

  fn get_project(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Project>, Self::Error>> + Send + '_;

  fn list_projects(
    &self,
  ) -> impl Future<Output = Result<Vec<Project>, Self::Error>> + Send + '_;

  fn update_project(
    &self,
    id: i64,
    patch: ProjectPatch,
  ) -> impl Future<Output = Result<Project, Self::Error>> + Send + '_;

  fn delete_project(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Contacts ──────────────────────────────────────────────────────────

  fn create_contact(
    &self,
    input: ContactInput,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  fn get_contact(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  fn list_contacts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  fn update_contact(
    &self,
    id: i64,
    patch: ContactPatch,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  fn delete_contact(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Curriculum vitae ──────────────────────────────────────────────────

  /// Create a CV from desired nested state.
  ///
  /// Resolves the contact and every skill/project input to an existing row
  /// or a fresh one (get-or-create by natural key), links them, and returns
  /// the fully populated CV. Runs as a single transaction: either all nested
  /// resolutions and the CV row commit, or none do.
  fn create_cv(
    &self,
    input: NewCurriculumVitae,
  ) -> impl Future<Output = Result<CurriculumVitae, Self::Error>> + Send + '_;

  fn get_cv(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<CurriculumVitae>, Self::Error>> + Send + '_;

  /// List all CVs, each fully populated. Implementations must batch the
  /// nested reads rather than fetching per row.
  fn list_cvs(
    &self,
  ) -> impl Future<Output = Result<Vec<CurriculumVitae>, Self::Error>> + Send + '_;

  /// Apply a partial update; see [`CurriculumVitaePatch`] for the link-set
  /// replace rules. Atomic like [`CvStore::create_cv`].
  fn update_cv(
    &self,
    id: i64,
    patch: CurriculumVitaePatch,
  ) -> impl Future<Output = Result<CurriculumVitae, Self::Error>> + Send + '_;

  /// Delete the CV row and its links. Shared skill/project/contact rows are
  /// left in place.
  fn delete_cv(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Request log ───────────────────────────────────────────────────────

  /// Append one request-log row; the store sets the timestamp.
  fn record_request(
    &self,
    entry: NewRequestLog,
  ) -> impl Future<Output = Result<RequestLog, Self::Error>> + Send + '_;

  /// The most recent rows, newest first.
  fn recent_requests(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<RequestLog>, Self::Error>> + Send + '_;
}
