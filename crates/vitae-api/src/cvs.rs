//! Handlers for `/curriculum-vitae/` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/curriculum-vitae/` | All CVs, fully populated |
//! | `POST`   | `/curriculum-vitae/` | Nested create; see [`CvWriteBody`] |
//! | `GET`    | `/curriculum-vitae/{id}/` | 404 if not found |
//! | `PUT`    | `/curriculum-vitae/{id}/` | Scalars required; link sets optional |
//! | `PATCH`  | `/curriculum-vitae/{id}/` | Everything optional |
//! | `DELETE` | `/curriculum-vitae/{id}/` | 204; shared rows stay |
//!
//! Writes carry desired nested state in the write-only `contacts_data`,
//! `skills_data` and `projects_data` fields; the store resolves each entry
//! to an existing row by natural key or creates it. Responses echo only the
//! resolved entities (`contact`, `skills`, `projects`), never the `*_data`
//! inputs. On update, an omitted link set is left untouched and an empty
//! list clears all links.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use vitae_core::{
  cv::{CurriculumVitae, CurriculumVitaePatch, NewCurriculumVitae},
  entity::{ProjectInput, SkillInput},
  store::CvStore,
};

use crate::{
  contacts::ContactBody,
  error::{ApiError, require},
  projects::ProjectBody,
  skills::SkillBody,
};

/// JSON body accepted by `POST`, `PUT` and `PATCH` on CV resources.
#[derive(Debug, Deserialize, Default)]
pub struct CvWriteBody {
  pub first_name:    Option<String>,
  pub last_name:     Option<String>,
  pub bio:           Option<String>,
  pub contacts_data: Option<ContactBody>,
  pub skills_data:   Option<Vec<SkillBody>>,
  pub projects_data: Option<Vec<ProjectBody>>,
}

fn skill_inputs(
  bodies: Option<Vec<SkillBody>>,
) -> Result<Option<Vec<SkillInput>>, ApiError> {
  bodies
    .map(|v| v.into_iter().map(SkillBody::into_input).collect())
    .transpose()
}

fn project_inputs(
  bodies: Option<Vec<ProjectBody>>,
) -> Result<Option<Vec<ProjectInput>>, ApiError> {
  bodies
    .map(|v| v.into_iter().map(ProjectBody::into_input).collect())
    .transpose()
}

// ─── Collection ───────────────────────────────────────────────────────────────

/// `GET /curriculum-vitae/`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<CurriculumVitae>>, ApiError>
where
  S: CvStore,
{
  let cvs = store.list_cvs().await.map_err(ApiError::from_store)?;
  Ok(Json(cvs))
}

/// `POST /curriculum-vitae/` — returns 201 + the fully populated CV.
///
/// `first_name`, `last_name`, `bio` and `contacts_data` are required; a CV
/// cannot exist without its contact.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CvWriteBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CvStore,
{
  let input = NewCurriculumVitae {
    first_name: require(body.first_name, "first_name")?,
    last_name:  require(body.last_name, "last_name")?,
    bio:        require(body.bio, "bio")?,
    contact:    require(body.contacts_data, "contacts_data")?.into_input()?,
    skills:     skill_inputs(body.skills_data)?.unwrap_or_default(),
    projects:   project_inputs(body.projects_data)?.unwrap_or_default(),
  };

  let cv = store.create_cv(input).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(cv)))
}

// ─── Single resource ──────────────────────────────────────────────────────────

/// `GET /curriculum-vitae/{id}/`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<CurriculumVitae>, ApiError>
where
  S: CvStore,
{
  let cv = store
    .get_cv(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("curriculum vitae {id} not found"))
    })?;
  Ok(Json(cv))
}

/// `PUT /curriculum-vitae/{id}/` — scalar fields required, link sets and
/// contact optional (an omitted one is left as stored).
pub async fn put_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<CvWriteBody>,
) -> Result<Json<CurriculumVitae>, ApiError>
where
  S: CvStore,
{
  let patch = CurriculumVitaePatch {
    first_name: Some(require(body.first_name, "first_name")?),
    last_name:  Some(require(body.last_name, "last_name")?),
    bio:        Some(require(body.bio, "bio")?),
    contact:    body
      .contacts_data
      .map(ContactBody::into_input)
      .transpose()?,
    skills:     skill_inputs(body.skills_data)?,
    projects:   project_inputs(body.projects_data)?,
  };

  let cv = store
    .update_cv(id, patch)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(cv))
}

/// `PATCH /curriculum-vitae/{id}/` — everything optional.
pub async fn patch_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<CvWriteBody>,
) -> Result<Json<CurriculumVitae>, ApiError>
where
  S: CvStore,
{
  let patch = CurriculumVitaePatch {
    first_name: body.first_name,
    last_name:  body.last_name,
    bio:        body.bio,
    contact:    body
      .contacts_data
      .map(ContactBody::into_input)
      .transpose()?,
    skills:     skill_inputs(body.skills_data)?,
    projects:   project_inputs(body.projects_data)?,
  };

  let cv = store
    .update_cv(id, patch)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(cv))
}

/// `DELETE /curriculum-vitae/{id}/`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: CvStore,
{
  store.delete_cv(id).await.map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
