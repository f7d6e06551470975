//! Handlers for `/skills/` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/skills/` | All skills |
//! | `POST`   | `/skills/` | Body: `{"name":"Rust"}`; duplicate name → 400 |
//! | `GET`    | `/skills/{id}/` | 404 if not found |
//! | `PUT`    | `/skills/{id}/` | Full update; `name` required |
//! | `PATCH`  | `/skills/{id}/` | Partial update |
//! | `DELETE` | `/skills/{id}/` | 204; detaches the skill from all CVs |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use vitae_core::{
  entity::{Skill, SkillInput, SkillPatch},
  store::CvStore,
};

use crate::error::{ApiError, require};

/// JSON body accepted by skill writes. Fields optional here so a missing one
/// is reported as a field-scoped 400 rather than a deserialisation error.
#[derive(Debug, Deserialize)]
pub struct SkillBody {
  pub name: Option<String>,
}

impl SkillBody {
  pub(crate) fn into_input(self) -> Result<SkillInput, ApiError> {
    Ok(SkillInput { name: require(self.name, "name")? })
  }
}

// ─── Collection ───────────────────────────────────────────────────────────────

/// `GET /skills/`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Skill>>, ApiError>
where
  S: CvStore,
{
  let skills = store.list_skills().await.map_err(ApiError::from_store)?;
  Ok(Json(skills))
}

/// `POST /skills/` — returns 201 + the stored row.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<SkillBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CvStore,
{
  let skill = store
    .create_skill(body.into_input()?)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(skill)))
}

// ─── Single resource ──────────────────────────────────────────────────────────

/// `GET /skills/{id}/`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Skill>, ApiError>
where
  S: CvStore,
{
  let skill = store
    .get_skill(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("skill {id} not found")))?;
  Ok(Json(skill))
}

/// `PUT /skills/{id}/`
pub async fn put_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<SkillBody>,
) -> Result<Json<Skill>, ApiError>
where
  S: CvStore,
{
  let input = body.into_input()?;
  let skill = store
    .update_skill(id, SkillPatch { name: Some(input.name) })
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(skill))
}

/// `PATCH /skills/{id}/`
pub async fn patch_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<SkillBody>,
) -> Result<Json<Skill>, ApiError>
where
  S: CvStore,
{
  let skill = store
    .update_skill(id, SkillPatch { name: body.name })
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(skill))
}

/// `DELETE /skills/{id}/`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: CvStore,
{
  store.delete_skill(id).await.map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
