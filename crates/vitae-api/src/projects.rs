//! Handlers for `/projects/` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/projects/` | All projects |
//! | `POST`   | `/projects/` | Body: `{"name":..,"description":..}`; duplicate name → 400 |
//! | `GET`    | `/projects/{id}/` | 404 if not found |
//! | `PUT`    | `/projects/{id}/` | Full update; both fields required |
//! | `PATCH`  | `/projects/{id}/` | Partial update |
//! | `DELETE` | `/projects/{id}/` | 204; detaches the project from all CVs |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use vitae_core::{
  entity::{Project, ProjectInput, ProjectPatch},
  store::CvStore,
};

use crate::error::{ApiError, require};

/// JSON body accepted by project writes.
#[derive(Debug, Deserialize)]
pub struct ProjectBody {
  pub name:        Option<String>,
  pub description: Option<String>,
}

impl ProjectBody {
  pub(crate) fn into_input(self) -> Result<ProjectInput, ApiError> {
    Ok(ProjectInput {
      name:        require(self.name, "name")?,
      description: require(self.description, "description")?,
    })
  }
}

// ─── Collection ───────────────────────────────────────────────────────────────

/// `GET /projects/`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Project>>, ApiError>
where
  S: CvStore,
{
  let projects = store.list_projects().await.map_err(ApiError::from_store)?;
  Ok(Json(projects))
}

/// `POST /projects/` — returns 201 + the stored row.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<ProjectBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CvStore,
{
  let project = store
    .create_project(body.into_input()?)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(project)))
}

// ─── Single resource ──────────────────────────────────────────────────────────

/// `GET /projects/{id}/`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Project>, ApiError>
where
  S: CvStore,
{
  let project = store
    .get_project(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("project {id} not found")))?;
  Ok(Json(project))
}

/// `PUT /projects/{id}/`
pub async fn put_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<ProjectBody>,
) -> Result<Json<Project>, ApiError>
where
  S: CvStore,
{
  let input = body.into_input()?;
  let project = store
    .update_project(
      id,
      ProjectPatch {
        name:        Some(input.name),
        description: Some(input.description),
      },
    )
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(project))
}

/// `PATCH /projects/{id}/`
pub async fn patch_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<ProjectBody>,
) -> Result<Json<Project>, ApiError>
where
  S: CvStore,
{
  let project = store
    .update_project(
      id,
      ProjectPatch { name: body.name, description: body.description },
    )
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(project))
}

/// `DELETE /projects/{id}/`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: CvStore,
{
  store
    .delete_project(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
