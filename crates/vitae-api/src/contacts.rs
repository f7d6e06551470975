//! Handlers for `/contacts/` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/contacts/` | All contacts |
//! | `POST`   | `/contacts/` | Body: `{"type":..,"contact_link":..}`; duplicate pair → 400 |
//! | `GET`    | `/contacts/{id}/` | 404 if not found |
//! | `PUT`    | `/contacts/{id}/` | Full update; both fields required |
//! | `PATCH`  | `/contacts/{id}/` | Partial update |
//! | `DELETE` | `/contacts/{id}/` | 204; cascades to CVs using this contact |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use vitae_core::{
  entity::{Contact, ContactInput, ContactPatch},
  store::CvStore,
};

use crate::error::{ApiError, require};

/// JSON body accepted by contact writes. The wire field is `type`; it maps
/// onto [`ContactInput::kind`].
#[derive(Debug, Deserialize)]
pub struct ContactBody {
  #[serde(rename = "type")]
  pub kind:         Option<String>,
  pub contact_link: Option<String>,
}

impl ContactBody {
  pub(crate) fn into_input(self) -> Result<ContactInput, ApiError> {
    Ok(ContactInput {
      kind:         require(self.kind, "type")?,
      contact_link: require(self.contact_link, "contact_link")?,
    })
  }
}

// ─── Collection ───────────────────────────────────────────────────────────────

/// `GET /contacts/`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: CvStore,
{
  let contacts = store.list_contacts().await.map_err(ApiError::from_store)?;
  Ok(Json(contacts))
}

/// `POST /contacts/` — returns 201 + the stored row.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<ContactBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CvStore,
{
  let contact = store
    .create_contact(body.into_input()?)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(contact)))
}

// ─── Single resource ──────────────────────────────────────────────────────────

/// `GET /contacts/{id}/`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Contact>, ApiError>
where
  S: CvStore,
{
  let contact = store
    .get_contact(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("contact {id} not found")))?;
  Ok(Json(contact))
}

/// `PUT /contacts/{id}/`
pub async fn put_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<ContactBody>,
) -> Result<Json<Contact>, ApiError>
where
  S: CvStore,
{
  let input = body.into_input()?;
  let contact = store
    .update_contact(
      id,
      ContactPatch {
        kind:         Some(input.kind),
        contact_link: Some(input.contact_link),
      },
    )
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(contact))
}

/// `PATCH /contacts/{id}/`
pub async fn patch_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<ContactBody>,
) -> Result<Json<Contact>, ApiError>
where
  S: CvStore,
{
  let contact = store
    .update_contact(
      id,
      ContactPatch { kind: body.kind, contact_link: body.contact_link },
    )
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(contact))
}

/// `DELETE /contacts/{id}/`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: CvStore,
{
  store
    .delete_contact(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
