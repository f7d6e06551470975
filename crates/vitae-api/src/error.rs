//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  /// A field-scoped validation failure: missing required field or a natural
  /// key already in use. The response body names the field.
  #[error("validation failed on {field}: {message}")]
  Validation { field: String, message: String },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Map a store-backend error through the core taxonomy, so duplicate
  /// natural keys surface as field-scoped 400s and unknown ids as 404s.
  pub fn from_store<E: Into<vitae_core::Error>>(e: E) -> Self {
    ApiError::from(e.into())
  }
}

impl From<vitae_core::Error> for ApiError {
  fn from(e: vitae_core::Error) -> Self {
    use vitae_core::Error as E;
    match e {
      E::SkillNotFound(id) => ApiError::NotFound(format!("skill {id} not found")),
      E::ProjectNotFound(id) => {
        ApiError::NotFound(format!("project {id} not found"))
      }
      E::ContactNotFound(id) => {
        ApiError::NotFound(format!("contact {id} not found"))
      }
      E::CvNotFound(id) => {
        ApiError::NotFound(format!("curriculum vitae {id} not found"))
      }
      E::DuplicateSkillName(name) => ApiError::Validation {
        field:   "name".to_string(),
        message: format!("skill with name {name:?} already exists"),
      },
      E::DuplicateProjectName(name) => ApiError::Validation {
        field:   "name".to_string(),
        message: format!("project with name {name:?} already exists"),
      },
      E::DuplicateContact { kind, link } => ApiError::Validation {
        field:   "contact_link".to_string(),
        message: format!(
          "contact with type {kind:?} and contact_link {link:?} already exists"
        ),
      },
      E::Store(msg) => ApiError::Store(msg.into()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::NotFound(m) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": m }))).into_response()
      }
      ApiError::Validation { field, message } => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": message, "field": field })),
      )
        .into_response(),
      ApiError::Store(e) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
      )
        .into_response(),
    }
  }
}

/// Unwrap an optional body field, or produce the field-scoped 400.
pub(crate) fn require<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
  value.ok_or_else(|| ApiError::Validation {
    field:   field.to_string(),
    message: "this field is required".to_string(),
  })
}
