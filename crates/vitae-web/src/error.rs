//! Error type for the page and export handlers.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{mail::MailError, translate::TranslateError};

/// Errors surfaced by the site handlers (the JSON API has its own type).
#[derive(Debug, Error)]
pub enum WebError {
  #[error("not found")]
  NotFound,

  /// A required query parameter was absent.
  #[error("missing required parameter: {0}")]
  MissingParam(&'static str),

  #[error("template rendering failed: {0}")]
  Render(#[from] minijinja::Error),

  #[error("PDF generation failed: {0}")]
  Pdf(String),

  #[error(transparent)]
  Translate(#[from] TranslateError),

  #[error(transparent)]
  Mail(#[from] MailError),

  #[error("store error: {0}")]
  Store(Box<dyn std::error::Error + Send + Sync>),
}

impl WebError {
  /// Wrap a backend error. Handlers check `Ok(None)` themselves, so whatever
  /// reaches this point is a genuine store failure.
  pub fn from_store<E>(e: E) -> Self
  where
    E: Into<vitae_core::Error>,
  {
    WebError::Store(Box::new(e.into()))
  }
}

impl IntoResponse for WebError {
  fn into_response(self) -> Response {
    match self {
      WebError::NotFound => {
        (StatusCode::NOT_FOUND, "Not Found").into_response()
      }
      WebError::MissingParam(field) => (
        StatusCode::BAD_REQUEST,
        format!("Missing required parameter: {field}"),
      )
        .into_response(),
      WebError::Render(e) => {
        tracing::error!(error = %e, "template rendering failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "template rendering failed")
          .into_response()
      }
      WebError::Pdf(e) => {
        tracing::error!(error = %e, "PDF generation failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "PDF generation failed")
          .into_response()
      }
      WebError::Translate(e) => e.into_response(),
      WebError::Mail(e) => {
        tracing::error!(error = %e, "mail transport failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "mail delivery failed")
          .into_response()
      }
      WebError::Store(e) => {
        tracing::error!(error = %e, "store error");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
          .into_response()
      }
    }
  }
}
