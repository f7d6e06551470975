//! The server-rendered pages: CV list, CV detail, request log.

use axum::{
  extract::{Path, State},
  response::Html,
};
use minijinja::context;
use vitae_core::store::CvStore;

use crate::{AppState, error::WebError};

/// Number of rows shown by the request-log page.
const LOG_PAGE_ROWS: usize = 10;

/// `GET /` — every CV, with skill and project counts.
pub async fn list_page<S>(
  State(state): State<AppState<S>>,
) -> Result<Html<String>, WebError>
where
  S: CvStore + Clone + 'static,
{
  let cvs = state.store.list_cvs().await.map_err(WebError::from_store)?;
  let html = state.templates.render("list", context! { cvs })?;
  Ok(Html(html))
}

/// `GET /cv/{id}` — one CV, fully populated.
pub async fn detail_page<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Html<String>, WebError>
where
  S: CvStore + Clone + 'static,
{
  let cv = state
    .store
    .get_cv(id)
    .await
    .map_err(WebError::from_store)?
    .ok_or(WebError::NotFound)?;

  let html = state
    .templates
    .render("detail", context! { bio => cv.bio.clone(), cv })?;
  Ok(Html(html))
}

/// `GET /logs/` — the most recent audit rows, newest first.
pub async fn logs_page<S>(
  State(state): State<AppState<S>>,
) -> Result<Html<String>, WebError>
where
  S: CvStore + Clone + 'static,
{
  let logs = state
    .store
    .recent_requests(LOG_PAGE_ROWS)
    .await
    .map_err(WebError::from_store)?;
  let html = state.templates.render("logs", context! { logs })?;
  Ok(Html(html))
}
