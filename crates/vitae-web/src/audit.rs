//! Request-audit middleware.
//!
//! Every request gets one append-only log row, written before dispatch so
//! that 404s and handler failures are recorded too. Two prefixes are
//! excluded: the admin area and the log view itself (reading the log must
//! not grow it).

use std::net::SocketAddr;

use axum::{
  extract::{ConnectInfo, Request, State},
  middleware::Next,
  response::Response,
};
use vitae_core::{audit::NewRequestLog, store::CvStore};

use crate::{AppState, auth};

fn is_excluded(path: &str) -> bool {
  path.starts_with("/admin/") || path.starts_with("/logs/")
}

/// Record one log row, then dispatch.
///
/// Logging is best-effort: a failed write is reported via `tracing::warn!`
/// and the request proceeds regardless.
pub async fn log_request<S>(
  State(state): State<AppState<S>>,
  request: Request,
  next: Next,
) -> Response
where
  S: CvStore + Clone + 'static,
{
  let path = request.uri().path().to_string();
  if is_excluded(&path) {
    return next.run(request).await;
  }

  let entry = NewRequestLog {
    method:       request.method().to_string(),
    path,
    query_string: request.uri().query().unwrap_or("").to_string(),
    remote_ip:    remote_ip(&request),
    user:         auth::identify(request.headers(), state.auth.as_deref()),
  };

  if let Err(e) = state.store.record_request(entry).await {
    tracing::warn!(error = %e, "failed to record request log");
  }

  next.run(request).await
}

/// Client address: the first `X-Forwarded-For` entry wins, else the socket
/// peer (absent when the server runs without connect info, e.g. in tests).
fn remote_ip(request: &Request) -> Option<String> {
  if let Some(forwarded) = request
    .headers()
    .get("x-forwarded-for")
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.split(',').next())
    .map(str::trim)
    .filter(|s| !s.is_empty())
  {
    return Some(forwarded.to_string());
  }
  request
    .extensions()
    .get::<ConnectInfo<SocketAddr>>()
    .map(|info| info.0.ip().to_string())
}
