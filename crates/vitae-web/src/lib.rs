//! The vitae web server.
//!
//! Serves the rendered CV pages, the PDF/translation/email exports and the
//! JSON API (nested under `/api`), with an audit layer recording one row per
//! request. Backed by any [`CvStore`].

pub mod audit;
pub mod auth;
pub mod error;
pub mod mail;
pub mod pages;
pub mod pdf;
pub mod render;
pub mod translate;

pub use error::WebError;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, middleware, routing::get};
use serde::Deserialize;
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;
use vitae_core::store::CvStore;

use auth::AuthConfig;
use mail::DeliveryJob;
use render::Templates;
use translate::Translator;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` plus
/// `VITAE_`-prefixed environment overrides. Every field has a default, so
/// the server starts with no config file at all.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host: String,
  #[serde(default = "default_port")]
  pub port: u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  /// Username for audit-log identification; see [`auth`].
  #[serde(default)]
  pub auth_username: Option<String>,
  /// argon2 PHC string; generate with `server --hash-password`.
  #[serde(default)]
  pub auth_password_hash: Option<String>,
  /// DeepL-compatible API key. Absent means the translate endpoint reports
  /// itself unconfigured.
  #[serde(default)]
  pub deepl_api_key: Option<String>,
  /// Endpoint override; when unset the URL is derived from the key shape.
  #[serde(default)]
  pub deepl_api_url: Option<String>,
  #[serde(default = "default_mail_queue_depth")]
  pub mail_queue_depth: usize,
}

fn default_host() -> String {
  "127.0.0.1".to_string()
}

fn default_port() -> u16 {
  8000
}

fn default_store_path() -> PathBuf {
  PathBuf::from("vitae.db")
}

fn default_mail_queue_depth() -> usize {
  32
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:               default_host(),
      port:               default_port(),
      store_path:         default_store_path(),
      auth_username:      None,
      auth_password_hash: None,
      deepl_api_key:      None,
      deepl_api_url:      None,
      mail_queue_depth:   default_mail_queue_depth(),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: CvStore> {
  pub store:      Arc<S>,
  /// Credentials for audit identification, when configured.
  pub auth:       Option<Arc<AuthConfig>>,
  pub templates:  Arc<Templates>,
  pub translator: Arc<Translator>,
  pub mail_tx:    mpsc::Sender<DeliveryJob>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the whole site: pages, exports, the JSON
/// API under `/api`, and the audit layer around all of it (404s included).
pub fn router<S>(state: AppState<S>) -> Router
where
  S: CvStore + Clone + 'static,
{
  let api = vitae_api::api_router(state.store.clone());

  Router::new()
    .route("/",                   get(pages::list_page::<S>))
    .route("/cv/{id}",            get(pages::detail_page::<S>))
    .route("/cv/{id}/pdf/",       get(pdf::pdf_page::<S>))
    .route("/cv/{id}/translate/", get(translate::translate_page::<S>))
    .route("/cv/{id}/email/",     get(mail::email_cv::<S>))
    .route("/logs/",              get(pages::logs_page::<S>))
    .with_state(state.clone())
    .nest("/api", api)
    .layer(middleware::from_fn_with_state(state, audit::log_request::<S>))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
