//! Translation client for a DeepL-compatible endpoint, plus the translated
//! detail page.

use std::time::Duration;

use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use minijinja::context;
use serde::Deserialize;
use thiserror::Error;
use vitae_core::store::CvStore;

use crate::{AppState, error::WebError};

const FREE_API_URL: &str = "https://api-free.deepl.com/v2/translate";
const PRO_API_URL: &str = "https://api.deepl.com/v2/translate";

// ─── Language resolution ─────────────────────────────────────────────────────

/// Map ISO codes the upstream does not support onto the closest supported
/// target; anything else is uppercased and passed through.
pub fn resolve_lang(code: &str) -> String {
  let mapped = match code {
    "co" | "gv" | "iu" | "kl" | "liv" | "srm" | "bi" => "EN",
    "br" | "oc" => "FR",
    "rm" => "RO",
    "lad" => "ES",
    "se" => "SV",
    "hsb" => "DE",
    "csb" => "PL",
    "zza" => "TR",
    "cv" => "RU",
    "tsd" => "EL",
    other => return other.to_uppercase(),
  };
  mapped.to_string()
}

/// Pick the endpoint from the key shape: free-tier keys end in `:fx`.
fn endpoint_for_key(key: &str) -> &'static str {
  if key.ends_with(":fx") {
    FREE_API_URL
  } else {
    PRO_API_URL
  }
}

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TranslateError {
  /// No API key in the configuration.
  #[error("translation service is not configured")]
  NotConfigured,

  #[error("translation service rejected the configured credentials")]
  AuthFailed,

  #[error("translation quota exceeded")]
  QuotaExceeded,

  #[error("translation service unreachable: {0}")]
  Upstream(String),
}

impl IntoResponse for TranslateError {
  fn into_response(self) -> Response {
    let status = match &self {
      TranslateError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
      TranslateError::AuthFailed => StatusCode::FORBIDDEN,
      TranslateError::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
      TranslateError::Upstream(_) => StatusCode::BAD_GATEWAY,
    };
    (status, self.to_string()).into_response()
  }
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Async client for a DeepL-compatible `/v2/translate` endpoint.
#[derive(Clone)]
pub struct Translator {
  client:  reqwest::Client,
  api_key: Option<String>,
  /// Explicit endpoint override; when unset the URL follows the key shape.
  api_url: Option<String>,
}

#[derive(Deserialize)]
struct TranslateResponse {
  translations: Vec<Translation>,
}

#[derive(Deserialize)]
struct Translation {
  text: String,
}

impl Translator {
  pub fn new(
    api_key: Option<String>,
    api_url: Option<String>,
  ) -> Result<Self, reqwest::Error> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self {
      client,
      api_key,
      api_url,
    })
  }

  /// Translate `text` into `lang` (an ISO code; see [`resolve_lang`]).
  pub async fn translate(
    &self,
    text: &str,
    lang: &str,
  ) -> Result<String, TranslateError> {
    let key = self.api_key.as_deref().ok_or(TranslateError::NotConfigured)?;
    let url = match &self.api_url {
      Some(url) => url.clone(),
      None => endpoint_for_key(key).to_string(),
    };
    let target = resolve_lang(lang);

    let response = self
      .client
      .post(&url)
      .header("Authorization", format!("DeepL-Auth-Key {key}"))
      .form(&[("text", text), ("target_lang", target.as_str())])
      .send()
      .await
      .map_err(|e| TranslateError::Upstream(e.to_string()))?;

    let status = response.status();
    if status == StatusCode::FORBIDDEN {
      return Err(TranslateError::AuthFailed);
    }
    // 456 is the provider's private code for an exhausted quota.
    if status.as_u16() == 456 {
      return Err(TranslateError::QuotaExceeded);
    }
    if !status.is_success() {
      return Err(TranslateError::Upstream(format!(
        "unexpected status {status}"
      )));
    }

    let body: TranslateResponse = response
      .json()
      .await
      .map_err(|e| TranslateError::Upstream(e.to_string()))?;
    body
      .translations
      .into_iter()
      .next()
      .map(|t| t.text)
      .ok_or_else(|| TranslateError::Upstream("empty translations list".to_string()))
  }
}

// ─── Handler ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TranslateParams {
  pub lang: Option<String>,
}

/// `GET /cv/{id}/translate/?lang=xx` — the detail page with a translated bio.
pub async fn translate_page<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Query(params): Query<TranslateParams>,
) -> Result<Html<String>, WebError>
where
  S: CvStore + Clone + 'static,
{
  let lang = params.lang.ok_or(WebError::MissingParam("lang"))?;

  let cv = state
    .store
    .get_cv(id)
    .await
    .map_err(WebError::from_store)?
    .ok_or(WebError::NotFound)?;

  let bio = state.translator.translate(&cv.bio, &lang).await?;
  let html = state.templates.render("detail", context! { bio, cv })?;
  Ok(Html(html))
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{Json, Router, routing::post};
  use serde_json::{Value, json};

  #[test]
  fn free_keys_use_the_free_endpoint() {
    assert_eq!(endpoint_for_key("abc123:fx"), FREE_API_URL);
    assert_eq!(endpoint_for_key("abc123"), PRO_API_URL);
  }

  #[test]
  fn fallback_table_resolves_unsupported_codes() {
    assert_eq!(resolve_lang("br"), "FR");
    assert_eq!(resolve_lang("cv"), "RU");
    assert_eq!(resolve_lang("hsb"), "DE");
    assert_eq!(resolve_lang("srm"), "EN");
    assert_eq!(resolve_lang("tsd"), "EL");
  }

  #[test]
  fn supported_codes_pass_through_uppercased() {
    assert_eq!(resolve_lang("de"), "DE");
    assert_eq!(resolve_lang("pt"), "PT");
  }

  #[tokio::test]
  async fn missing_key_reports_not_configured() {
    let translator = Translator::new(None, None).unwrap();
    let err = translator.translate("hello", "de").await.unwrap_err();
    assert!(matches!(err, TranslateError::NotConfigured));
  }

  /// Serve `status` + `body` from a local endpoint, returning its URL.
  async fn spawn_stub(status: StatusCode, body: Value) -> String {
    let app = Router::new().route(
      "/v2/translate",
      post(move || {
        let body = body.clone();
        async move { (status, Json(body)) }
      }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/v2/translate")
  }

  #[tokio::test]
  async fn stub_success_returns_first_translation() {
    let url = spawn_stub(
      StatusCode::OK,
      json!({"translations": [{"text": "Hallo Welt"}]}),
    )
    .await;
    let translator = Translator::new(Some("k".to_string()), Some(url)).unwrap();
    let out = translator.translate("Hello world", "de").await.unwrap();
    assert_eq!(out, "Hallo Welt");
  }

  #[tokio::test]
  async fn stub_403_maps_to_auth_failed() {
    let url = spawn_stub(StatusCode::FORBIDDEN, json!({})).await;
    let translator = Translator::new(Some("k".to_string()), Some(url)).unwrap();
    let err = translator.translate("x", "de").await.unwrap_err();
    assert!(matches!(err, TranslateError::AuthFailed));
  }

  #[tokio::test]
  async fn stub_456_maps_to_quota_exceeded() {
    let url = spawn_stub(StatusCode::from_u16(456).unwrap(), json!({})).await;
    let translator = Translator::new(Some("k".to_string()), Some(url)).unwrap();
    let err = translator.translate("x", "de").await.unwrap_err();
    assert!(matches!(err, TranslateError::QuotaExceeded));
  }

  #[tokio::test]
  async fn unreachable_upstream_maps_to_upstream_error() {
    let translator = Translator::new(
      Some("k".to_string()),
      Some("http://127.0.0.1:1/v2/translate".to_string()),
    )
    .unwrap();
    let err = translator.translate("x", "de").await.unwrap_err();
    assert!(matches!(err, TranslateError::Upstream(_)));
  }
}
