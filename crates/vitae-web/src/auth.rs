//! Request principal identification for the audit log.
//!
//! The site is public: requests are never rejected for missing or bad
//! credentials. When credentials are configured and a request carries a
//! matching HTTP Basic header, the username is attached to that request's
//! audit-log row.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::http::{HeaderMap, header};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;

/// Credentials recognised by this server instance.
#[derive(Clone)]
pub struct AuthConfig {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

/// Identify the principal behind a request, if any.
///
/// Returns the configured username when the request carries a valid `Basic`
/// header matching it; `None` in every other case, including a server with
/// no credentials configured.
pub fn identify(
  headers: &HeaderMap,
  config: Option<&AuthConfig>,
) -> Option<String> {
  let config = config?;

  let header_val = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
  let encoded = header_val.strip_prefix("Basic ")?;
  let decoded = B64.decode(encoded).ok()?;
  let creds = std::str::from_utf8(&decoded).ok()?;

  let (username, password) = creds.split_once(':')?;
  if username != config.username {
    return None;
  }

  let parsed_hash = PasswordHash::new(&config.password_hash).ok()?;
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .ok()?;

  Some(config.username.clone())
}

#[cfg(test)]
mod tests {
  use super::*;

  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use rand_core::OsRng;

  fn config(password: &str) -> AuthConfig {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string();
    AuthConfig {
      username:      "admin".to_string(),
      password_hash: hash,
    }
  }

  fn headers_with(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, value.parse().unwrap());
    headers
  }

  fn basic(user: &str, pass: &str) -> String {
    let encoded = B64.encode(format!("{user}:{pass}"));
    format!("Basic {encoded}")
  }

  #[test]
  fn correct_credentials_identify_the_user() {
    let cfg = config("secret");
    let headers = headers_with(&basic("admin", "secret"));
    assert_eq!(identify(&headers, Some(&cfg)), Some("admin".to_string()));
  }

  #[test]
  fn wrong_password_is_anonymous() {
    let cfg = config("secret");
    let headers = headers_with(&basic("admin", "wrong"));
    assert_eq!(identify(&headers, Some(&cfg)), None);
  }

  #[test]
  fn wrong_username_is_anonymous() {
    let cfg = config("secret");
    let headers = headers_with(&basic("other", "secret"));
    assert_eq!(identify(&headers, Some(&cfg)), None);
  }

  #[test]
  fn missing_header_is_anonymous() {
    let cfg = config("secret");
    assert_eq!(identify(&HeaderMap::new(), Some(&cfg)), None);
  }

  #[test]
  fn invalid_base64_is_anonymous() {
    let cfg = config("secret");
    let headers = headers_with("Basic !!!not-base64!!!");
    assert_eq!(identify(&headers, Some(&cfg)), None);
  }

  #[test]
  fn unconfigured_server_is_anonymous() {
    let headers = headers_with(&basic("admin", "secret"));
    assert_eq!(identify(&headers, None), None);
  }
}
