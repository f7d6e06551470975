//! Server binary: wires the SQLite store, templates, translation client and
//! mail worker into the axum router and serves it.
//!
//! Run with `--hash-password` to turn a password read from stdin into the
//! argon2 PHC string expected by `auth_password_hash`; nothing else runs in
//! that mode.

use std::{
  net::SocketAddr,
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use clap::Parser;
use rand_core::OsRng;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use vitae_store_sqlite::SqliteStore;
use vitae_web::{
  AppState, ServerConfig,
  auth::AuthConfig,
  mail::{LogMailer, spawn_delivery_worker},
  render::Templates,
  translate::Translator,
};

#[derive(Parser)]
#[command(author, version, about = "CV publishing server")]
struct Cli {
  /// Configuration file (TOML).
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Hash a password for `auth_password_hash` and exit.
  #[arg(long)]
  hash_password: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    )
    .init();

  let cli = Cli::parse();
  if cli.hash_password {
    return print_password_hash();
  }

  let cfg = load_config(&cli.config)?;

  let store_path = expand_tilde(&cfg.store_path);
  let store = Arc::new(
    SqliteStore::open(&store_path)
      .await
      .with_context(|| format!("failed to open store at {store_path:?}"))?,
  );

  let templates =
    Arc::new(Templates::new().context("failed to compile templates")?);
  let translator = Arc::new(
    Translator::new(cfg.deepl_api_key.clone(), cfg.deepl_api_url.clone())
      .context("failed to build translation client")?,
  );

  // Identification is optional; it only tags audit-log rows.
  let auth = match (&cfg.auth_username, &cfg.auth_password_hash) {
    (Some(username), Some(hash)) => Some(Arc::new(AuthConfig {
      username:      username.clone(),
      password_hash: hash.clone(),
    })),
    _ => None,
  };

  let mail_tx = spawn_delivery_worker(
    store.clone(),
    templates.clone(),
    LogMailer,
    cfg.mail_queue_depth,
  );

  let app = vitae_web::router(AppState {
    store,
    auth,
    templates,
    translator,
    mail_tx,
  });

  let address = format!("{}:{}", cfg.host, cfg.port);
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("listening on http://{address}");

  axum::serve(
    listener,
    app.into_make_service_with_connect_info::<SocketAddr>(),
  )
  .await
  .context("server error")?;

  Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<ServerConfig> {
  let settings = config::Config::builder()
    .add_source(config::File::from(path.to_path_buf()).required(false))
    .add_source(config::Environment::with_prefix("VITAE"))
    .build()
    .context("failed to read configuration")?;
  settings
    .try_deserialize()
    .context("configuration does not match ServerConfig")
}

/// Read a password from stdin (the prompt goes to stderr, so the hash can be
/// piped) and print its argon2 PHC string.
fn print_password_hash() -> anyhow::Result<()> {
  use std::io::{BufRead as _, Write as _};

  eprint!("Password: ");
  std::io::stderr().flush().ok();
  let mut line = String::new();
  std::io::stdin().lock().read_line(&mut line)?;
  let password = line.trim_end_matches(['\r', '\n']);

  let salt = SaltString::generate(&mut OsRng);
  let hash = Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map_err(|e| anyhow::anyhow!("argon2: {e}"))?;
  println!("{hash}");
  Ok(())
}

/// Expand a leading `~` component to `$HOME`.
fn expand_tilde(path: &Path) -> PathBuf {
  match (path.strip_prefix("~"), std::env::var_os("HOME")) {
    (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
    _ => path.to_path_buf(),
  }
}
