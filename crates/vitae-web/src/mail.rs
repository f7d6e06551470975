//! Email construction and the background delivery worker.
//!
//! The email endpoint only queues a job and redirects; rendering and
//! delivery happen on a worker task fed by a bounded channel. A failed job
//! is logged and dropped, never retried, and never surfaces to the request
//! that queued it.

use std::{future::Future, sync::Arc};

use axum::{
  extract::{Path, Query, State},
  response::Redirect,
};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::mpsc;
use vitae_core::store::CvStore;

use crate::{AppState, error::WebError, pdf, render::Templates};

// ─── Email ───────────────────────────────────────────────────────────────────

/// An outbound email with a single attachment.
#[derive(Debug, Clone)]
pub struct Email {
  pub to:              String,
  pub subject:         String,
  pub body:            String,
  pub attachment_name: String,
  pub attachment:      Vec<u8>,
}

#[derive(Debug, Error)]
pub enum MailError {
  #[error("mail transport error: {0}")]
  Transport(String),
}

/// Delivery transport. The shipped implementation logs; tests record.
pub trait Mailer: Send + Sync {
  fn send(
    &self,
    email: Email,
  ) -> impl Future<Output = Result<(), MailError>> + Send;
}

/// Log-only transport: reports the delivery in the log stream and drops the
/// bytes. Stands in for a real SMTP or API transport.
#[derive(Clone, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
  async fn send(&self, email: Email) -> Result<(), MailError> {
    tracing::info!(
      to = %email.to,
      subject = %email.subject,
      attachment = %email.attachment_name,
      size = email.attachment.len(),
      "mail delivery (log transport)"
    );
    Ok(())
  }
}

// ─── Worker ──────────────────────────────────────────────────────────────────

/// A queued background delivery.
#[derive(Debug)]
pub enum DeliveryJob {
  /// Render the CV as PDF and mail it to `to`.
  CvPdf { cv_id: i64, to: String },
}

/// Spawn the background delivery worker; returns the job sender.
///
/// The channel is bounded at `queue_depth`: senders wait for a slot rather
/// than growing an unbounded backlog. The worker runs until every sender is
/// dropped.
pub fn spawn_delivery_worker<S, M>(
  store: Arc<S>,
  templates: Arc<Templates>,
  mailer: M,
  queue_depth: usize,
) -> mpsc::Sender<DeliveryJob>
where
  S: CvStore + 'static,
  M: Mailer + 'static,
{
  let (tx, mut rx) = mpsc::channel(queue_depth.max(1));
  tokio::spawn(async move {
    while let Some(job) = rx.recv().await {
      if let Err(e) = run_job(&*store, &templates, &mailer, job).await {
        tracing::warn!(error = %e, "delivery job failed");
      }
    }
  });
  tx
}

async fn run_job<S, M>(
  store: &S,
  templates: &Templates,
  mailer: &M,
  job: DeliveryJob,
) -> Result<(), WebError>
where
  S: CvStore,
  M: Mailer,
{
  match job {
    DeliveryJob::CvPdf { cv_id, to } => {
      let cv = store
        .get_cv(cv_id)
        .await
        .map_err(WebError::from_store)?
        .ok_or(WebError::NotFound)?;
      let attachment = pdf::render_cv_pdf(templates, &cv)?;
      mailer
        .send(Email {
          to,
          subject: "CV PDF".to_string(),
          body: "Please find your CV attached.".to_string(),
          attachment_name: "cv.pdf".to_string(),
          attachment,
        })
        .await?;
      Ok(())
    }
  }
}

// ─── Handler ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EmailParams {
  pub email: Option<String>,
}

/// `GET /cv/{id}/email/?email=addr` — queue a PDF delivery, then redirect
/// back to the list.
pub async fn email_cv<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Query(params): Query<EmailParams>,
) -> Result<Redirect, WebError>
where
  S: CvStore + Clone + 'static,
{
  let to = params.email.ok_or(WebError::MissingParam("email"))?;

  // The job carries only the id; existence is checked before queueing.
  if state
    .store
    .get_cv(id)
    .await
    .map_err(WebError::from_store)?
    .is_none()
  {
    return Err(WebError::NotFound);
  }

  if state
    .mail_tx
    .send(DeliveryJob::CvPdf { cv_id: id, to })
    .await
    .is_err()
  {
    tracing::warn!("delivery queue is closed; job dropped");
  }

  Ok(Redirect::to("/"))
}

#[cfg(test)]
pub(crate) mod testing {
  use std::sync::{Arc, Mutex};

  use super::{Email, MailError, Mailer};

  /// Transport that records every delivery for assertions.
  #[derive(Clone, Default)]
  pub(crate) struct RecordingMailer {
    pub(crate) sent: Arc<Mutex<Vec<Email>>>,
  }

  impl Mailer for RecordingMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
      self.sent.lock().unwrap().push(email);
      Ok(())
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{testing::RecordingMailer, *};

  use std::time::Duration;

  use vitae_core::{cv::NewCurriculumVitae, entity::ContactInput};
  use vitae_store_sqlite::SqliteStore;

  async fn store_with_cv() -> (Arc<SqliteStore>, i64) {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let cv = store
      .create_cv(NewCurriculumVitae {
        first_name: "Jane".to_string(),
        last_name:  "Doe".to_string(),
        bio:        "Writes software.".to_string(),
        contact:    ContactInput {
          kind:         "email".to_string(),
          contact_link: "jane@example.com".to_string(),
        },
        skills:     vec![],
        projects:   vec![],
      })
      .await
      .unwrap();
    (Arc::new(store), cv.id)
  }

  async fn wait_for_delivery(mailer: &RecordingMailer) -> Email {
    for _ in 0..100 {
      if let Some(email) = mailer.sent.lock().unwrap().first().cloned() {
        return email;
      }
      tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("delivery did not happen");
  }

  #[tokio::test]
  async fn worker_renders_and_delivers_the_pdf() {
    let (store, cv_id) = store_with_cv().await;
    let templates = Arc::new(crate::render::Templates::new().unwrap());
    let mailer = RecordingMailer::default();
    let tx = spawn_delivery_worker(store, templates, mailer.clone(), 4);

    tx.send(DeliveryJob::CvPdf {
      cv_id,
      to: "hr@example.com".to_string(),
    })
    .await
    .unwrap();

    let email = wait_for_delivery(&mailer).await;
    assert_eq!(email.to, "hr@example.com");
    assert_eq!(email.subject, "CV PDF");
    assert_eq!(email.body, "Please find your CV attached.");
    assert_eq!(email.attachment_name, "cv.pdf");
    assert!(email.attachment.starts_with(b"%PDF-"));
  }

  #[tokio::test]
  async fn worker_survives_a_failed_job() {
    let (store, cv_id) = store_with_cv().await;
    let templates = Arc::new(crate::render::Templates::new().unwrap());
    let mailer = RecordingMailer::default();
    let tx = spawn_delivery_worker(store, templates, mailer.clone(), 4);

    // Unknown CV: logged and dropped.
    tx.send(DeliveryJob::CvPdf {
      cv_id: 9999,
      to:    "a@example.com".to_string(),
    })
    .await
    .unwrap();
    tx.send(DeliveryJob::CvPdf {
      cv_id,
      to: "b@example.com".to_string(),
    })
    .await
    .unwrap();

    let email = wait_for_delivery(&mailer).await;
    assert_eq!(email.to, "b@example.com");
    assert_eq!(mailer.sent.lock().unwrap().len(), 1);
  }
}
