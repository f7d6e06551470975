//! Request-log records.
//!
//! One row per inbound HTTP request, written by the audit middleware before
//! the handler runs. The table is strictly append-only: nothing in the
//! system ever updates or deletes a row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted request-log row. `timestamp` is set by the store at insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestLog {
  pub id:           i64,
  pub timestamp:    DateTime<Utc>,
  pub method:       String,
  pub path:         String,
  /// Raw query string; empty when the request carried none.
  pub query_string: String,
  pub remote_ip:    Option<String>,
  /// Username of the identified principal, if the request carried valid
  /// credentials.
  pub user:         Option<String>,
}

/// Fields the middleware supplies for a new log row.
#[derive(Debug, Clone)]
pub struct NewRequestLog {
  pub method:       String,
  pub path:         String,
  pub query_string: String,
  pub remote_ip:    Option<String>,
  pub user:         Option<String>,
}
