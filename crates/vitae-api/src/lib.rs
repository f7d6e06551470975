//! JSON REST API for vitae.
//!
//! Exposes an axum [`Router`] backed by any [`vitae_core::store::CvStore`].
//! Auth, audit logging and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", vitae_api::api_router(store.clone()))
//! ```
//!
//! All resource paths use trailing slashes (`/skills/`, `/skills/{id}/`),
//! matching the wire contract the site's clients already speak.

pub mod contacts;
pub mod cvs;
pub mod error;
pub mod projects;
pub mod skills;

use std::sync::Arc;

use axum::{Router, routing::get};
use vitae_core::store::CvStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CvStore + 'static,
{
  Router::new()
    // Curriculum vitae (nested writes)
    .route(
      "/curriculum-vitae/",
      get(cvs::list::<S>).post(cvs::create::<S>),
    )
    .route(
      "/curriculum-vitae/{id}/",
      get(cvs::get_one::<S>)
        .put(cvs::put_one::<S>)
        .patch(cvs::patch_one::<S>)
        .delete(cvs::delete_one::<S>),
    )
    // Skills
    .route("/skills/", get(skills::list::<S>).post(skills::create::<S>))
    .route(
      "/skills/{id}/",
      get(skills::get_one::<S>)
        .put(skills::put_one::<S>)
        .patch(skills::patch_one::<S>)
        .delete(skills::delete_one::<S>),
    )
    // Projects
    .route(
      "/projects/",
      get(projects::list::<S>).post(projects::create::<S>),
    )
    .route(
      "/projects/{id}/",
      get(projects::get_one::<S>)
        .put(projects::put_one::<S>)
        .patch(projects::patch_one::<S>)
        .delete(projects::delete_one::<S>),
    )
    // Contacts
    .route(
      "/contacts/",
      get(contacts::list::<S>).post(contacts::create::<S>),
    )
    .route(
      "/contacts/{id}/",
      get(contacts::get_one::<S>)
        .put(contacts::put_one::<S>)
        .patch(contacts::patch_one::<S>)
        .delete(contacts::delete_one::<S>),
    )
    .with_state(store)
}
