//! Core types and trait definitions for the vitae CV store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod audit;
pub mod cv;
pub mod entity;
pub mod error;
pub mod store;

pub use error::{Error, Result};
