//! Student Records Service Library
//!
//! This library crate defines the modules behind the student-records REST API.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The service is composed of a few loosely coupled subsystems:
//!
//! - **`students`**: The query side. Builds a `StudentQuery` from optional request
//!   parameters (id lookup, `active`/`course`/`age` filters, a sort) and dispatches it.
//! - **`storage`**: The `StudentStore` seam and its in-memory implementation, which keeps
//!   records in natural insertion order.
//! - **`ingestion`**: Bulk import from the external student source, disabled by default.
//! - **`auth`**: Static shared-secret bearer check in front of the `/students` routes.
//! - **`config`**: Environment-driven settings loaded once at startup.
//! - **`error`**: `AppError`, mapped to HTTP status codes and `{"message": ...}` bodies.
//! - **`server`**: Router assembly, the store lifecycle and graceful shutdown.

pub mod auth;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod server;
pub mod storage;
pub mod students;
