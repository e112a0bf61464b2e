//! Ingestion Service Module
//!
//! Populates the student collection from a fixed external HTTP endpoint.
//!
//! ## Workflow
//! 1. **Download**: Fetches the full student list from the configured source.
//! 2. **Stamp**: Every student gets the same fresh `lastUpdated`.
//! 3. **Storage**: Appends the batch to the store, or upserts by the source's `id`.
//!
//! The `POST /students/fetch` route is only mounted when ingest is enabled. In append
//! mode nothing is deduplicated: two runs against an unchanged source double the count.

pub mod handlers;
pub mod source;
pub mod types;

pub use source::{Ingestor, read_seed_file};
pub use types::{IngestConfig, IngestMode};
