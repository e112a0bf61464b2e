//! Storage Module
//!
//! The student collection the API reads from and ingest writes to.
//!
//! ## Core Concepts
//! - **`StudentStore`**: The seam between the HTTP layer and the document store. Queries
//!   arrive already built (`FindQuery`) and are executed by the store.
//! - **Natural order**: Records are returned in insertion order unless a sort is requested.
//! - **Lifecycle**: A single handle is created at startup and closed explicitly on shutdown.
//! - **`MemoryStore`**: Process-local implementation backed by an ordered vector and
//!   `DashMap` id indexes.

pub mod memory;
pub mod store;

pub use memory::MemoryStore;
pub use store::StudentStore;
