//! Students Module
//!
//! The query side of the service: everything between the `GET /students` query string
//! and the JSON the dashboard receives.
//!
//! ## Responsibilities
//! - **Query building**: Parsing optional `id`, `active`, `course`, `age`, `sort` and
//!   `order` parameters into a single `StudentQuery`.
//! - **Dispatch**: Running the query against a `StudentStore` and mapping the outcome
//!   to a response or an `AppError`.
//! - **Stats**: Summarising a result set into the numbers the dashboard charts.
//!
//! ## Submodules
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`query`**: Filter and sort composition.
//! - **`stats`**: Aggregates over a result set.
//! - **`types`**: The `StudentRecord` entity and response DTOs.

pub mod handlers;
pub mod query;
pub mod stats;
pub mod types;
