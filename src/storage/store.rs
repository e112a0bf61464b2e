use crate::students::query::FindQuery;
use crate::students::types::{NewStudent, StudentId, StudentRecord};

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::future::Future;

/// The document store the dispatcher executes queries against.
///
/// One handle is created at startup and shared behind an `Arc`; `close` is
/// called once the server has drained, after which every call fails.
pub trait StudentStore: Send + Sync + 'static {
    fn find_by_id(&self, id: &StudentId)
    -> impl Future<Output = Result<Option<StudentRecord>>> + Send;

    /// Returns the records matching `query`, in natural order unless the
    /// query carries a sort.
    fn find(&self, query: &FindQuery) -> impl Future<Output = Result<Vec<StudentRecord>>> + Send;

    /// Appends every student as a new record stamped with `stamped_at`.
    /// Nothing is deduplicated.
    fn insert_many(
        &self,
        students: Vec<NewStudent>,
        stamped_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<StudentRecord>>> + Send;

    /// Replaces the record with the same `source_id` in place (keeping its
    /// id and position) or appends a new one. Students without a
    /// `source_id` are always appended.
    fn upsert_many(
        &self,
        students: Vec<NewStudent>,
        stamped_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<StudentRecord>>> + Send;

    fn count(&self) -> impl Future<Output = Result<usize>> + Send;

    fn close(&self) -> impl Future<Output = Result<()>> + Send;
}
