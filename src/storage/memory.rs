use super::store::StudentStore;
use crate::students::query::FindQuery;
use crate::students::types::{NewStudent, StudentId, StudentRecord};

use anyhow::Result;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Process-local student collection.
///
/// Records live in a vector whose order is the natural (insertion) order;
/// `positions` and `by_source` index into it. Both indexes are only written
/// while the vector's write lock is held.
pub struct MemoryStore {
    records: RwLock<Vec<StudentRecord>>,
    positions: DashMap<StudentId, usize>,
    by_source: DashMap<String, StudentId>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            positions: DashMap::new(),
            by_source: DashMap::new(),
            closed: AtomicBool::new(false),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(anyhow::anyhow!("Student store is closed"));
        }
        Ok(())
    }

    fn validate_all(students: &[NewStudent]) -> Result<()> {
        for (index, student) in students.iter().enumerate() {
            student
                .validate()
                .map_err(|e| anyhow::anyhow!("Rejected student at index {}: {}", index, e))?;
        }
        Ok(())
    }

    fn append(
        &self,
        records: &mut Vec<StudentRecord>,
        student: NewStudent,
        stamped_at: DateTime<Utc>,
    ) -> StudentRecord {
        let id = StudentId::new();
        let record = student.into_record(id.clone(), stamped_at);

        if let Some(source_id) = &record.source_id {
            self.by_source.insert(source_id.clone(), id.clone());
        }
        self.positions.insert(id, records.len());
        records.push(record.clone());

        record
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StudentStore for MemoryStore {
    async fn find_by_id(&self, id: &StudentId) -> Result<Option<StudentRecord>> {
        self.ensure_open()?;

        let Some(position) = self.positions.get(id).map(|entry| *entry.value()) else {
            return Ok(None);
        };

        let records = self.records.read().await;
        Ok(records.get(position).cloned())
    }

    async fn find(&self, query: &FindQuery) -> Result<Vec<StudentRecord>> {
        self.ensure_open()?;

        let records = self.records.read().await;
        let results = query.apply(records.iter());
        tracing::debug!(
            "FIND: {} of {} records matched {:?}",
            results.len(),
            records.len(),
            query
        );

        Ok(results)
    }

    async fn insert_many(
        &self,
        students: Vec<NewStudent>,
        stamped_at: DateTime<Utc>,
    ) -> Result<Vec<StudentRecord>> {
        self.ensure_open()?;
        Self::validate_all(&students)?;

        let mut records = self.records.write().await;
        let inserted: Vec<StudentRecord> = students
            .into_iter()
            .map(|student| self.append(&mut records, student, stamped_at))
            .collect();

        tracing::info!(
            "Inserted {} students ({} total)",
            inserted.len(),
            records.len()
        );
        Ok(inserted)
    }

    async fn upsert_many(
        &self,
        students: Vec<NewStudent>,
        stamped_at: DateTime<Utc>,
    ) -> Result<Vec<StudentRecord>> {
        self.ensure_open()?;
        Self::validate_all(&students)?;

        let mut records = self.records.write().await;
        let mut stored = Vec::with_capacity(students.len());
        let mut replaced = 0usize;

        for student in students {
            let existing = student
                .source_id
                .as_ref()
                .and_then(|source_id| self.by_source.get(source_id).map(|id| id.value().clone()))
                .and_then(|id| {
                    self.positions
                        .get(&id)
                        .map(|position| (id.clone(), *position.value()))
                });

            match existing {
                Some((id, position)) => {
                    let record = student.into_record(id, stamped_at);
                    records[position] = record.clone();
                    replaced += 1;
                    stored.push(record);
                }
                None => stored.push(self.append(&mut records, student, stamped_at)),
            }
        }

        tracing::info!(
            "Upserted {} students ({} replaced, {} total)",
            stored.len(),
            replaced,
            records.len()
        );
        Ok(stored)
    }

    async fn count(&self) -> Result<usize> {
        self.ensure_open()?;
        Ok(self.records.read().await.len())
    }

    async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        let remaining = self.records.read().await.len();
        tracing::info!("Student store closed with {} records", remaining);
        Ok(())
    }
}
