//! Student Data Types
//!
//! The persisted `StudentRecord`, the `NewStudent` input shape used by ingest
//! and seeding, and the response DTOs of the query endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Opaque, store-assigned identifier of a student record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub String);

impl StudentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StudentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StudentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One student's enrollment data, as stored and as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: StudentId,
    pub name: String,
    pub age: u32,
    pub course: String,
    pub active: bool,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

/// A student as delivered by the ingest source or a seed file, before the
/// store assigns an id.
///
/// The source spells the course field `Course` and carries its own `id`,
/// which is kept as `source_id` and used as the natural key for upserts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub age: u32,
    #[serde(alias = "Course")]
    pub course: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default, alias = "id", skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

fn default_active() -> bool {
    true
}

impl NewStudent {
    pub fn new(name: &str, age: u32, course: &str) -> Self {
        Self {
            name: name.to_string(),
            age,
            course: course.to_string(),
            active: true,
            source_id: None,
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_source_id(mut self, source_id: &str) -> Self {
        self.source_id = Some(source_id.to_string());
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.name.trim().is_empty(), "student name must not be empty");
        anyhow::ensure!(
            !self.course.trim().is_empty(),
            "course of student '{}' must not be empty",
            self.name
        );
        Ok(())
    }

    pub fn into_record(self, id: StudentId, last_updated: DateTime<Utc>) -> StudentRecord {
        StudentRecord {
            id,
            name: self.name,
            age: self.age,
            course: self.course,
            active: self.active,
            last_updated,
            source_id: self.source_id,
        }
    }
}

/// Body of `GET /students`: a single object for id lookups, an array otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StudentsResponse {
    One(StudentRecord),
    Many(Vec<StudentRecord>),
}

impl StudentsResponse {
    pub fn into_records(self) -> Vec<StudentRecord> {
        match self {
            StudentsResponse::One(record) => vec![record],
            StudentsResponse::Many(records) => records,
        }
    }
}

/// Aggregates the dashboard charts are drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentStats {
    pub total_students: usize,
    pub active_students: usize,
    pub inactive_students: usize,
    pub average_age: f64,
    pub courses: BTreeMap<String, usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub students: usize,
}
