//! Ingestion Types
//!
//! Settings for the bulk import of students from the external source.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_SOURCE_URL: &str = "https://67ebf57baa794fb3222c4652.mockapi.io/eraah/students";

/// How a fetched batch is written to the store.
///
/// `Append` stores every fetched student as a new record, so repeating an
/// ingest against an unchanged source duplicates the collection. `Upsert`
/// replaces records that share the source's own `id`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IngestMode {
    #[default]
    Append,
    Upsert,
}

impl FromStr for IngestMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "append" => Ok(IngestMode::Append),
            "upsert" => Ok(IngestMode::Upsert),
            other => Err(format!("unknown ingest mode '{}', expected append or upsert", other)),
        }
    }
}

impl fmt::Display for IngestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestMode::Append => f.write_str("append"),
            IngestMode::Upsert => f.write_str("upsert"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub enabled: bool,
    pub source_url: String,
    pub mode: IngestMode,
    pub timeout: Duration,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            source_url: DEFAULT_SOURCE_URL.to_string(),
            mode: IngestMode::Append,
            timeout: Duration::from_secs(10),
        }
    }
}
