use super::types::{IngestConfig, IngestMode};
use crate::storage::StudentStore;
use crate::students::types::{NewStudent, StudentRecord};

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;

/// Fetches the external student list and writes it to a store.
pub struct Ingestor {
    client: reqwest::Client,
    source_url: String,
    mode: IngestMode,
}

impl Ingestor {
    pub fn new(config: &IngestConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build ingest HTTP client")?;

        Ok(Self {
            client,
            source_url: config.source_url.clone(),
            mode: config.mode,
        })
    }

    pub async fn fetch(&self) -> Result<Vec<NewStudent>> {
        let response = self
            .client
            .get(&self.source_url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch students from {}", self.source_url))?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Student source {} responded with {}",
                self.source_url,
                response.status()
            ));
        }

        let students: Vec<NewStudent> = response
            .json()
            .await
            .context("Student source returned an unexpected payload")?;

        Ok(students)
    }

    /// One ingest pass: fetch, stamp with the current time, store.
    pub async fn run<S: StudentStore>(&self, store: &S) -> Result<Vec<StudentRecord>> {
        let students = self.fetch().await?;
        tracing::info!(
            "Fetched {} students from {} ({} mode)",
            students.len(),
            self.source_url,
            self.mode
        );

        let stamped_at = Utc::now();
        match self.mode {
            IngestMode::Append => store.insert_many(students, stamped_at).await,
            IngestMode::Upsert => store.upsert_many(students, stamped_at).await,
        }
    }
}

/// Reads a JSON array of students in the same shape the ingest source serves.
pub fn read_seed_file(path: &Path) -> Result<Vec<NewStudent>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;

    serde_json::from_str(&contents)
        .with_context(|| format!("Seed file {} is not a JSON array of students", path.display()))
}
