use std::{
    env, fmt::Display, fs::read_to_string, net::SocketAddr, path::PathBuf, str::FromStr,
    time::Duration,
};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::ingestion::{IngestConfig, IngestMode, types::DEFAULT_SOURCE_URL};

pub const SECRET_NAME: &str = "API_SECRET";

#[derive(Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub api_secret: String,
    pub ingest: IngestConfig,
    pub seed_file: Option<PathBuf>,
    /// Origin allowed to call the API from a browser; any origin when unset.
    pub cors_origin: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let ingest = IngestConfig {
            enabled: try_load("INGEST_ENABLED", "false")?,
            source_url: try_load("INGEST_SOURCE_URL", DEFAULT_SOURCE_URL)?,
            mode: try_load::<IngestMode>("INGEST_MODE", "append")?,
            timeout: Duration::from_secs(try_load("INGEST_TIMEOUT_SECS", "10")?),
        };

        Ok(Self {
            bind_addr: try_load("STUDENTS_BIND", "0.0.0.0:8000")?,
            api_secret: load_secret(SECRET_NAME)?,
            ingest,
            seed_file: var("STUDENTS_SEED_FILE").map(PathBuf::from),
            cors_origin: var("CORS_ORIGIN"),
        })
    }

    pub fn with_secret(api_secret: &str) -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            api_secret: api_secret.to_string(),
            ingest: IngestConfig::default(),
            seed_file: None,
            cors_origin: None,
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        anyhow::anyhow!("Invalid {key} value '{raw}': {e}")
    })
}

/// The secret comes from the environment, or from a mounted secret file.
fn load_secret(secret_name: &str) -> Result<String> {
    if let Some(secret) = var(secret_name) {
        return Ok(secret.trim().to_string());
    }

    let path = format!("/run/secrets/{secret_name}");
    let secret = read_to_string(&path)
        .map(|s| s.trim().to_string())
        .with_context(|| format!("{secret_name} is not set and {path} is not readable"))?;

    anyhow::ensure!(!secret.is_empty(), "{secret_name} in {path} is empty");
    Ok(secret)
}
