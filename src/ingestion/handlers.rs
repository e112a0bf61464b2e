use super::source::Ingestor;
use crate::error::AppError;
use crate::storage::StudentStore;
use crate::students::types::StudentRecord;

use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_fetch_students<S: StudentStore>(
    Extension(store): Extension<Arc<S>>,
    Extension(ingestor): Extension<Arc<Ingestor>>,
) -> Result<Json<Vec<StudentRecord>>, AppError> {
    let stored = ingestor.run(store.as_ref()).await?;
    tracing::info!("Ingest stored {} students", stored.len());

    Ok(Json(stored))
}
