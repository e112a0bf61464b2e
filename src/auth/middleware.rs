use super::gate::AuthGate;
use crate::error::AppError;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

pub async fn require_bearer(
    State(gate): State<Arc<AuthGate>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Err(e) = gate.check(request.headers()) {
        tracing::warn!(
            "Rejected {} {}: {}",
            request.method(),
            request.uri().path(),
            e
        );
        return Err(e);
    }

    Ok(next.run(request).await)
}
