use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::students::query::QueryError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Student not found")]
    NotFound,

    #[error(transparent)]
    InvalidQuery(#[from] QueryError),

    #[error("Authentication token required")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            AppError::MissingToken => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken => StatusCode::FORBIDDEN,
            AppError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let AppError::Upstream(err) = &self {
            tracing::error!("Request failed: {:#}", err);
        }

        (
            status,
            Json(ErrorBody {
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}
