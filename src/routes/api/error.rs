use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

use crate::users::UserError;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("User not found")]
    NotFound,

    #[error("{0}")]
    ValidationError(String),

    #[error("Internal server error")]
    UnexpectedError(#[source] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::NotFound => Self::NotFound,
            UserError::ValidationError(message) => Self::ValidationError(message.to_string()),
            other => Self::UnexpectedError(anyhow::Error::new(other)),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Self::UnexpectedError(source) = self {
            tracing::error!(error = ?source, "API request failed");
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}
