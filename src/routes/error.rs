use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::templates::error_page;

/// Failures of HTML routes that end on the generic error page. The message
/// is shown to the visitor, the source is only logged.
#[derive(thiserror::Error, Debug)]
pub enum PageError {
    #[error("{message}")]
    UnexpectedError {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl PageError {
    pub fn unexpected(message: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self::UnexpectedError {
            message,
            source: source.into(),
        }
    }
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::UnexpectedError { source, .. } => {
                tracing::error!(error = ?source, "{}", self);
            }
        }
        error_page(self.status_code(), &self.to_string())
    }
}
