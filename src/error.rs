use std::path::PathBuf;

use thiserror::Error;

/// Failures that prevent the service from starting.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Failed to read dataset {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset is missing required column {0}")]
    MissingColumn(&'static str),

    #[error("Dataset row {row} has an empty {field}")]
    EmptyField { row: usize, field: &'static str },

    #[error("Dataset row {row} has a malformed Timestamp {value:?}")]
    InvalidTimestamp { row: usize, value: String },

    #[error("Invalid {key} value {value:?}: {reason}")]
    Config {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Rejections of a submitted review. The display strings are sent verbatim to the client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Location is not valid")]
    InvalidLocation,
}

/// Rejections of read-side query parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("{param} must be a date formatted as YYYY-MM-DD, got {value:?}")]
    MalformedDate { param: &'static str, value: String },
}

/// Everything a request can fail with at the handler boundary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    MalformedQuery(#[from] QueryError),

    #[error("Request body is not a valid url-encoded form")]
    MalformedPayload,

    #[error("Method {0} is not allowed")]
    MethodNotAllowed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(feature = "server")]
mod response {
    use actix_web::{
        http::{header, header::ContentType, StatusCode},
        HttpResponse, ResponseError,
    };

    use super::AppError;

    impl ResponseError for AppError {
        fn status_code(&self) -> StatusCode {
            match self {
                AppError::Validation(_) => StatusCode::BAD_REQUEST,
                AppError::MalformedQuery(_) => StatusCode::BAD_REQUEST,
                AppError::MalformedPayload => StatusCode::BAD_REQUEST,
                AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
                AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }

        fn error_response(&self) -> HttpResponse {
            let mut response = HttpResponse::build(self.status_code());
            if let AppError::MethodNotAllowed(_) = self {
                response.insert_header((header::ALLOW, "GET, POST"));
            }
            response
                .content_type(ContentType::plaintext())
                .body(self.to_string())
        }
    }
}
