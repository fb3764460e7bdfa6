use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, info};

/// A single field-level violation, reported in the `errors` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub msg: String,
    pub param: String,
    pub location: String,
}

impl FieldError {
    pub fn new(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: param.into(),
            location: "body".to_string(),
        }
    }
}

/// Failure of the outbound call to the translation provider
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// No response was received
    #[error("Failed to reach the translation service")]
    Transport(#[source] reqwest::Error),

    /// The provider answered with a non-2xx status
    #[error("{message}")]
    Provider { status: u16, message: String },

    /// The provider answered 2xx but the body was not JSON
    #[error("Translation service returned an unreadable response")]
    Decode(#[source] reqwest::Error),

    /// The body was JSON but not the envelope the operation expects
    #[error("Unexpected response from translation service: {0}")]
    Shape(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// An extractor refused the request before validation; keeps its status
    #[error("{1}")]
    Rejected(StatusCode, String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Rejected(status, _) => *status,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(errors) => {
                debug!("Rejected request with {} field error(s): {:?}", errors.len(), errors);
                json!({ "errors": errors })
            }
            ApiError::BadRequest(message) => {
                debug!("Bad request: {}", message);
                json!({ "error": message })
            }
            ApiError::NotFound(message) => {
                info!("Not found: {}", message);
                json!({ "error": message })
            }
            ApiError::Rejected(status, message) => {
                debug!("Rejected request ({}): {}", status, message);
                json!({ "error": message })
            }
            ApiError::Upstream(err) => {
                match &err {
                    UpstreamError::Provider { status, message } => {
                        error!("Translation provider returned {}: {}", status, message)
                    }
                    UpstreamError::Transport(source) | UpstreamError::Decode(source) => {
                        error!("{}: {}", err, source)
                    }
                    UpstreamError::Shape(_) => error!("{}", err),
                }
                json!({ "error": err.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
