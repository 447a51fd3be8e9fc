//! Server errors.

use actix_http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use mergewatch_ghapi_interface::ApiError;
use thiserror::Error;

use crate::event_type::EventType;

/// Server error.
///
/// Variants carry enough detail for server-side logs; the HTTP response built
/// from them stays generic (see [`ResponseError::error_response`]).
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(
        "Error while parsing webhook event for type {},\n  caused by: {}",
        event_type,
        source
    )]
    EventParseError {
        event_type: EventType,
        source: serde_json::Error,
    },

    #[error("Unsupported event: {}", event)]
    UnsupportedEvent { event: String },

    #[error("Missing event header.")]
    MissingEventHeader,

    #[error("Missing webhook signature.")]
    MissingWebhookSignature,

    #[error("Invalid webhook signature.")]
    InvalidWebhookSignature,

    #[error("Invalid webhook payload.")]
    InvalidPayload,

    #[error("Missing head repository on pull request #{}", number)]
    MissingHeadRepository { number: u64 },

    #[error("Invalid repository path: {}", path)]
    InvalidRepositoryPath { path: String },

    #[error("Could not resolve secret '{}' from the store.", id)]
    SecretResolution { id: String },

    #[error("GitHub API failure,\n  caused by: {}", source)]
    ApiFailure { source: ApiError },

    #[error("I/O error,\n  caused by: {}", source)]
    IoError { source: std::io::Error },
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match &self {
            ServerError::InvalidWebhookSignature => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Responses never leak internal detail, whatever the variant says.
        match self.status_code() {
            StatusCode::FORBIDDEN => HttpResponse::Forbidden()
                .json(serde_json::json!({"Error": "Unauthorized attempt"})),
            _ => HttpResponse::InternalServerError()
                .json(serde_json::json!({"Error": "Internal server error"})),
        }
    }
}

/// Result alias for `ServerError`.
pub type Result<T> = core::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use actix_http::StatusCode;
    use actix_web::ResponseError;

    use super::ServerError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServerError::InvalidWebhookSignature.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ServerError::MissingWebhookSignature.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServerError::MissingEventHeader.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServerError::InvalidPayload.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
