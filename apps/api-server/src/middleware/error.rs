//! Error translation - every failure on the request path ends up here and
//! leaves as a `{ success: false, error: { message, code, details? } }` body.

use actix_web::dev::ServiceResponse;
use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers};
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use folio_core::error::RepoError;
use folio_shared::{ErrorCode, ErrorResponse, FieldError};
use thiserror::Error;

/// Message sent in place of internal failure details when errors are not verbose.
pub const GENERIC_INTERNAL_MESSAGE: &str = "Internal server error";

/// Application-level error type that converts to the JSON error envelope.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    NotFound(String),

    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Duplicate(_) => ErrorCode::DuplicateEntry,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Duplicate(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        tracing::debug!(code = ?self.code(), status = self.status_code().as_u16(), "Request failed");

        let error = match self {
            AppError::Validation(details) => {
                tracing::debug!(violations = details.len(), "Request failed validation");
                ErrorResponse::validation(details.clone())
            }
            AppError::NotFound(message) => ErrorResponse::not_found(message),
            AppError::Duplicate(detail) => {
                tracing::warn!(detail = %detail, "Uniqueness conflict");
                ErrorResponse::duplicate_entry()
            }
            AppError::Internal(message) => {
                tracing::error!(error = %message, "Internal error");
                ErrorResponse::internal_error(message)
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::UniqueViolation(detail) => AppError::Duplicate(detail),
            RepoError::NotFound => AppError::NotFound("Record not found".to_string()),
            RepoError::Connection(_) | RepoError::Query(_) => AppError::Internal(err.to_string()),
        }
    }
}

/// Turns unreadable JSON bodies into validation failures on the `body` field.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let code = match &err {
        JsonPayloadError::ContentType => "content_type",
        JsonPayloadError::Deserialize(_) => "json",
        _ => "payload",
    };

    AppError::Validation(vec![FieldError::new("body", code, err.to_string())]).into()
}

/// Replaces the body of every 500 with the generic internal-error envelope.
///
/// Installed only when verbose errors are disabled.
pub fn redact_internal_errors<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().handler(StatusCode::INTERNAL_SERVER_ERROR, redact_internal_error)
}

fn redact_internal_error<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let (req, _) = res.into_parts();
    let res = HttpResponse::InternalServerError()
        .json(ErrorResponse::internal_error(GENERIC_INTERNAL_MESSAGE));

    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, res).map_into_right_body(),
    ))
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_errors_map_to_codes() {
        let cases = [
            (RepoError::UniqueViolation("posts_title_key".into()), ErrorCode::DuplicateEntry),
            (RepoError::NotFound, ErrorCode::NotFound),
            (RepoError::Query("syntax error".into()), ErrorCode::InternalError),
            (RepoError::Connection("refused".into()), ErrorCode::InternalError),
        ];

        for (repo_error, expected) in cases {
            assert_eq!(AppError::from(repo_error).code(), expected);
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation(Vec::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("Post not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Duplicate("dup".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_error_keeps_raw_message() {
        let err = AppError::from(RepoError::Query("relation \"posts\" does not exist".into()));
        match err {
            AppError::Internal(message) => assert!(message.contains("does not exist")),
            other => panic!("expected internal error, got {other:?}"),
        }
    }
}
