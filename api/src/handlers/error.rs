//! Domain errors as HTTP responses
//!
//! Every error body is `{"error": "..."}`.

use std::fmt;

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::{header, StatusCode},
    HttpRequest, HttpResponse, ResponseError,
};
use tracing::{error, warn};
use validator::Validate;

use jt_core::errors::{AuthError, DomainError, ValidationError};
use jt_shared::ErrorResponse;

/// Error returned by every handler
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(err.into())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. } | DomainError::ValidationErr(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
        DomainError::Auth(auth) => match auth {
            AuthError::InvalidIdentifier { .. }
            | AuthError::VerificationCodeNotFound
            | AuthError::VerificationCodeExpired
            | AuthError::InvalidVerificationCode => StatusCode::BAD_REQUEST,
            AuthError::AccountNotFound => StatusCode::NOT_FOUND,
            AuthError::AccountAlreadyExists => StatusCode::CONFLICT,
            AuthError::ResendCooldown { .. } => StatusCode::TOO_MANY_REQUESTS,
            AuthError::DeliveryFailed { .. } => StatusCode::SERVICE_UNAVAILABLE,
        },
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(&self.0)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        let message = if status.is_server_error() && !matches!(self.0, DomainError::Auth(_)) {
            error!(error = %self.0, "Request failed with internal error");
            "Internal server error".to_string()
        } else {
            if status.is_server_error() {
                warn!(error = ?self.0, "Request failed");
            }
            self.0.to_string()
        };

        let mut response = HttpResponse::build(status);
        if let DomainError::Auth(AuthError::ResendCooldown {
            retry_after_seconds,
        }) = &self.0
        {
            response.insert_header((header::RETRY_AFTER, retry_after_seconds.to_string()));
        }
        response.json(ErrorResponse::new(message))
    }
}

/// Turn JSON extractor failures into `400 {"error": ...}`
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
        JsonPayloadError::Deserialize(e) => format!("Invalid request body: {}", e),
        other => format!("Invalid request body: {}", other),
    };
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(message));
    InternalError::from_response(err, response).into()
}

/// Run `validator` checks, reporting the first failing field
pub fn validate_request<T: Validate>(request: &T) -> Result<(), ApiError> {
    let Err(errors) = request.validate() else {
        return Ok(());
    };

    let field = errors
        .field_errors()
        .keys()
        .min()
        .map(|name| name.to_string())
        .unwrap_or_else(|| "request".to_string());

    Err(ValidationError::InvalidFormat { field }.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use jt_core::errors::TokenError;

    #[test]
    fn test_status_mapping() {
        let cases: Vec<(DomainError, StatusCode)> = vec![
            (AuthError::VerificationCodeExpired.into(), StatusCode::BAD_REQUEST),
            (AuthError::InvalidVerificationCode.into(), StatusCode::BAD_REQUEST),
            (AuthError::VerificationCodeNotFound.into(), StatusCode::BAD_REQUEST),
            (AuthError::AccountNotFound.into(), StatusCode::NOT_FOUND),
            (AuthError::AccountAlreadyExists.into(), StatusCode::CONFLICT),
            (
                AuthError::DeliveryFailed {
                    reason: "smtp down".to_string(),
                }
                .into(),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (TokenError::TokenExpired.into(), StatusCode::UNAUTHORIZED),
            (DomainError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(status_for(&error), expected, "{error:?}");
        }
    }

    #[actix_web::test]
    async fn test_cooldown_sets_retry_after() {
        let error = ApiError::from(AuthError::ResendCooldown {
            retry_after_seconds: 42,
        });

        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "42");
    }

    #[actix_web::test]
    async fn test_internal_details_are_hidden() {
        let response = ApiError(DomainError::internal("connection refused on 10.0.0.3")).error_response();

        let body = to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Internal server error" }));
    }

    #[actix_web::test]
    async fn test_delivery_failure_message_omits_reason() {
        let response = ApiError::from(AuthError::DeliveryFailed {
            reason: "api key revoked".to_string(),
        })
        .error_response();

        let body = to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Failed to send verification code");
    }
}
