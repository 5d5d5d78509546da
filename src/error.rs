use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dietdesk_shared::Error;
use serde_json::json;

/// Domain error as a JSON response.
#[derive(Debug)]
pub struct AppError(pub Error);

impl<E: Into<Error>> From<E> for AppError {
    fn from(value: E) -> Self {
        Self(value.into())
    }
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(Error::Server(message.into()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self.0 {
            Error::Validate(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation",
                errors.to_string(),
            ),
            Error::NotFound(what) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("{what} not found"),
            ),
            Error::SlotTaken => (
                StatusCode::CONFLICT,
                "slot_taken",
                Error::SlotTaken.to_string(),
            ),
            Error::BookingBlocked => (
                StatusCode::SERVICE_UNAVAILABLE,
                "booking_blocked",
                Error::BookingBlocked.to_string(),
            ),
            Error::Forbidden => (
                StatusCode::FORBIDDEN,
                "forbidden",
                Error::Forbidden.to_string(),
            ),
            Error::Server(message) => (StatusCode::BAD_REQUEST, "bad_request", message),
            Error::Unknown(err) => {
                tracing::error!("unexpected error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": code, "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Error::NotFound("owner".to_owned()), StatusCode::NOT_FOUND),
            (Error::SlotTaken, StatusCode::CONFLICT),
            (Error::BookingBlocked, StatusCode::SERVICE_UNAVAILABLE),
            (Error::Forbidden, StatusCode::FORBIDDEN),
            (Error::Server("invalid slot".to_owned()), StatusCode::BAD_REQUEST),
            (
                Error::Unknown(anyhow::anyhow!("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(AppError(error).into_response().status(), status);
        }
    }
}
