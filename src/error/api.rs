use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use excuse_schema::ErrorBody;
use thiserror::Error as ThisError;

use super::StoreError;

/// Route-level error: every variant maps to exactly one HTTP status and a static client message.
#[derive(Debug, ThisError)]
pub enum ApiError {
    /// Malformed input. The client sees `message`; `debug_message` only goes to the log.
    #[error("Request rejected: {message}")]
    RequestRejected {
        message: &'static str,
        debug_message: Option<String>,
    },

    /// The store failed. The client sees `context`; `source` only goes to the log.
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn rejected(message: &'static str) -> Self {
        ApiError::RequestRejected {
            message,
            debug_message: None,
        }
    }

    pub fn rejected_with(message: &'static str, debug_message: impl Into<String>) -> Self {
        ApiError::RequestRejected {
            message,
            debug_message: Some(debug_message.into()),
        }
    }

    /// Returns a closure suitable for `map_err` that tags a store failure with a client message.
    pub fn storage(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| ApiError::Storage { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::RequestRejected { .. } => StatusCode::BAD_REQUEST,
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::RequestRejected {
                message,
                debug_message,
            } => {
                if let Some(debug_message) = debug_message {
                    tracing::warn!(
                        status = %status,
                        message = %message,
                        debug_message = %debug_message,
                        "Request rejected"
                    );
                } else {
                    tracing::warn!(status = %status, message = %message, "Request rejected");
                }
                message
            }
            ApiError::Storage { context, source } => {
                tracing::error!(
                    status = %status,
                    context = %context,
                    error = %source,
                    "Storage operation failed"
                );
                context
            }
        };

        (status, Json(ErrorBody::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: ApiError) -> (StatusCode, String) {
        let resp = err.into_response();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn rejection_is_400_with_static_message() {
        let (status, body) =
            body_of(ApiError::rejected_with("Text is required", "EOF while parsing")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"Text is required"}"#);
    }

    #[tokio::test]
    async fn storage_failure_hides_the_source() {
        let err = ApiError::storage("Failed to fetch excuses")(StoreError::Database(
            sqlx::Error::PoolTimedOut,
        ));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"Failed to fetch excuses"}"#);
    }
}
