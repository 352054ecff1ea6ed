//! Mapping of crate errors onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{debug, warn};

use crate::api::MessageResponse;
use crate::error::{DockhandError, ErrorClass};

impl ErrorClass {
    /// HTTP status reported for this class of failure.
    #[must_use]
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Precondition => StatusCode::CONFLICT,
            Self::Transport => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DockhandError {
    fn into_response(self) -> Response {
        let status = self.class().status_code();
        let message = self.to_string();
        if status.is_server_error() {
            warn!(status = status.as_u16(), error = %message, "request failed");
        } else {
            debug!(status = status.as_u16(), error = %message, "request rejected");
        }
        (status, Json(MessageResponse::new(message))).into_response()
    }
}
