use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON error body shared by every DriveHub endpoint.
///
/// `message` is the text a client shows in its toast. `redirect` tells the
/// client which view to navigate to (sign-in, search, home) when the error
/// means the current view cannot be shown at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
}

/// Sign-in view.
pub const REDIRECT_SIGN_IN: &str = "/auth";
/// Search view, used when a linked entity no longer exists.
pub const REDIRECT_SEARCH: &str = "/search";
/// Landing view, used when the caller lacks a role.
pub const REDIRECT_HOME: &str = "/";

impl ErrorBody {
    pub fn new(kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            redirect: None,
        }
    }

    pub fn with_redirect(mut self, redirect: &'static str) -> Self {
        self.redirect = Some(redirect);
        self
    }

    /// Render with `status`. Logging is left to the caller, which holds the
    /// error's cause.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}
