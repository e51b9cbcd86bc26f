use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use drivehub_core::error::{ErrorBody, REDIRECT_HOME, REDIRECT_SEARCH};
use drivehub_domain::pricing::PricingError;

/// Marketplace service domain error variants.
///
/// `Display` is the message a client shows to the user.
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    #[error("car not found")]
    CarNotFound,
    #[error("booking not found")]
    BookingNotFound,
    #[error("profile not found")]
    ProfileNotFound,
    #[error("car is not available for booking")]
    CarUnavailable,
    #[error("booking can no longer be cancelled")]
    BookingNotCancellable,
    #[error("invalid status transition")]
    InvalidStatusTransition,
    #[error("email already registered")]
    EmailAlreadyRegistered,
    #[error("Please agree to the terms and conditions")]
    TermsNotAccepted,
    #[error("dropoff must be after pickup")]
    InvalidDateRange,
    #[error("both pickup and dropoff dates are required")]
    IncompleteDateRange,
    #[error("missing data")]
    MissingData,
    #[error("missing {0}")]
    MissingField(&'static str),
    #[error("invalid {0}")]
    InvalidField(String),
    #[error("images must be PNG or JPEG")]
    InvalidImage,
    #[error("images must be 10MB or smaller")]
    ImageTooLarge,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("{0}")]
    AuthRejected(String),
    #[error("admin access required")]
    NotAdmin,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl From<PricingError> for MarketplaceError {
    fn from(e: PricingError) -> Self {
        match e {
            PricingError::InvalidDateRange => Self::InvalidDateRange,
            PricingError::IncompleteDateRange => Self::IncompleteDateRange,
        }
    }
}

impl From<JsonRejection> for MarketplaceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidField(format!("request body: {}", rejection.body_text()))
    }
}

impl MarketplaceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CarNotFound => "CAR_NOT_FOUND",
            Self::BookingNotFound => "BOOKING_NOT_FOUND",
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::CarUnavailable => "CAR_UNAVAILABLE",
            Self::BookingNotCancellable => "BOOKING_NOT_CANCELLABLE",
            Self::InvalidStatusTransition => "INVALID_STATUS_TRANSITION",
            Self::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            Self::TermsNotAccepted => "TERMS_NOT_ACCEPTED",
            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::IncompleteDateRange => "INCOMPLETE_DATE_RANGE",
            Self::MissingData => "MISSING_DATA",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidField(_) => "INVALID_FIELD",
            Self::InvalidImage => "INVALID_IMAGE",
            Self::ImageTooLarge => "IMAGE_TOO_LARGE",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AuthRejected(_) => "AUTH_REJECTED",
            Self::NotAdmin => "NOT_ADMIN",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::CarNotFound | Self::BookingNotFound | Self::ProfileNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::CarUnavailable
            | Self::BookingNotCancellable
            | Self::InvalidStatusTransition
            | Self::EmailAlreadyRegistered => StatusCode::CONFLICT,
            Self::TermsNotAccepted
            | Self::InvalidDateRange
            | Self::IncompleteDateRange
            | Self::MissingData
            | Self::MissingField(_)
            | Self::InvalidField(_)
            | Self::InvalidImage
            | Self::AuthRejected(_) => StatusCode::BAD_REQUEST,
            Self::ImageTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::NotAdmin | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// View the client should navigate to instead of showing the error inline.
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            Self::CarNotFound => Some(REDIRECT_SEARCH),
            Self::NotAdmin => Some(REDIRECT_HOME),
            _ => None,
        }
    }
}

impl IntoResponse for MarketplaceError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %format!("{e:#}"), kind = "INTERNAL", "internal error");
        }
        let status = self.status();
        let mut body = ErrorBody::new(self.kind(), self.to_string());
        if let Some(redirect) = self.redirect() {
            body = body.with_redirect(redirect);
        }
        body.into_response_with(status)
    }
}
