use axum::extract::FromRequest;
use serde::de::DeserializeOwned;

use crate::error::MarketplaceError;

pub mod account;
pub mod admin;
pub mod booking;
pub mod car;
pub mod health;
pub mod session;

/// `Json` request body whose rejections render as a [`MarketplaceError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(MarketplaceError))]
pub struct JsonBody<T>(pub T);

/// Parse a raw query string with `serde_qs`, so repeated `key[]=` parameters
/// collect into vectors. An absent query yields the default.
pub(crate) fn parse_query<T: DeserializeOwned + Default>(
    raw_query: Option<String>,
) -> Result<T, MarketplaceError> {
    raw_query
        .as_deref()
        .filter(|q| !q.is_empty())
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|e| MarketplaceError::InvalidField(format!("query: {e}")))
        .map(Option::unwrap_or_default)
}
