use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use std::convert::Infallible;

pub const USER_HEADER: &str = "X-Auth-User";
pub const KEY_HEADER: &str = "X-Auth-Key";

/// Credentials from `X-Auth-User` / `X-Auth-Key`.
///
/// Extraction never fails: a missing or non-UTF-8 header reads as an empty
/// string, which the authenticator rejects like any other bad pair. This
/// keeps body validation ahead of authentication.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub key: String,
}

impl Credentials {
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            username: header_value(headers, USER_HEADER),
            key: header_value(headers, KEY_HEADER),
        }
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

impl<S> FromRequestParts<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let credentials = Self::from_headers(&parts.headers);
        if !credentials.username.is_empty() {
            tracing::Span::current().record("user", credentials.username.as_str());
        }
        Ok(credentials)
    }
}
