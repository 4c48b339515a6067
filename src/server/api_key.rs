use axum::{extract::OptionalFromRequestParts, http::request::Parts};
use std::convert::Infallible;

/// Header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "X-Mcp-Key";

/// The raw API key presented on a request. Carrying one says nothing about
/// validity: that call belongs to the authorizer, so extraction never fails
/// and handlers always receive an `Option<ApiKey>`.
#[derive(Debug, Clone)]
pub struct ApiKey(pub String);

impl ApiKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> OptionalFromRequestParts<S> for ApiKey
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts
            .headers
            .get(API_KEY_HEADER)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .map(ApiKey))
    }
}
