//! Custom Axum extractors.
//!
//! The platform keys every request off the optional bearer credential, so
//! the one extractor here pulls it out of the `Authorization` header.
//! Extraction is infallible: a missing or malformed header is `None`, which
//! the identity resolver downgrades to an anonymous viewer.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// The raw bearer credential from the `Authorization` header, if any.
///
/// This is the untrusted credential string, not an identity: handlers hand
/// it to the identity resolver exactly once and thread the resulting viewer
/// through.
///
/// # Example
///
/// ```ignore
/// async fn handler(State(state): State<AppState<...>>, Bearer(token): Bearer) {
///     let viewer = state.identity.resolve(token.as_deref()).await;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Bearer(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self(token))
    }
}
