use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use storage::{AdminCapability, AdminKeys};

use crate::error::WebError;
use crate::state::AppState;

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// Reject requests without a valid admin secret; on success the
/// [`AdminCapability`] is available to handlers as an extension.
pub async fn require_auth(
    State(admin_keys): State<AdminKeys>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = bearer_token(req.headers()).ok_or(WebError::Unauthorized)?;

    let admin = admin_keys.authorize(token).map_err(|_| {
        tracing::warn!("Invalid admin password attempt");
        WebError::Unauthorized
    })?;

    req.extensions_mut().insert(admin);
    Ok(next.run(req).await)
}

/// Admin capability for routes that serve everyone but show more to admins
pub struct MaybeAdmin(pub Option<AdminCapability>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeAdmin {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let admin = bearer_token(&parts.headers).and_then(|t| state.admin_keys.authorize(t).ok());
        Ok(MaybeAdmin(admin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer maglen2025"),
        );
        assert_eq!(bearer_token(&headers), Some("maglen2025"));
    }

    #[test]
    fn test_bearer_token_requires_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("maglen2025"));
        assert_eq!(bearer_token(&headers), None);

        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
