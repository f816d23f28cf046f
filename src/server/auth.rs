use axum::extract::{Request, State};
use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;

use super::response::ApiResult;
use super::SharedState;

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.trim()).filter(|t| !t.is_empty())
}

/// Rejects requests without a live session when `requireAuth` is on.
pub async fn require_session(
    State(state): State<SharedState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    if state.config.require_auth {
        let session = state.sessions.require(bearer_token(request.headers()))?;
        request.extensions_mut().insert(session);
    }
    Ok(next.run(request).await)
}
