use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use standard_error::{StandardError, Status};

use crate::{
    conf::settings,
    pkg::{
        internal::{
            adaptors::users::selectors::UserSelector,
            auth::{verify_token, AuthUser, TokenKind},
        },
        server::state::{AppState, GetTxn},
    },
    prelude::Result,
};

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
}

pub async fn authenticate(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    if let Some(token) = bearer_token(&headers) {
        if let Ok(claims) = verify_token(token, TokenKind::Access, &settings.jwt_secret) {
            let mut tx = state.db_pool.begin_txn().await?;
            if let Some(user) = UserSelector::new(&mut tx).get_by_id(claims.sub).await? {
                request
                    .extensions_mut()
                    .insert(Arc::new(AuthUser::from(&user)));
                return Ok(next.run(request).await);
            }
        }
    }
    tracing::warn!("token missing or invalid, authentication denied");
    Err(StandardError::new("ERR-AUTH-001").code(StatusCode::UNAUTHORIZED))
}

#[cfg(test)]
mod tests {
    use super::bearer_token;
    use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};

    #[test]
    fn extracts_bearer_tokens() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn rejects_missing_or_malformed_headers() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
