//! Middleware for protecting authenticated routes and handling authorization.
//!
//! This module contains the bearer-token authentication middleware and the
//! ownership guard that stops callers from addressing another identity's
//! resources through the `email` query parameter.

use crate::api::common::{ErrorResponse, service_error_to_http};
use crate::auth::verifier::{Claims, SharedVerifier};
use crate::errors::ServiceError;
use axum::{
    extract::{Extension, Query, Request},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;

/// Pulls the token out of a `Bearer <token>` Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
}

fn unauthorized_response() -> ErrorResponse {
    service_error_to_http(ServiceError::unauthorized("unauthorized access"))
}

/// Firebase bearer-token authentication middleware.
///
/// A missing or non-Bearer header is rejected without calling the verifier.
/// On success the verified claims are inserted into the request extensions
/// for downstream handlers; any verification failure is terminal for the
/// request and surfaces as an opaque 401.
pub async fn firebase_auth(
    Extension(verifier): Extension<SharedVerifier>,
    mut request: Request,
    next: Next,
) -> Result<Response, ErrorResponse> {
    let token = bearer_token(request.headers()).ok_or_else(unauthorized_response)?;

    match verifier.verify_token(token).await {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(_) => Err(unauthorized_response()),
    }
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

/// Ownership guard middleware; must run after `firebase_auth`.
///
/// If the caller supplied an `email` query parameter it has to match the
/// verified email, otherwise the request is forbidden. An absent parameter
/// passes through; the handler then filters by the verified email itself.
pub async fn ensure_email_match(
    Query(query): Query<EmailQuery>,
    request: Request,
    next: Next,
) -> Result<Response, ErrorResponse> {
    let claims = request
        .extensions()
        .get::<Claims>()
        .ok_or_else(unauthorized_response)?;

    if let Some(email) = &query.email {
        if email != &claims.email {
            return Err(service_error_to_http(ServiceError::permission_denied(
                "forbidden access",
            )));
        }
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verifier::TokenVerifier;
    use crate::errors::ServiceResult;
    use async_trait::async_trait;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    struct MockVerifier;

    #[async_trait]
    impl TokenVerifier for MockVerifier {
        async fn verify_token(&self, token: &str) -> ServiceResult<Claims> {
            match token {
                "alice-token" => Ok(Claims {
                    sub: "uid-alice".to_string(),
                    email: "alice@x.com".to_string(),
                    exp: 2_000_000_000,
                    iat: 1_000_000_000,
                }),
                _ => Err(ServiceError::unauthorized("unauthorized access")),
            }
        }
    }

    async fn whoami(Extension(claims): Extension<Claims>) -> String {
        claims.email
    }

    fn app(hits: Arc<AtomicUsize>) -> Router {
        let counted = move |Extension(_claims): Extension<Claims>| {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                "reached"
            }
        };

        Router::new()
            .route("/whoami", get(whoami))
            .route("/counted", get(counted))
            .route(
                "/guarded",
                get(whoami).layer(middleware::from_fn(ensure_email_match)),
            )
            .layer(middleware::from_fn(firebase_auth))
            .layer(Extension(Arc::new(MockVerifier) as SharedVerifier))
    }

    fn request(uri: &str, auth: Option<&str>) -> axum::http::Request<Body> {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(value) = auth {
            builder = builder.header("authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized_without_reaching_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let response = app(hits.clone())
            .oneshot(request("/counted", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn non_bearer_header_is_unauthorized() {
        let hits = Arc::new(AtomicUsize::new(0));
        let response = app(hits)
            .oneshot(request("/whoami", Some("Basic YWxpY2U=")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_token_is_unauthorized() {
        let hits = Arc::new(AtomicUsize::new(0));
        let response = app(hits.clone())
            .oneshot(request("/counted", Some("Bearer forged-token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn valid_token_attaches_claims() {
        let hits = Arc::new(AtomicUsize::new(0));
        let response = app(hits)
            .oneshot(request("/whoami", Some("Bearer alice-token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        assert_eq!(&body[..], b"alice@x.com");
    }

    #[tokio::test]
    async fn guard_rejects_mismatched_email() {
        let hits = Arc::new(AtomicUsize::new(0));
        let response = app(hits)
            .oneshot(request(
                "/guarded?email=mallory@x.com",
                Some("Bearer alice-token"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn guard_allows_matching_email() {
        let hits = Arc::new(AtomicUsize::new(0));
        let response = app(hits)
            .oneshot(request(
                "/guarded?email=alice@x.com",
                Some("Bearer alice-token"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn guard_passes_through_when_email_absent() {
        let hits = Arc::new(AtomicUsize::new(0));
        let response = app(hits)
            .oneshot(request("/guarded", Some("Bearer alice-token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));

        headers.insert(AUTHORIZATION, "Token abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }
}
