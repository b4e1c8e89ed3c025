//! Defines the HTTP route for the manage view.

use super::handlers::get_manage_events;
use crate::auth::middleware::{ensure_email_match, firebase_auth};
use axum::{Router, middleware, routing::get};

pub async fn manage_router() -> Router {
    Router::new()
        .route(
            "/manageEvents",
            get(get_manage_events).layer(middleware::from_fn(ensure_email_match)),
        )
        .layer(middleware::from_fn(firebase_auth))
}
