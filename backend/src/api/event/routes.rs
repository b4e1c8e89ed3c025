//! Defines the HTTP routes for event management.

use super::handlers::{create_event, delete_event, get_event_by_id, get_events, update_event};
use crate::auth::middleware::firebase_auth;
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

pub async fn event_router() -> Router {
    let public = Router::new()
        .route("/", get(get_events))
        .route("/{id}", get(get_event_by_id));

    let private = Router::new()
        .route("/", post(create_event))
        .route("/{id}", put(update_event).delete(delete_event))
        .layer(middleware::from_fn(firebase_auth));

    public.merge(private)
}
