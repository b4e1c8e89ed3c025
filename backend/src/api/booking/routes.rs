//! Defines the HTTP routes for bookings.
//!
//! Paths are absolute because `/myBookings` and `/bookings` live at the
//! application root; the router is merged rather than nested.

use super::handlers::{create_booking, delete_booking, get_my_bookings};
use crate::auth::middleware::{ensure_email_match, firebase_auth};
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

pub async fn booking_router() -> Router {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings/{id}", delete(delete_booking))
        .route(
            "/myBookings",
            get(get_my_bookings).layer(middleware::from_fn(ensure_email_match)),
        )
        .layer(middleware::from_fn(firebase_auth))
}
