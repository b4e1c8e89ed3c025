//! Handler functions for booking API endpoints.
//!
//! The listing handler always filters by the verified email; the ownership
//! guard in front of it has already rejected mismatched `email` parameters.

use crate::api::common::{ApiResponse, ErrorResponse, service_error_to_http};
use crate::auth::verifier::Claims;
use crate::database::Database;
use crate::database::models::{BookingResponse, CreateBooking, DeleteResponse, InsertResponse};
use crate::repositories::booking_repository::BookingRepository;
use crate::services::booking_service::BookingService;
use axum::{
    extract::{Extension, Json, Path},
    response::Json as ResponseJson,
};

/// Retrieves the caller's bookings.
#[axum::debug_handler]
pub async fn get_my_bookings(
    Extension(db): Extension<Database>,
    Extension(claims): Extension<Claims>,
) -> Result<ResponseJson<ApiResponse<Vec<BookingResponse>>>, ErrorResponse> {
    let repo = BookingRepository::new(&db);
    let service = BookingService::new(&repo);

    let bookings = service
        .list_bookings_for_user(&claims.email)
        .await
        .map_err(service_error_to_http)?;

    Ok(ResponseJson(ApiResponse::success(
        bookings,
        "Bookings retrieved successfully",
    )))
}

/// Books an event for the verified caller; duplicate bookings conflict.
#[axum::debug_handler]
pub async fn create_booking(
    Extension(db): Extension<Database>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateBooking>,
) -> Result<ResponseJson<ApiResponse<InsertResponse>>, ErrorResponse> {
    let repo = BookingRepository::new(&db);
    let service = BookingService::new(&repo);

    let result = service
        .create_booking(payload, &claims.email)
        .await
        .map_err(service_error_to_http)?;

    Ok(ResponseJson(ApiResponse::success(
        result,
        "Booking created successfully",
    )))
}

/// Deletes a booking owned by the caller; no-op otherwise.
#[axum::debug_handler]
pub async fn delete_booking(
    Extension(db): Extension<Database>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<DeleteResponse>>, ErrorResponse> {
    let repo = BookingRepository::new(&db);
    let service = BookingService::new(&repo);

    let result = service
        .delete_booking(&id, &claims.email)
        .await
        .map_err(service_error_to_http)?;

    Ok(ResponseJson(ApiResponse::success(
        result,
        "Booking delete processed",
    )))
}
