//! Handler functions for event management API endpoints.

use crate::api::common::{ApiResponse, ErrorResponse, service_error_to_http};
use crate::auth::verifier::Claims;
use crate::database::Database;
use crate::database::models::{
    CreateEvent, DeleteResponse, EventResponse, InsertResponse, UpdateEvent, UpdateResponse,
};
use crate::repositories::event_repository::EventRepository;
use crate::services::event_service::EventService;
use axum::{
    extract::{Extension, Json, Path},
    response::Json as ResponseJson,
};

/// Retrieves all events. Public.
#[axum::debug_handler]
pub async fn get_events(
    Extension(db): Extension<Database>,
) -> Result<ResponseJson<ApiResponse<Vec<EventResponse>>>, ErrorResponse> {
    let repo = EventRepository::new(&db);
    let service = EventService::new(&repo);

    let events = service.list_events().await.map_err(service_error_to_http)?;

    Ok(ResponseJson(ApiResponse::success(
        events,
        "Events retrieved successfully",
    )))
}

/// Retrieves a specific event by ID. Public.
#[axum::debug_handler]
pub async fn get_event_by_id(
    Extension(db): Extension<Database>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<EventResponse>>, ErrorResponse> {
    let repo = EventRepository::new(&db);
    let service = EventService::new(&repo);

    let event = service
        .get_event(&id)
        .await
        .map_err(service_error_to_http)?;

    Ok(ResponseJson(ApiResponse::success(
        event,
        "Event retrieved successfully",
    )))
}

/// Creates an event with the verified caller stamped as creator.
#[axum::debug_handler]
pub async fn create_event(
    Extension(db): Extension<Database>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateEvent>,
) -> Result<ResponseJson<ApiResponse<InsertResponse>>, ErrorResponse> {
    let repo = EventRepository::new(&db);
    let service = EventService::new(&repo);

    let result = service
        .create_event(payload, &claims.email)
        .await
        .map_err(service_error_to_http)?;

    Ok(ResponseJson(ApiResponse::success(
        result,
        "Event created successfully",
    )))
}

/// Updates an event's mutable fields; matches zero documents for non-owners.
#[axum::debug_handler]
pub async fn update_event(
    Extension(db): Extension<Database>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEvent>,
) -> Result<ResponseJson<ApiResponse<UpdateResponse>>, ErrorResponse> {
    let repo = EventRepository::new(&db);
    let service = EventService::new(&repo);

    let result = service
        .update_event(&id, &claims.email, payload)
        .await
        .map_err(service_error_to_http)?;

    Ok(ResponseJson(ApiResponse::success(
        result,
        "Event update processed",
    )))
}

/// Deletes an event owned by the caller; no-op otherwise.
#[axum::debug_handler]
pub async fn delete_event(
    Extension(db): Extension<Database>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<DeleteResponse>>, ErrorResponse> {
    let repo = EventRepository::new(&db);
    let service = EventService::new(&repo);

    let result = service
        .delete_event(&id, &claims.email)
        .await
        .map_err(service_error_to_http)?;

    Ok(ResponseJson(ApiResponse::success(
        result,
        "Event delete processed",
    )))
}
