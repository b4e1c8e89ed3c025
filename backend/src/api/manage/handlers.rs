//! Handler functions for the manage-events API endpoint.

use crate::api::common::{ApiResponse, ErrorResponse, service_error_to_http};
use crate::auth::verifier::Claims;
use crate::database::Database;
use crate::database::models::EventResponse;
use crate::repositories::event_repository::EventRepository;
use crate::services::event_service::EventService;
use axum::{extract::Extension, response::Json as ResponseJson};

/// Retrieves the events created by the caller.
#[axum::debug_handler]
pub async fn get_manage_events(
    Extension(db): Extension<Database>,
    Extension(claims): Extension<Claims>,
) -> Result<ResponseJson<ApiResponse<Vec<EventResponse>>>, ErrorResponse> {
    let repo = EventRepository::new(&db);
    let service = EventService::new(&repo);

    let events = service
        .list_events_by_creator(&claims.email)
        .await
        .map_err(service_error_to_http)?;

    Ok(ResponseJson(ApiResponse::success(
        events,
        "Created events retrieved successfully",
    )))
}
