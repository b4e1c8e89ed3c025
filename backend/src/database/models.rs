//! Rust structs that represent database document mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from MongoDB, plus the input and response DTOs used by the API layer. Wire
//! names are camelCase to match the documents the frontend already produces.

use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// An athletic event document in the `events` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub event_name: String,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub description: String,
    pub image_url: String,
    pub location: String,
    pub creator_email: String,
}

/// A booking document in the `bookings` collection.
///
/// `event_id` holds the hex form of the booked event's ObjectId. A unique
/// compound index on `(eventId, userEmail)` backs the one-booking-per-user
/// invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub event_id: String,
    pub user_email: String,
}

/// Input for event creation.
///
/// Carries no creator field: serde drops any client-supplied `creatorEmail`
/// as an unknown key, and the service stamps the verified identity instead.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Event name must be between 1-255 characters"
    ))]
    pub event_name: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Event type must be between 1-100 characters"
    ))]
    pub event_type: String,
    pub event_date: NaiveDate,
    #[validate(length(max = 5000, message = "Description too long"))]
    #[serde(default)]
    pub description: String,
    #[validate(url(message = "Must be a valid URL"))]
    pub image_url: String,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Location must be between 1-255 characters"
    ))]
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Event name must be between 1-255 characters"
    ))]
    pub event_name: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Event type must be between 1-100 characters"
    ))]
    pub event_type: String,
    pub event_date: NaiveDate,
    #[validate(length(max = 5000, message = "Description too long"))]
    #[serde(default)]
    pub description: String,
    #[validate(url(message = "Must be a valid URL"))]
    pub image_url: String,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Location must be between 1-255 characters"
    ))]
    pub location: String,
}

/// Input for a booking.
///
/// Carries no owner field; the service stamps the verified identity.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    #[validate(length(min = 1, message = "Event id is required"))]
    pub event_id: String,
}

/// API representation of an event, with the ObjectId flattened to hex.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: String,
    pub event_name: String,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub description: String,
    pub image_url: String,
    pub location: String,
    pub creator_email: String,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        EventResponse {
            id: event.id.map(|id| id.to_hex()).unwrap_or_default(),
            event_name: event.event_name,
            event_type: event.event_type,
            event_date: event.event_date,
            description: event.description,
            image_url: event.image_url,
            location: event.location,
            creator_email: event.creator_email,
        }
    }
}

/// API representation of a booking, with the ObjectId flattened to hex.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: String,
    pub event_id: String,
    pub user_email: String,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        BookingResponse {
            id: booking.id.map(|id| id.to_hex()).unwrap_or_default(),
            event_id: booking.event_id,
            user_email: booking.user_email,
        }
    }
}

/// Result of an insert, exposing the generated identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResponse {
    pub inserted_id: String,
}

impl From<InsertOneResult> for InsertResponse {
    fn from(result: InsertOneResult) -> Self {
        InsertResponse {
            inserted_id: result
                .inserted_id
                .as_object_id()
                .map(|id| id.to_hex())
                .unwrap_or_default(),
        }
    }
}

/// Result of an update. Callers distinguish "matched zero" (wrong id or not
/// the owner) from "matched and updated" by these counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl From<UpdateResult> for UpdateResponse {
    fn from(result: UpdateResult) -> Self {
        UpdateResponse {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        }
    }
}

/// Result of a delete. A zero count means the document did not exist or the
/// caller does not own it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub deleted_count: u64,
}

impl From<DeleteResult> for DeleteResponse {
    fn from(result: DeleteResult) -> Self {
        DeleteResponse {
            deleted_count: result.deleted_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_create_event() -> CreateEvent {
        CreateEvent {
            event_name: "5K Run".to_string(),
            event_type: "running".to_string(),
            event_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            description: "A community fun run".to_string(),
            image_url: "https://example.com/run.png".to_string(),
            location: "Riverside Park".to_string(),
        }
    }

    #[test]
    fn create_event_accepts_valid_input() {
        assert!(sample_create_event().validate().is_ok());
    }

    #[test]
    fn create_event_rejects_empty_name_and_bad_url() {
        let mut input = sample_create_event();
        input.event_name = String::new();
        input.image_url = "not a url".to_string();

        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("event_name"));
        assert!(errors.field_errors().contains_key("image_url"));
    }

    #[test]
    fn create_event_drops_client_creator_field() {
        let input: CreateEvent = serde_json::from_value(serde_json::json!({
            "eventName": "5K Run",
            "eventType": "running",
            "eventDate": "2025-06-01",
            "imageUrl": "https://example.com/run.png",
            "location": "Riverside Park",
            "creatorEmail": "spoof@x.com"
        }))
        .unwrap();

        // The spoofed creator is an unknown key to serde; nothing retains it.
        let json = serde_json::to_value(&input).unwrap();
        assert!(json.get("creatorEmail").is_none());
        assert_eq!(json["eventName"], "5K Run");
    }

    #[test]
    fn event_wire_names_are_camel_case() {
        let event = Event {
            id: Some(ObjectId::new()),
            event_name: "5K Run".to_string(),
            event_type: "running".to_string(),
            event_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            description: String::new(),
            image_url: "https://example.com/run.png".to_string(),
            location: "Riverside Park".to_string(),
            creator_email: "a@x.com".to_string(),
        };

        let bson = mongodb::bson::to_document(&event).unwrap();
        assert!(bson.contains_key("_id"));
        assert!(bson.contains_key("eventName"));
        assert!(bson.contains_key("creatorEmail"));
        assert!(!bson.contains_key("event_name"));
    }

    #[test]
    fn event_response_flattens_object_id() {
        let id = ObjectId::new();
        let event = Event {
            id: Some(id),
            event_name: "5K Run".to_string(),
            event_type: "running".to_string(),
            event_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            description: String::new(),
            image_url: "https://example.com/run.png".to_string(),
            location: "Riverside Park".to_string(),
            creator_email: "a@x.com".to_string(),
        };

        let response = EventResponse::from(event);
        assert_eq!(response.id, id.to_hex());
    }

    #[test]
    fn booking_round_trips_through_bson() {
        let booking = Booking {
            id: None,
            event_id: ObjectId::new().to_hex(),
            user_email: "a@x.com".to_string(),
        };

        let bson = mongodb::bson::to_document(&booking).unwrap();
        assert_eq!(
            bson.get_str("userEmail").unwrap(),
            booking.user_email.as_str()
        );
        // Unset _id must be omitted so MongoDB assigns one on insert.
        assert!(!bson.contains_key("_id"));
    }
}
