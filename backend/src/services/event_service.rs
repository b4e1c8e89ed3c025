//! Event business logic service.
//!
//! Handles all event-related operations: public reads, owner-stamped
//! creation, and owner-filtered mutation.

use crate::database::models::{
    CreateEvent, DeleteResponse, Event, EventResponse, InsertResponse, UpdateEvent, UpdateResponse,
};
use crate::database::parse_object_id;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::event_repository::EventStore;
use crate::services::validation_failure;
use validator::Validate;

pub struct EventService<'a> {
    /// Event persistence capability
    store: &'a dyn EventStore,
}

impl<'a> EventService<'a> {
    /// Creates a new EventService instance.
    ///
    /// # Arguments
    /// * `store` - Reference to the event store
    pub fn new(store: &'a dyn EventStore) -> Self {
        Self { store }
    }

    /// Returns all events, unfiltered. Public.
    pub async fn list_events(&self) -> ServiceResult<Vec<EventResponse>> {
        let events = self.store.find_all().await?;

        Ok(events.into_iter().map(EventResponse::from).collect())
    }

    /// Retrieves a single event by its hex identifier. Public.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Malformed identifier syntax (internal error, never not-found)
    /// - A well-formed identifier that resolves to no document (not found)
    pub async fn get_event(&self, id: &str) -> ServiceResult<EventResponse> {
        let object_id = parse_object_id(id)?;

        let event = self
            .store
            .find_by_id(object_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Event", id))?;

        Ok(event.into())
    }

    /// Creates an event with the verified caller stamped as creator.
    ///
    /// Any client-supplied creator field has already been discarded during
    /// deserialization; the authoritative owner is always the verified
    /// identity.
    pub async fn create_event(
        &self,
        input: CreateEvent,
        creator_email: &str,
    ) -> ServiceResult<InsertResponse> {
        input.validate().map_err(validation_failure)?;

        let event = Event {
            id: None,
            event_name: input.event_name,
            event_type: input.event_type,
            event_date: input.event_date,
            description: input.description,
            image_url: input.image_url,
            location: input.location,
            creator_email: creator_email.to_string(),
        };

        let result = self.store.insert(event).await?;

        Ok(result)
    }

    /// Updates an event's mutable fields if the caller owns it.
    ///
    /// A non-owner or unknown id matches zero documents; the counts in the
    /// response let the caller tell that apart from a successful update.
    pub async fn update_event(
        &self,
        id: &str,
        creator_email: &str,
        input: UpdateEvent,
    ) -> ServiceResult<UpdateResponse> {
        input.validate().map_err(validation_failure)?;
        let object_id = parse_object_id(id)?;

        let result = self
            .store
            .update_owned(object_id, creator_email, &input)
            .await?;

        Ok(result)
    }

    /// Deletes an event if the caller owns it; no-op otherwise.
    pub async fn delete_event(
        &self,
        id: &str,
        creator_email: &str,
    ) -> ServiceResult<DeleteResponse> {
        let object_id = parse_object_id(id)?;

        let result = self.store.delete_owned(object_id, creator_email).await?;

        Ok(result)
    }

    /// Returns the events created by the given email (manage view).
    pub async fn list_events_by_creator(
        &self,
        creator_email: &str,
    ) -> ServiceResult<Vec<EventResponse>> {
        let events = self.store.find_by_creator(creator_email).await?;

        Ok(events.into_iter().map(EventResponse::from).collect())
    }
}
