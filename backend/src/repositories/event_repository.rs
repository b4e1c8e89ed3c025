//! Database repository for event management operations.
//!
//! Provides CRUD operations for the `events` collection. The mutating
//! operations take the verified creator email and fold it into the filter,
//! so a non-owner's update or delete matches zero documents.

use crate::database::Database;
use crate::database::models::{
    DeleteResponse, Event, InsertResponse, UpdateEvent, UpdateResponse,
};
use anyhow::Result;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, to_document};

/// Persistence capability for events.
///
/// The service layer depends on this seam rather than the concrete MongoDB
/// repository, so ownership rules can be tested against an in-memory store.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Returns all events, unfiltered.
    async fn find_all(&self) -> Result<Vec<Event>>;

    /// Retrieves a single event by its identifier, if it exists.
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Event>>;

    /// Returns all events created by the given email.
    async fn find_by_creator(&self, creator_email: &str) -> Result<Vec<Event>>;

    /// Inserts a new event document, returning the generated identifier.
    async fn insert(&self, event: Event) -> Result<InsertResponse>;

    /// Updates the mutable fields of an event owned by `creator_email`.
    ///
    /// A non-owner or unknown id matches zero documents, which the counts
    /// in the result make visible to the caller.
    async fn update_owned(
        &self,
        id: ObjectId,
        creator_email: &str,
        update: &UpdateEvent,
    ) -> Result<UpdateResponse>;

    /// Deletes an event owned by `creator_email`; no-op for non-owners.
    async fn delete_owned(&self, id: ObjectId, creator_email: &str) -> Result<DeleteResponse>;
}

/// MongoDB-backed repository for event database operations.
pub struct EventRepository<'a> {
    /// Shared database handle
    db: &'a Database,
}

impl<'a> EventRepository<'a> {
    /// Creates a new EventRepository instance.
    ///
    /// # Arguments
    /// * `db` - Reference to the shared database handle
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventStore for EventRepository<'_> {
    async fn find_all(&self) -> Result<Vec<Event>> {
        let cursor = self.db.events().find(doc! {}).await?;
        let events = cursor.try_collect().await?;
        Ok(events)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Event>> {
        let event = self.db.events().find_one(doc! { "_id": id }).await?;
        Ok(event)
    }

    async fn find_by_creator(&self, creator_email: &str) -> Result<Vec<Event>> {
        let cursor = self
            .db
            .events()
            .find(doc! { "creatorEmail": creator_email })
            .await?;
        let events = cursor.try_collect().await?;
        Ok(events)
    }

    async fn insert(&self, event: Event) -> Result<InsertResponse> {
        let result = self.db.events().insert_one(event).await?;
        Ok(result.into())
    }

    async fn update_owned(
        &self,
        id: ObjectId,
        creator_email: &str,
        update: &UpdateEvent,
    ) -> Result<UpdateResponse> {
        let filter = doc! { "_id": id, "creatorEmail": creator_email };
        let patch = doc! { "$set": to_document(update)? };

        let result = self.db.events().update_one(filter, patch).await?;
        Ok(result.into())
    }

    async fn delete_owned(&self, id: ObjectId, creator_email: &str) -> Result<DeleteResponse> {
        let filter = doc! { "_id": id, "creatorEmail": creator_email };

        let result = self.db.events().delete_one(filter).await?;
        Ok(result.into())
    }
}
