//! Module for database connection setup and common utilities.
//!
//! This module is responsible for initializing the MongoDB client, exposing
//! typed collection handles, and bootstrapping the indexes the service relies
//! on. The client is created once at startup and shared across all requests.

use crate::config::Config;
use crate::errors::{ServiceError, ServiceResult};
use anyhow::Result;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};
use tracing::info;

use crate::database::models::{Booking, Event};

pub mod models;

const EVENTS_COLLECTION: &str = "events";
const BOOKINGS_COLLECTION: &str = "bookings";

#[derive(Clone)]
pub struct Database {
    client: Client,
    database: mongodb::Database,
}

impl Database {
    /// Connects to MongoDB, verifies the connection, and ensures indexes.
    pub async fn new(config: &Config) -> Result<Self> {
        let client = Client::with_uri_str(&config.mongodb_uri).await?;
        let database = client.database(&config.database_name);

        // Fail fast if the deployment is unreachable.
        database.run_command(doc! { "ping": 1 }).await?;
        info!("MongoDB connected");

        let db = Database { client, database };
        db.ensure_indexes().await?;

        Ok(db)
    }

    /// The `events` collection.
    pub fn events(&self) -> Collection<Event> {
        self.database.collection(EVENTS_COLLECTION)
    }

    /// The `bookings` collection.
    pub fn bookings(&self) -> Collection<Booking> {
        self.database.collection(BOOKINGS_COLLECTION)
    }

    /// Creates the unique compound index backing the one-booking-per-user
    /// invariant. Duplicate inserts surface as duplicate-key write errors,
    /// which the booking service maps to a conflict.
    async fn ensure_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "eventId": 1, "userEmail": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.bookings().create_index(index).await?;

        Ok(())
    }

    /// Shuts the client down, draining in-flight operations.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        info!("MongoDB client shut down");
    }
}

/// Parses a path identifier into an ObjectId.
///
/// Malformed identifier syntax is an internal error (HTTP 500), never a
/// not-found: absence can only be determined for well-formed identifiers.
pub fn parse_object_id(id: &str) -> ServiceResult<ObjectId> {
    ObjectId::parse_str(id)
        .map_err(|_| ServiceError::internal_error(format!("Invalid identifier: {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_object_id_accepts_valid_hex() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex()).unwrap(), id);
    }

    #[test]
    fn parse_object_id_rejects_malformed_input() {
        let error = parse_object_id("not-an-object-id").unwrap_err();
        assert!(matches!(error, ServiceError::InternalError { .. }));
    }
}
