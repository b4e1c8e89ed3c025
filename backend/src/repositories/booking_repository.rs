//! Database repository for booking operations.
//!
//! Provides persistence for the `bookings` collection. A duplicate-key
//! violation of the `(eventId, userEmail)` unique index is folded into the
//! insert outcome so the service layer never sees raw driver errors.

use crate::database::Database;
use crate::database::models::{Booking, DeleteResponse, InsertResponse};
use anyhow::Result;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::error::{ErrorKind, WriteFailure};

/// MongoDB error code for a unique-index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Returns true when the error is a duplicate-key write failure.
pub fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        *error.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

/// Outcome of a booking insert.
#[derive(Debug)]
pub enum InsertOutcome {
    /// The booking was persisted.
    Inserted(InsertResponse),
    /// The unique index rejected a duplicate `(eventId, userEmail)` pair.
    Duplicate,
}

/// Persistence capability for bookings.
///
/// The service layer depends on this seam rather than the concrete MongoDB
/// repository, so the duplicate-conflict path can be tested against an
/// in-memory store.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Returns all bookings belonging to the given email.
    async fn find_by_user(&self, user_email: &str) -> Result<Vec<Booking>>;

    /// Inserts a new booking, reporting a duplicate pair as an outcome.
    async fn insert(&self, booking: Booking) -> Result<InsertOutcome>;

    /// Deletes a booking owned by `user_email`; no-op for non-owners.
    async fn delete_owned(&self, id: ObjectId, user_email: &str) -> Result<DeleteResponse>;
}

/// MongoDB-backed repository for booking database operations.
pub struct BookingRepository<'a> {
    /// Shared database handle
    db: &'a Database,
}

impl<'a> BookingRepository<'a> {
    /// Creates a new BookingRepository instance.
    ///
    /// # Arguments
    /// * `db` - Reference to the shared database handle
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookingStore for BookingRepository<'_> {
    async fn find_by_user(&self, user_email: &str) -> Result<Vec<Booking>> {
        let cursor = self
            .db
            .bookings()
            .find(doc! { "userEmail": user_email })
            .await?;
        let bookings = cursor.try_collect().await?;
        Ok(bookings)
    }

    async fn insert(&self, booking: Booking) -> Result<InsertOutcome> {
        match self.db.bookings().insert_one(booking).await {
            Ok(result) => Ok(InsertOutcome::Inserted(result.into())),
            Err(error) if is_duplicate_key(&error) => Ok(InsertOutcome::Duplicate),
            Err(error) => Err(error.into()),
        }
    }

    async fn delete_owned(&self, id: ObjectId, user_email: &str) -> Result<DeleteResponse> {
        let filter = doc! { "_id": id, "userEmail": user_email };

        let result = self.db.bookings().delete_one(filter).await?;
        Ok(result.into())
    }
}
