//! Booking business logic service.
//!
//! Handles booking creation, listing, and deletion. The one-booking-per-user
//! invariant is enforced by the database's unique index rather than a
//! read-then-write pre-check, so it also holds under concurrent requests.

use crate::database::models::{
    Booking, BookingResponse, CreateBooking, DeleteResponse, InsertResponse,
};
use crate::database::parse_object_id;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::booking_repository::{BookingStore, InsertOutcome};
use crate::services::validation_failure;
use validator::Validate;

pub struct BookingService<'a> {
    /// Booking persistence capability
    store: &'a dyn BookingStore,
}

impl<'a> BookingService<'a> {
    /// Creates a new BookingService instance.
    ///
    /// # Arguments
    /// * `store` - Reference to the booking store
    pub fn new(store: &'a dyn BookingStore) -> Self {
        Self { store }
    }

    /// Returns the bookings belonging to the given email.
    pub async fn list_bookings_for_user(
        &self,
        user_email: &str,
    ) -> ServiceResult<Vec<BookingResponse>> {
        let bookings = self.store.find_by_user(user_email).await?;

        Ok(bookings.into_iter().map(BookingResponse::from).collect())
    }

    /// Books an event for the verified caller.
    ///
    /// The owner field is stamped from verified claims. A duplicate
    /// `(eventId, userEmail)` pair is rejected by the unique index and
    /// surfaces as a conflict.
    pub async fn create_booking(
        &self,
        input: CreateBooking,
        user_email: &str,
    ) -> ServiceResult<InsertResponse> {
        input.validate().map_err(validation_failure)?;

        let booking = Booking {
            id: None,
            event_id: input.event_id.clone(),
            user_email: user_email.to_string(),
        };

        match self.store.insert(booking).await? {
            InsertOutcome::Inserted(result) => Ok(result),
            InsertOutcome::Duplicate => {
                Err(ServiceError::already_exists("Booking", &input.event_id))
            }
        }
    }

    /// Deletes a booking if the caller owns it; no-op otherwise.
    pub async fn delete_booking(
        &self,
        id: &str,
        user_email: &str,
    ) -> ServiceResult<DeleteResponse> {
        let object_id = parse_object_id(id)?;

        let result = self.store.delete_owned(object_id, user_email).await?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use mongodb::bson::oid::ObjectId;
    use std::sync::Mutex;

    /// Vec-backed store enforcing the `(eventId, userEmail)` unique index.
    struct InMemoryBookings {
        bookings: Mutex<Vec<Booking>>,
    }

    impl InMemoryBookings {
        fn new() -> Self {
            Self {
                bookings: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl BookingStore for InMemoryBookings {
        async fn find_by_user(&self, user_email: &str) -> Result<Vec<Booking>> {
            Ok(self
                .bookings
                .lock()
                .unwrap()
                .iter()
                .filter(|booking| booking.user_email == user_email)
                .cloned()
                .collect())
        }

        async fn insert(&self, mut booking: Booking) -> Result<InsertOutcome> {
            let mut bookings = self.bookings.lock().unwrap();
            if bookings.iter().any(|existing| {
                existing.event_id == booking.event_id && existing.user_email == booking.user_email
            }) {
                return Ok(InsertOutcome::Duplicate);
            }

            let id = ObjectId::new();
            booking.id = Some(id);
            bookings.push(booking);
            Ok(InsertOutcome::Inserted(InsertResponse {
                inserted_id: id.to_hex(),
            }))
        }

        async fn delete_owned(&self, id: ObjectId, user_email: &str) -> Result<DeleteResponse> {
            let mut bookings = self.bookings.lock().unwrap();
            let before = bookings.len();
            bookings
                .retain(|booking| !(booking.id == Some(id) && booking.user_email == user_email));
            Ok(DeleteResponse {
                deleted_count: (before - bookings.len()) as u64,
            })
        }
    }

    fn booking_for(event_id: &str) -> CreateBooking {
        CreateBooking {
            event_id: event_id.to_string(),
        }
    }

    #[tokio::test]
    async fn create_booking_stamps_verified_user() {
        let store = InMemoryBookings::new();
        let service = BookingService::new(&store);
        let event_id = ObjectId::new().to_hex();

        service
            .create_booking(booking_for(&event_id), "a@x.com")
            .await
            .unwrap();

        let mine = service.list_bookings_for_user("a@x.com").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].user_email, "a@x.com");
        assert_eq!(mine[0].event_id, event_id);
    }

    #[tokio::test]
    async fn sequential_duplicate_booking_is_a_conflict() {
        let store = InMemoryBookings::new();
        let service = BookingService::new(&store);
        let event_id = ObjectId::new().to_hex();

        service
            .create_booking(booking_for(&event_id), "a@x.com")
            .await
            .unwrap();

        let error = service
            .create_booking(booking_for(&event_id), "a@x.com")
            .await
            .unwrap_err();
        assert!(matches!(error, ServiceError::AlreadyExists { .. }));

        // Only the first booking was persisted.
        let mine = service.list_bookings_for_user("a@x.com").await.unwrap();
        assert_eq!(mine.len(), 1);
    }

    #[tokio::test]
    async fn different_users_can_book_the_same_event() {
        let store = InMemoryBookings::new();
        let service = BookingService::new(&store);
        let event_id = ObjectId::new().to_hex();

        service
            .create_booking(booking_for(&event_id), "a@x.com")
            .await
            .unwrap();
        service
            .create_booking(booking_for(&event_id), "b@x.com")
            .await
            .unwrap();

        assert_eq!(
            service
                .list_bookings_for_user("b@x.com")
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn delete_by_non_owner_is_a_no_op() {
        let store = InMemoryBookings::new();
        let service = BookingService::new(&store);
        let event_id = ObjectId::new().to_hex();

        let created = service
            .create_booking(booking_for(&event_id), "a@x.com")
            .await
            .unwrap();

        let result = service
            .delete_booking(&created.inserted_id, "b@x.com")
            .await
            .unwrap();
        assert_eq!(result.deleted_count, 0);

        let result = service
            .delete_booking(&created.inserted_id, "a@x.com")
            .await
            .unwrap();
        assert_eq!(result.deleted_count, 1);
        assert!(
            service
                .list_bookings_for_user("a@x.com")
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn create_booking_requires_an_event_id() {
        let store = InMemoryBookings::new();
        let service = BookingService::new(&store);

        let error = service
            .create_booking(booking_for(""), "a@x.com")
            .await
            .unwrap_err();
        assert!(matches!(error, ServiceError::Validation { .. }));
    }
}
