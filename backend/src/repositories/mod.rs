//! Data access layer for MongoDB collections.
//!
//! Each repository implements a store trait the service layer depends on;
//! concrete implementations issue exactly one database call per method.
//! Business rules beyond the ownership filters baked into the queries live
//! in the service layer.

pub mod booking_repository;
pub mod event_repository;
