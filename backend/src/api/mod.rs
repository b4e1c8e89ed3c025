//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the resource domains:
//! public and creator-scoped events, user bookings, and the manage view.

pub mod booking;
pub mod common;
pub mod event;
pub mod manage;
