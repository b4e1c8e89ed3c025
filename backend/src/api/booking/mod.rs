//! Module for booking API endpoints.
//!
//! This module handles booking creation, the caller's booking list, and
//! booking deletion. All routes require authentication.

pub mod handlers;
pub mod routes;
