//! Module for event management API endpoints.
//!
//! This module handles public event browsing and the authenticated,
//! owner-scoped create, update, and delete operations.

pub mod handlers;
pub mod routes;
