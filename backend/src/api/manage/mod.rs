//! Module for the creator-scoped manage view.
//!
//! This module lists the events a creator owns so they can maintain them.

pub mod handlers;
pub mod routes;
