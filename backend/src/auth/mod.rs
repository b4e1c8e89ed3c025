//! Authentication module for token verification and access control.
//!
//! This module provides the bearer-token middleware, the ownership guard,
//! and the verifier capability that talks to the external identity provider.

pub mod middleware;
pub mod verifier;
