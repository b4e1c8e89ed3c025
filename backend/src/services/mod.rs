//! Business logic services.
//!
//! Services validate input, apply ownership rules, and delegate persistence
//! to the repositories.

use crate::errors::ServiceError;

pub mod booking_service;
pub mod event_service;

/// Collapses validator field errors into a single validation ServiceError.
pub(crate) fn validation_failure(errors: validator::ValidationErrors) -> ServiceError {
    let messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                format!(
                    "{}: {}",
                    field,
                    error.message.as_ref().unwrap_or(&"Invalid value".into())
                )
            })
        })
        .collect();

    ServiceError::validation(messages.join(", "))
}
