//! Typed errors for invoice mutations
//!
//! Every mutation reports failure through [`ActionError`], which separates
//! the two things a caller can react to:
//!
//! - [`ActionError::ValidationFailed`]: the submission was rejected before
//!   anything was written; the field-keyed messages are meant to be shown
//!   next to the form.
//! - [`ActionError::PersistenceFailed`]: the single write statement failed;
//!   the underlying cause is kept as the error source.
//!
//! # Example
//!
//! ```rust,ignore
//! use invoice_actions::prelude::*;
//!
//! match actions.create_invoice(&FormState::default(), &form).await {
//!     Ok(redirect) => println!("go to {}", redirect.location),
//!     Err(ActionError::ValidationFailed { errors, .. }) => {
//!         for (field, messages) in errors.iter() {
//!             println!("{}: {:?}", field, messages);
//!         }
//!     }
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use crate::core::form::{FieldErrors, FormState};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt;

/// The mutation an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "Create",
            Operation::Update => "Update",
            Operation::Delete => "Delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of an invoice mutation
#[derive(Debug)]
pub enum ActionError {
    /// The submission did not pass the invoice schema; nothing was written
    ValidationFailed {
        operation: Operation,
        errors: FieldErrors,
    },

    /// The write statement failed
    PersistenceFailed {
        operation: Operation,
        source: anyhow::Error,
    },
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::ValidationFailed { operation, .. } => {
                write!(f, "Missing Fields. Failed to {} Invoice.", operation)
            }
            ActionError::PersistenceFailed { operation, .. } => {
                write!(f, "Database Error: Failed to {} Invoice.", operation)
            }
        }
    }
}

impl std::error::Error for ActionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ActionError::ValidationFailed { .. } => None,
            ActionError::PersistenceFailed { source, .. } => Some(&**source),
        }
    }
}

impl ActionError {
    pub fn validation(operation: Operation, errors: FieldErrors) -> Self {
        ActionError::ValidationFailed { operation, errors }
    }

    pub fn persistence(operation: Operation, source: anyhow::Error) -> Self {
        ActionError::PersistenceFailed { operation, source }
    }

    pub fn operation(&self) -> Operation {
        match self {
            ActionError::ValidationFailed { operation, .. }
            | ActionError::PersistenceFailed { operation, .. } => *operation,
        }
    }

    /// Field errors, empty for persistence failures
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ActionError::ValidationFailed { errors, .. } => Some(errors),
            ActionError::PersistenceFailed { .. } => None,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ActionError::ValidationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ActionError::PersistenceFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ActionError::ValidationFailed { .. } => "VALIDATION_ERROR",
            ActionError::PersistenceFailed { .. } => "STORAGE_ERROR",
        }
    }

    /// The form state a page should render after this failure
    ///
    /// The storage cause is deliberately left out: it is logged, not shown.
    pub fn to_form_state(&self) -> FormState {
        let errors = self.field_errors().cloned().unwrap_or_default();
        FormState::new(errors, self.to_string())
    }
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_form_state());
        (status, body).into_response()
    }
}

/// A specialized Result type for invoice mutations
pub type ActionResult<T> = Result<T, ActionError>;
