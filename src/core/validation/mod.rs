//! Validation of invoice form submissions
//!
//! `validators` holds single-field rules; `schema` combines them into the
//! invoice form contract.

pub mod schema;
pub mod validators;

pub use schema::InvoiceSchema;
