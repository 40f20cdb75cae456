//! Core module: the validated invoice mutation pipeline

pub mod actions;
pub mod effects;
pub mod error;
pub mod form;
pub mod invoice;
pub mod store;
pub mod validation;

pub use actions::InvoiceActions;
pub use effects::{INVOICES_PATH, NoopRevalidator, Redirect, Revalidator, ViewCache};
pub use error::{ActionError, ActionResult, Operation};
pub use form::{FieldErrors, FormData, FormState};
pub use invoice::{Invoice, InvoiceChanges, InvoiceForm, InvoiceStatus, NewInvoice};
pub use store::InvoiceStore;
pub use validation::InvoiceSchema;
