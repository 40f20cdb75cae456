//! # Invoice Actions
//!
//! Server-side mutations for an invoicing dashboard: validate a form
//! submission, write one row to the invoice store, revalidate the cached
//! invoice listing and send the browser back to it.
//!
//! ## Pipeline
//!
//! - **Validation**: `customerId`, `amount` and `status` are checked and
//!   coerced by [`InvoiceSchema`](core::InvoiceSchema); every failing field
//!   is reported, not just the first
//! - **Persistence**: one parameterized statement per mutation through an
//!   [`InvoiceStore`](core::InvoiceStore) (in-memory or PostgreSQL)
//! - **Effects**: `/dashboard/invoices` is revalidated after every write
//!   attempt; create and update return a [`Redirect`](core::Redirect)
//! - **Errors**: validation and storage failures both surface as
//!   [`ActionError`](core::ActionError), never as a panic or a silent log line
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invoice_actions::prelude::*;
//!
//! let store = InMemoryInvoiceStore::new();
//! let actions = InvoiceActions::new(Arc::new(store)).with_revalidator(Arc::new(ViewCache::new()));
//!
//! let form = FormData::new()
//!     .with("customerId", "3958dc9e-712f-4377-85e9-fec4b6a6442a")
//!     .with("amount", "19.99")
//!     .with("status", "pending");
//!
//! let redirect = actions.create_invoice(&FormState::default(), &form).await?;
//! assert_eq!(redirect.location, "/dashboard/invoices");
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        actions::InvoiceActions,
        effects::{INVOICES_PATH, NoopRevalidator, Redirect, Revalidator, ViewCache},
        error::{ActionError, ActionResult, Operation},
        form::{FieldErrors, FormData, FormState},
        invoice::{Invoice, InvoiceChanges, InvoiceForm, InvoiceStatus, NewInvoice},
        store::InvoiceStore,
        validation::InvoiceSchema,
    };

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::{InMemoryInvoiceStore, Statement};
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresInvoiceStore;

    // === Config ===
    pub use crate::config::{AppConfig, ConfigError, DatabaseConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::NaiveDate;
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
