//! Invoice mutations: create, update and delete
//!
//! Each mutation runs the same straight line:
//!
//! 1. validate the submission (create/update only); a rejection returns
//!    [`ActionError::ValidationFailed`] without touching the store or cache
//! 2. issue exactly one write statement
//! 3. revalidate [`INVOICES_PATH`], whatever the outcome of the write
//! 4. return the write failure, or the [`Redirect`] to the listing
//!    (create/update) / `()` (delete)

use crate::core::effects::{INVOICES_PATH, NoopRevalidator, Redirect, Revalidator};
use crate::core::error::{ActionError, ActionResult, Operation};
use crate::core::form::{FormData, FormState};
use crate::core::invoice::{self, DATE_FORMAT, InvoiceForm};
use crate::core::store::InvoiceStore;
use crate::core::validation::InvoiceSchema;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

/// Source of "today" for newly created invoices
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Entry point for invoice mutations
///
/// Cheap to clone; shared across request handlers.
#[derive(Clone)]
pub struct InvoiceActions {
    store: Arc<dyn InvoiceStore>,
    revalidator: Arc<dyn Revalidator>,
    clock: Clock,
}

impl InvoiceActions {
    /// Create the mutations over `store`, without a view cache
    pub fn new(store: Arc<dyn InvoiceStore>) -> Self {
        Self {
            store,
            revalidator: Arc::new(NoopRevalidator),
            clock: Arc::new(invoice::today),
        }
    }

    pub fn with_revalidator(mut self, revalidator: Arc<dyn Revalidator>) -> Self {
        self.revalidator = revalidator;
        self
    }

    /// Override the date source used for new invoices
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Create an invoice from a form submission
    ///
    /// `_previous` is the state the form was rendered with; it is accepted
    /// so the signature matches form-action callers, and is not consulted.
    pub async fn create_invoice(
        &self,
        _previous: &FormState,
        form: &FormData,
    ) -> ActionResult<Redirect> {
        let fields = Self::validate(Operation::Create, form)?;

        let date = (self.clock)();
        let new_invoice = fields.into_new_invoice(date);
        let customer_id = new_invoice.customer_id.clone();
        let amount = new_invoice.amount_in_cents;

        let written = self.store.insert(new_invoice).await;
        self.revalidate().await;

        match written {
            Ok(id) => {
                tracing::info!(
                    invoice_id = %id,
                    customer_id = %customer_id,
                    amount,
                    date = %date.format(DATE_FORMAT),
                    "Created invoice"
                );
                Ok(Redirect::invoices())
            }
            Err(e) => Err(Self::persistence_failed(Operation::Create, None, e)),
        }
    }

    /// Update the caller fields of invoice `id`
    pub async fn update_invoice(&self, id: &Uuid, form: &FormData) -> ActionResult<Redirect> {
        let fields = Self::validate(Operation::Update, form)?;

        let written = self.store.update(id, fields.into_changes()).await;
        self.revalidate().await;

        match written {
            Ok(rows) => {
                tracing::info!(invoice_id = %id, rows, "Updated invoice");
                Ok(Redirect::invoices())
            }
            Err(e) => Err(Self::persistence_failed(Operation::Update, Some(id), e)),
        }
    }

    /// Delete invoice `id`
    ///
    /// Deleting an id that matches no row is not an error.
    pub async fn delete_invoice(&self, id: &Uuid) -> ActionResult<()> {
        let written = self.store.delete(id).await;
        self.revalidate().await;

        match written {
            Ok(0) => {
                tracing::debug!(invoice_id = %id, "Delete matched no invoice");
                Ok(())
            }
            Ok(rows) => {
                tracing::info!(invoice_id = %id, rows, "Deleted invoice");
                Ok(())
            }
            Err(e) => Err(Self::persistence_failed(Operation::Delete, Some(id), e)),
        }
    }

    fn validate(operation: Operation, form: &FormData) -> ActionResult<InvoiceForm> {
        InvoiceSchema::safe_parse(form).map_err(|errors| {
            tracing::warn!(
                operation = %operation,
                fields = ?errors.fields().collect::<Vec<_>>(),
                "Invoice submission rejected"
            );
            ActionError::validation(operation, errors)
        })
    }

    async fn revalidate(&self) {
        self.revalidator.revalidate_path(INVOICES_PATH).await;
    }

    fn persistence_failed(
        operation: Operation,
        id: Option<&Uuid>,
        error: anyhow::Error,
    ) -> ActionError {
        match id {
            Some(id) => tracing::error!(
                operation = %operation,
                invoice_id = %id,
                "Invoice write failed: {:#}",
                error
            ),
            None => tracing::error!(operation = %operation, "Invoice write failed: {:#}", error),
        }
        ActionError::persistence(operation, error)
    }
}
