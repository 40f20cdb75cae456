//! In-memory implementation of InvoiceStore for testing and development

use crate::core::InvoiceStore;
use crate::core::invoice::{Invoice, InvoiceChanges, NewInvoice};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// A write statement issued against the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Insert { id: Uuid },
    Update { id: Uuid },
    Delete { id: Uuid },
}

impl Statement {
    pub fn id(&self) -> Uuid {
        match self {
            Statement::Insert { id } | Statement::Update { id } | Statement::Delete { id } => *id,
        }
    }
}

/// In-memory invoice store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Every statement is recorded, including the ones made to fail through
/// [`fail_writes`](Self::fail_writes).
#[derive(Clone, Default)]
pub struct InMemoryInvoiceStore {
    invoices: Arc<RwLock<HashMap<Uuid, Invoice>>>,
    statements: Arc<RwLock<Vec<Statement>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryInvoiceStore {
    /// Create a new in-memory invoice store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following write fail (or succeed again)
    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn get(&self, id: &Uuid) -> Result<Option<Invoice>> {
        let invoices = self
            .invoices
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(invoices.get(id).cloned())
    }

    /// All rows, newest date first
    pub fn list(&self) -> Result<Vec<Invoice>> {
        let invoices = self
            .invoices
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut rows: Vec<Invoice> = invoices.values().cloned().collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    /// Statements issued so far, in order
    pub fn statements(&self) -> Result<Vec<Statement>> {
        let statements = self
            .statements
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(statements.clone())
    }

    fn record(&self, statement: Statement) -> Result<()> {
        self.statements
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?
            .push(statement);

        if self.failing.load(Ordering::SeqCst) {
            return Err(anyhow!("In-memory store is configured to fail writes"));
        }
        Ok(())
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<Uuid> {
        let id = Uuid::new_v4();
        self.record(Statement::Insert { id })?;

        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        invoices.insert(id, Invoice::from_new(id, invoice));

        Ok(id)
    }

    async fn update(&self, id: &Uuid, changes: InvoiceChanges) -> Result<u64> {
        self.record(Statement::Update { id: *id })?;

        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        match invoices.get_mut(id) {
            Some(invoice) => {
                invoice.apply(changes);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<u64> {
        self.record(Statement::Delete { id: *id })?;

        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(invoices.remove(id).map_or(0, |_| 1))
    }
}
