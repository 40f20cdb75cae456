//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresInvoiceStore`, backed by a PostgreSQL database via
//! `sqlx::PgPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! invoice-actions = { version = "0.1", features = ["postgres"] }
//! ```
//!
//! # Schema
//!
//! The `invoices` table is owned by the application's migrations, not by
//! this crate:
//!
//! ```sql
//! CREATE TABLE invoices (
//!     id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
//!     customer_id UUID NOT NULL,
//!     amount INT NOT NULL,
//!     status VARCHAR(255) NOT NULL,
//!     date DATE NOT NULL
//! );
//! ```

use crate::core::InvoiceStore;
use crate::core::invoice::{InvoiceChanges, NewInvoice};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

const INSERT_INVOICE: &str = "INSERT INTO invoices (customer_id, amount, status, date) \
     VALUES ($1::uuid, $2, $3, $4) RETURNING id";

const UPDATE_INVOICE: &str = "UPDATE invoices \
     SET customer_id = $1::uuid, amount = $2, status = $3 \
     WHERE id = $4";

const DELETE_INVOICE: &str = "DELETE FROM invoices WHERE id = $1";

/// Invoice store backed by PostgreSQL.
///
/// # Example
///
/// ```rust,ignore
/// use invoice_actions::storage::PostgresInvoiceStore;
///
/// let pool = config.database.connect().await?;
/// let store = PostgresInvoiceStore::new(pool);
/// ```
#[derive(Clone, Debug)]
pub struct PostgresInvoiceStore {
    pool: PgPool,
}

impl PostgresInvoiceStore {
    /// Create a new `PostgresInvoiceStore` with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl InvoiceStore for PostgresInvoiceStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<Uuid> {
        sqlx::query_scalar::<_, Uuid>(INSERT_INVOICE)
            .bind(&invoice.customer_id)
            .bind(invoice.amount_in_cents)
            .bind(invoice.status.as_str())
            .bind(invoice.date)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to insert invoice: {}", e))
    }

    async fn update(&self, id: &Uuid, changes: InvoiceChanges) -> Result<u64> {
        let result = sqlx::query(UPDATE_INVOICE)
            .bind(&changes.customer_id)
            .bind(changes.amount_in_cents)
            .bind(changes.status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to update invoice {}: {}", id, e))?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &Uuid) -> Result<u64> {
        let result = sqlx::query(DELETE_INVOICE)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to delete invoice {}: {}", id, e))?;

        Ok(result.rows_affected())
    }
}
