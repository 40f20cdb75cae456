//! Persistence seam for invoice writes

use crate::core::invoice::{InvoiceChanges, NewInvoice};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Store trait for invoice writes
///
/// Each method issues exactly one statement against the backing store.
/// Implementations never retry and never open a transaction.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert a new invoice row and return the id assigned by the store
    async fn insert(&self, invoice: NewInvoice) -> Result<Uuid>;

    /// Update the caller fields of the row matching `id`
    ///
    /// Returns the number of rows affected. The stored date is not touched.
    async fn update(&self, id: &Uuid, changes: InvoiceChanges) -> Result<u64>;

    /// Delete the row matching `id`, returning the number of rows affected
    async fn delete(&self, id: &Uuid) -> Result<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::invoice::InvoiceStatus;
    use std::sync::Arc;

    struct NullStore;

    #[async_trait]
    impl InvoiceStore for NullStore {
        async fn insert(&self, _invoice: NewInvoice) -> Result<Uuid> {
            Ok(Uuid::nil())
        }

        async fn update(&self, _id: &Uuid, _changes: InvoiceChanges) -> Result<u64> {
            Ok(0)
        }

        async fn delete(&self, _id: &Uuid) -> Result<u64> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_store_is_object_safe() {
        let store: Arc<dyn InvoiceStore> = Arc::new(NullStore);
        let id = store
            .insert(NewInvoice {
                customer_id: "c1".to_string(),
                amount_in_cents: 100,
                status: InvoiceStatus::Paid,
                date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(id, Uuid::nil());
        assert_eq!(store.delete(&id).await.unwrap(), 0);
    }
}
