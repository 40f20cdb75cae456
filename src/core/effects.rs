//! Post-mutation effects: view revalidation and redirects
//!
//! After an invoice write the cached invoice listing is stale. Mutations
//! call a [`Revalidator`] for [`INVOICES_PATH`] and, for create/update,
//! hand back a [`Redirect`] to that same view. The redirect is a plain
//! return value, so no error handling around the write can swallow it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Path of the invoice listing view
pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// Cache layer able to drop the cached rendering of a view
#[async_trait]
pub trait Revalidator: Send + Sync {
    /// Mark the cached snapshot of `path` as stale
    async fn revalidate_path(&self, path: &str);
}

/// Revalidator for deployments without a view cache
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRevalidator;

#[async_trait]
impl Revalidator for NoopRevalidator {
    async fn revalidate_path(&self, path: &str) {
        tracing::trace!(path, "No view cache configured, skipping revalidation");
    }
}

/// Navigation target returned by a successful create or update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub location: String,
}

impl Redirect {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    /// Redirect to the invoice listing
    pub fn invoices() -> Self {
        Self::to(INVOICES_PATH)
    }
}

/// In-memory cache of rendered view snapshots
///
/// Cloning shares the underlying cache.
#[derive(Clone, Default)]
pub struct ViewCache {
    snapshots: Arc<RwLock<HashMap<String, Value>>>,
    revalidations: Arc<RwLock<HashMap<String, u64>>>,
    total: Arc<AtomicU64>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached snapshot of `path`, if still fresh
    pub fn get(&self, path: &str) -> Option<Value> {
        self.snapshots
            .read()
            .ok()
            .and_then(|snapshots| snapshots.get(path).cloned())
    }

    /// Store a freshly rendered snapshot of `path`
    pub fn put(&self, path: impl Into<String>, snapshot: Value) {
        match self.snapshots.write() {
            Ok(mut snapshots) => {
                snapshots.insert(path.into(), snapshot);
            }
            Err(e) => tracing::error!("Failed to acquire view cache write lock: {}", e),
        }
    }

    /// How many times `path` was revalidated
    pub fn revalidation_count(&self, path: &str) -> u64 {
        self.revalidations
            .read()
            .ok()
            .and_then(|counts| counts.get(path).copied())
            .unwrap_or(0)
    }

    /// Revalidations across all paths
    pub fn total_revalidations(&self) -> u64 {
        self.total.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Revalidator for ViewCache {
    async fn revalidate_path(&self, path: &str) {
        // A poisoned lock still gets the snapshot dropped
        let mut snapshots = self.snapshots.write().unwrap_or_else(|e| e.into_inner());
        let dropped = snapshots.remove(path).is_some();
        drop(snapshots);

        let mut counts = self.revalidations.write().unwrap_or_else(|e| e.into_inner());
        *counts.entry(path.to_string()).or_insert(0) += 1;
        drop(counts);

        self.total.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(path, dropped, "Revalidated view");
    }
}
