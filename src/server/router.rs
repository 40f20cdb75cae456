//! Router builder utilities for invoice routes

use super::handlers::{AppState, create_invoice, delete_invoice, health_check, update_invoice};
use crate::core::effects::INVOICES_PATH;
use axum::{
    Router,
    routing::{get, post},
};

/// Build invoice routes
///
/// - POST /dashboard/invoices/create - Create an invoice from a form
/// - POST /dashboard/invoices/{id}/edit - Update an invoice from a form
/// - POST /dashboard/invoices/{id}/delete - Delete an invoice
pub fn build_invoice_routes(state: AppState) -> Router {
    Router::new()
        .route(&format!("{}/create", INVOICES_PATH), post(create_invoice))
        .route(&format!("{}/{{id}}/edit", INVOICES_PATH), post(update_invoice))
        .route(&format!("{}/{{id}}/delete", INVOICES_PATH), post(delete_invoice))
        .with_state(state)
}

/// Build health check routes
pub fn build_health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}
