//! HTTP handlers for invoice form submissions
//!
//! Forms post URL-encoded bodies. Handlers only translate between HTTP and
//! [`InvoiceActions`]; every rule lives in the actions themselves.

use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::core::actions::InvoiceActions;
use crate::core::effects::Redirect;
use crate::core::error::ActionResult;
use crate::core::form::{FormData, FormState};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub actions: InvoiceActions,
}

impl IntoResponse for Redirect {
    /// `303 See Other`, so the browser follows up with a GET
    fn into_response(self) -> Response {
        axum::response::Redirect::to(&self.location).into_response()
    }
}

/// POST /dashboard/invoices/create
///
/// A form post carries no previous state, so validation starts from an
/// empty one.
pub async fn create_invoice(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> ActionResult<Redirect> {
    let form = FormData::from(fields);
    state
        .actions
        .create_invoice(&FormState::default(), &form)
        .await
}

/// POST /dashboard/invoices/{id}/edit
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(fields): Form<Vec<(String, String)>>,
) -> ActionResult<Redirect> {
    let form = FormData::from(fields);
    state.actions.update_invoice(&id, &form).await
}

/// POST /dashboard/invoices/{id}/delete
///
/// No redirect: the button lives on the listing page already.
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ActionResult<StatusCode> {
    state.actions.delete_invoice(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "invoice-actions"
    }))
}
