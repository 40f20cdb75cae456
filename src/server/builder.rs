//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::{build_health_routes, build_invoice_routes};
use crate::core::actions::InvoiceActions;
use crate::core::effects::Revalidator;
use crate::core::store::InvoiceStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for creating the invoice HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryInvoiceStore::new())
///     .with_revalidator(ViewCache::new())
///     .build()?;
/// ```
#[derive(Default)]
pub struct ServerBuilder {
    store: Option<Arc<dyn InvoiceStore>>,
    revalidator: Option<Arc<dyn Revalidator>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the invoice store (required)
    pub fn with_store(mut self, store: impl InvoiceStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set the view cache revalidated after each mutation
    ///
    /// Without one, revalidation is a no-op.
    pub fn with_revalidator(mut self, revalidator: impl Revalidator + 'static) -> Self {
        self.revalidator = Some(Arc::new(revalidator));
        self
    }

    /// Add custom routes to the server, e.g. the pages rendering the forms
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the mutation entry point without any HTTP wiring
    pub fn build_actions(&mut self) -> Result<InvoiceActions> {
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("InvoiceStore is required. Call .with_store()"))?;

        let mut actions = InvoiceActions::new(store);
        if let Some(revalidator) = self.revalidator.take() {
            actions = actions.with_revalidator(revalidator);
        }
        Ok(actions)
    }

    /// Build the final router
    ///
    /// This generates:
    /// - Health check routes
    /// - Invoice form routes
    /// - Custom routes
    pub fn build(mut self) -> Result<Router> {
        let actions = self.build_actions()?;

        let mut app = build_health_routes().merge(build_invoice_routes(AppState { actions }));
        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
