//! Invoice form server
//!
//! Loads `INVOICE_CONFIG` (YAML) if set, otherwise the defaults. With the
//! `postgres` feature the store connects to the database named by
//! `database.url_env`; without it, invoices live in memory.

use invoice_actions::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::var("INVOICE_CONFIG") {
        Ok(path) => AppConfig::from_yaml_file(&path)?,
        Err(_) => AppConfig::default(),
    };

    let builder = ServerBuilder::new().with_revalidator(ViewCache::new());

    #[cfg(feature = "postgres")]
    let builder = {
        let pool = config.database.connect().await?;
        tracing::info!("Connected to PostgreSQL");
        builder.with_store(PostgresInvoiceStore::new(pool))
    };

    #[cfg(not(feature = "postgres"))]
    let builder = {
        tracing::warn!("Built without the postgres feature, invoices are kept in memory");
        builder.with_store(InMemoryInvoiceStore::new())
    };

    builder.serve(&config.server.bind).await
}
