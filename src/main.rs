use std::sync::Arc;

use bookshelf::config::Config;
use bookshelf::datamodel::Catalog;
use bookshelf::logging::init_tracing;
use bookshelf::server::make_app;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing(&config.log_filter)?;

    let catalog = Arc::new(Catalog::builtin()?);
    info!(
        authors = catalog.authors().len(),
        books = catalog.books().len(),
        "catalog loaded"
    );

    let app = make_app(catalog);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
