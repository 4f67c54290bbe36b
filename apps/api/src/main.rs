mod config;
mod errors;
mod estimation;
mod models;
mod reference;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::estimation::{FormulaEstimator, SalaryEstimator};
use crate::reference::ReferenceTables;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Salary API v{}", env!("CARGO_PKG_VERSION"));

    // Reference tables are fixed for the process lifetime
    let tables = Arc::new(ReferenceTables::load(config.reference_tables_path.as_deref())?);

    let estimator: Arc<dyn SalaryEstimator> = Arc::new(FormulaEstimator);
    info!("Estimator initialized (backend: {})", estimator.backend());

    let state = AppState {
        config: config.clone(),
        tables,
        estimator,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
