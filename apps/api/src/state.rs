use std::sync::Arc;

use crate::config::Config;
use crate::estimation::SalaryEstimator;
use crate::reference::ReferenceTables;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only for the process lifetime; no locking needed.
    pub tables: Arc<ReferenceTables>,
    /// Pluggable estimator. Default: FormulaEstimator.
    pub estimator: Arc<dyn SalaryEstimator>,
}
