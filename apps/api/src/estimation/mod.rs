// Salary Estimation Engine
// Implements: formula estimator, negotiation scoring, derived insights, skills ROI.
// Everything here is pure over `ReferenceTables`; only `handlers` touches Axum.

pub mod estimator;
pub mod format;
pub mod handlers;
pub mod insights;
pub mod negotiation;
pub mod skills_roi;

// Re-export the public API consumed by other modules (state, routes).
pub use estimator::{EstimateError, FormulaEstimator, SalaryEstimator};
