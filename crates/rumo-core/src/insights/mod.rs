//! Operational insights
//!
//! Folds the finance, pattern, project and overload analytics into a single
//! [`OperationalInsights`] value that the alert, guidance and action rules
//! read from.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rumo_core::insights::{compute_operational_insights, AnalysisContext};
//!
//! let ctx = AnalysisContext::load(&store, user_id, today, &config)?;
//! let insights = compute_operational_insights(&ctx);
//! ```

pub mod engine;
pub mod types;

pub use engine::{compute_operational_insights, AnalysisContext};
pub use types::{OperationalInsights, PrioritizedProject, Warning};
