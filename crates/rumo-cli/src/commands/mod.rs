//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `session` - Session loading (snapshot + config) and output helpers
//! - `insights` - State, insights, alerts, guidance and next-action commands
//! - `automations` - Check-in suggestion, overload, projection and weekly commands

pub mod automations;
pub mod insights;
pub mod session;

// Re-export command functions for main.rs
pub use automations::*;
pub use insights::*;
pub use session::*;
