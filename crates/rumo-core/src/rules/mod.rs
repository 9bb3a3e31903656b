//! Decision rules
//!
//! - **state** - Check-in → ATTACK / CAUTION / CRITICAL
//! - **alerts** - Basic and advanced alert rule sets
//! - **guidance** - DO / HOLD / CUT for the day
//! - **action** - Single recommended next action

pub mod action;
pub mod alerts;
pub mod guidance;
pub mod state;

pub use action::recommend_action;
pub use alerts::{generate_advanced_alerts, generate_alerts};
pub use guidance::{guidance, Guidance, GuidanceMode};
pub use state::classify_state;
