//! Analytics configuration
//!
//! Tunable windows and thresholds for the analytics components. Business
//! scoring tables (penalty tiers, factor weights) are constants in their
//! modules and are not configurable.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override (explicit path, or ~/.local/share/rumo/config/analytics.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analytics.toml");

#[derive(Debug, Clone, PartialEq)]
pub struct FinanceConfig {
    pub ema_period: usize,
    pub anomaly_threshold: f64,
    pub summary_window_days: u32,
    pub forecast_horizon_days: usize,
    pub anomaly_recent_days: usize,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            ema_period: 7,
            anomaly_threshold: 2.0,
            summary_window_days: 30,
            forecast_horizon_days: 7,
            anomaly_recent_days: 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    pub lookback_days: u32,
    pub horizons: Vec<u32>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            lookback_days: 90,
            horizons: vec![30, 60, 90],
        }
    }
}

/// Analytics configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsConfig {
    pub finance: FinanceConfig,
    pub stalled_threshold_days: i64,
    pub projection: ProjectionConfig,
    pub suggestion_lookback_days: u32,
    pub overload_window: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            finance: FinanceConfig::default(),
            stalled_threshold_days: 7,
            projection: ProjectionConfig::default(),
            suggestion_lookback_days: 30,
            overload_window: 7,
        }
    }
}

impl AnalyticsConfig {
    /// Load using the default resolution order
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load from a specific override path (falls back to defaults if it does not exist)
    pub fn load_from(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Parse from TOML content, overlaying onto defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("rumo").join("config").join("analytics.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<AnalyticsConfig> {
    let path = match override_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    let content = match path {
        Some(path) if path.exists() => {
            debug!(path = %path.display(), "Loading analytics config override");
            fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    finance: Option<RawFinance>,
    projects: Option<RawProjects>,
    projection: Option<RawProjection>,
    suggestion: Option<RawSuggestion>,
    overload: Option<RawOverload>,
}

#[derive(Debug, Deserialize)]
struct RawFinance {
    ema_period: Option<usize>,
    anomaly_threshold: Option<f64>,
    summary_window_days: Option<u32>,
    forecast_horizon_days: Option<usize>,
    anomaly_recent_days: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawProjects {
    stalled_threshold_days: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawProjection {
    lookback_days: Option<u32>,
    horizons: Option<Vec<u32>>,
}

#[derive(Debug, Deserialize)]
struct RawSuggestion {
    lookback_days: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawOverload {
    window_days: Option<usize>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<AnalyticsConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AnalyticsConfig::default();

    if let Some(finance) = raw.finance {
        if let Some(period) = finance.ema_period {
            config.finance.ema_period = period;
        }
        if let Some(threshold) = finance.anomaly_threshold {
            config.finance.anomaly_threshold = threshold;
        }
        if let Some(days) = finance.summary_window_days {
            config.finance.summary_window_days = days;
        }
        if let Some(days) = finance.forecast_horizon_days {
            config.finance.forecast_horizon_days = days;
        }
        if let Some(days) = finance.anomaly_recent_days {
            config.finance.anomaly_recent_days = days;
        }
    }

    if let Some(days) = raw.projects.and_then(|p| p.stalled_threshold_days) {
        config.stalled_threshold_days = days;
    }

    if let Some(projection) = raw.projection {
        if let Some(days) = projection.lookback_days {
            config.projection.lookback_days = days;
        }
        if let Some(horizons) = projection.horizons {
            config.projection.horizons = horizons;
        }
    }

    if let Some(days) = raw.suggestion.and_then(|s| s.lookback_days) {
        config.suggestion_lookback_days = days;
    }

    if let Some(window) = raw.overload.and_then(|o| o.window_days) {
        config.overload_window = window;
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &AnalyticsConfig) -> Result<()> {
    if config.finance.ema_period == 0 {
        return Err(Error::Config("finance.ema_period must be at least 1".into()));
    }
    if config.finance.summary_window_days == 0 {
        return Err(Error::Config(
            "finance.summary_window_days must be at least 1".into(),
        ));
    }
    if config.projection.lookback_days < 2 {
        return Err(Error::Config(
            "projection.lookback_days must be at least 2".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_default_matches_struct_default() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, AnalyticsConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = AnalyticsConfig::from_toml(
            r#"
            [finance]
            anomaly_threshold = 3.0

            [projects]
            stalled_threshold_days = 14
            "#,
        )
        .unwrap();

        assert_eq!(config.finance.anomaly_threshold, 3.0);
        assert_eq!(config.finance.ema_period, 7);
        assert_eq!(config.stalled_threshold_days, 14);
        assert_eq!(config.projection.horizons, vec![30, 60, 90]);
    }

    #[test]
    fn test_invalid_toml() {
        let result = AnalyticsConfig::from_toml("[finance\nema_period = ");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_zero_period() {
        let result = AnalyticsConfig::from_toml("[finance]\nema_period = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[overload]\nwindow_days = 10").unwrap();

        let config = AnalyticsConfig::load_from(file.path()).unwrap();
        assert_eq!(config.overload_window, 10);
    }

    #[test]
    fn test_missing_override_uses_defaults() {
        let config = AnalyticsConfig::load_from(Path::new("/nonexistent/analytics.toml")).unwrap();
        assert_eq!(config, AnalyticsConfig::default());
    }
}
