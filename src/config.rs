//! Application configuration loaded from a TOML file.
//!
//! Covers the optimizer policy knobs (objective mode, fairness policy,
//! solver timeout) and logging. Missing sections fall back to defaults so
//! a config file is optional for the CLI.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub optimizer: OptimizerConfig,
    pub logging: LoggingConfig,
}

/// Which quantity the objective minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveMode {
    /// Minimize total spend: sum of allocation * cost_per_unit.
    #[default]
    Cost,
    /// Minimize total volume: sum of allocations. Used when no cost
    /// signal is available and the goal is the smallest feasible
    /// allocation meeting stated minimums.
    Volume,
}

/// How strictly allocations are equalized across children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FairnessPolicy {
    /// Pairwise fairness bands plus per-kind floor variables.
    #[default]
    Full,
    /// Only minimum-requirement floors; no pairwise coupling. Matches
    /// the simplified direct-input flow.
    Minimums,
}

/// Optimizer policy settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Objective mode for the model builder.
    pub objective: ObjectiveMode,
    /// Fairness policy for the model builder.
    pub fairness: FairnessPolicy,
    /// Upper bound on one solve attempt, in seconds. An elapsed timeout
    /// is reported as a solver error, never a partial allocation.
    pub solver_timeout_secs: u64,
}

impl OptimizerConfig {
    /// Solve timeout as a [`Duration`].
    #[must_use]
    pub const fn solver_timeout(&self) -> Duration {
        Duration::from_secs(self.solver_timeout_secs)
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            objective: ObjectiveMode::default(),
            fairness: FairnessPolicy::default(),
            solver_timeout_secs: 30,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.optimizer.solver_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "optimizer.solver_timeout_secs",
                reason: "must be greater than zero".into(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
