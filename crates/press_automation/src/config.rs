//! Tunable automation parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Longest emulated hold, in seconds. Matches the hold time a press needs
/// to screw fully down.
pub const DEFAULT_MAX_ACTIVE_SECONDS: f32 = 13.0;

/// Recurring tick period, in milliseconds. Matches the host's internal
/// tick granularity for held interactions.
pub const DEFAULT_TICK_PERIOD_MS: u64 = 25;

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("max_active_seconds must be positive, got {0}")]
    NonPositiveCap(f32),

    #[error("tick_period_ms must be non-zero")]
    ZeroTickPeriod,

    #[error("failed to parse automation config: {0}")]
    Parse(String),
}

/// Automation tuning knobs.
///
/// Missing fields fall back to the defaults, so a config document only
/// needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomationConfig {
    /// Cap on the emulated hold time, in seconds.
    pub max_active_seconds: f32,
    /// Period of the recurring tick, in milliseconds.
    pub tick_period_ms: u64,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            max_active_seconds: DEFAULT_MAX_ACTIVE_SECONDS,
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
        }
    }
}

impl AutomationConfig {
    /// Tick period as a [`Duration`].
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Checks that the knobs describe a runnable automation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_active_seconds > 0.0) {
            return Err(ConfigError::NonPositiveCap(self.max_active_seconds));
        }
        if self.tick_period_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        Ok(())
    }

    /// Parses a RON document and validates the result.
    pub fn from_ron_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
