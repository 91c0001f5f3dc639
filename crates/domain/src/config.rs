use serde::{Deserialize, Serialize};

/// Tuning knobs of the weekly scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Factor by which a day may exceed its nominal budget.
    pub margin_multiplier: f64,
    /// Share of the nominal budget after which a day counts as full.
    pub early_exit_ratio: f64,
    /// Maximum sets of one exercise within the cap scope.
    pub set_cap: u32,
    pub set_cap_scope: SetCapScope,
    pub balance_scope: BalanceScope,
    pub no_eligible_variant: VariantFallback,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            margin_multiplier: 1.2,
            early_exit_ratio: 0.95,
            set_cap: 4,
            set_cap_scope: SetCapScope::Day,
            balance_scope: BalanceScope::Week,
            no_eligible_variant: VariantFallback::Drop,
        }
    }
}

impl SchedulerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SchedulerConfig =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.margin_multiplier.is_finite() || self.margin_multiplier < 1.0 {
            return Err(ConfigError::MarginMultiplier(self.margin_multiplier));
        }

        if self.early_exit_ratio.is_nan()
            || self.early_exit_ratio <= 0.0
            || self.early_exit_ratio > self.margin_multiplier
        {
            return Err(ConfigError::EarlyExitRatio(self.early_exit_ratio));
        }

        if self.set_cap == 0 {
            return Err(ConfigError::SetCap);
        }

        Ok(())
    }
}

/// Range over which the per-exercise set cap is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetCapScope {
    Day,
    Week,
}

/// Range over which muscle workload is accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceScope {
    Day,
    Week,
}

/// Handling of exercise codes for which the user is not proficient enough for any variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantFallback {
    Drop,
    FallbackToAll,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(String),
    #[error("margin multiplier must be finite and 1 or greater ({0})")]
    MarginMultiplier(f64),
    #[error("early exit ratio must be greater than 0 and not exceed the margin multiplier ({0})")]
    EarlyExitRatio(f64),
    #[error("set cap must be 1 or greater")]
    SetCap,
}
