use crate::zones::{validate_thresholds, ThresholdError, ZoneModel};

pub const DEFAULT_SQUEEZE_THRESHOLD: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SqueezeConfig {
    pub threshold: f64,
    /// Whether the device reports contact force at all.
    pub force_capable: bool,
}

impl Default for SqueezeConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SQUEEZE_THRESHOLD,
            force_capable: true,
        }
    }
}

impl SqueezeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if (0.0..=1.0).contains(&self.threshold) {
            Ok(())
        } else {
            Err(ConfigError::SqueezeOutOfRange(self.threshold))
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceConfig {
    pub thresholds: &'static [f64],
    pub squeeze: SqueezeConfig,
}

impl ForceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_thresholds(self.thresholds)?;
        self.squeeze.validate()
    }

    pub fn zone_model(&self) -> Result<ZoneModel, ThresholdError> {
        ZoneModel::build(self.thresholds)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Threshold(#[from] ThresholdError),
    #[error("squeeze threshold {0} is outside 0..=1")]
    SqueezeOutOfRange(f64),
    #[error("thresholds cannot change while a contact is being tracked")]
    SessionActive,
}

include!(concat!(env!("OUT_DIR"), "/force_config.rs"));

/// Configuration compiled from `config/force.toml`.
pub fn active_config() -> &'static ForceConfig {
    &FORCE_CONFIG
}
