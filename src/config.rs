use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SignalError};
use crate::utils::consts::*;

/// Channel tunables. Defaults match the frequencies a receiver is calibrated
/// against; override via config file or CLI flags.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChannelConfig {
    /// Load-oscillation frequency encoding bit 1 (Hz).
    pub high_freq_hz: f64,
    /// Load-oscillation frequency encoding bit 0 (Hz).
    pub low_freq_hz: f64,
    /// Symbols per second.
    pub symbol_rate_hz: f64,
    /// Busy fraction of each oscillation period, in (0, 1].
    pub duty_ratio: f64,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            high_freq_hz: DEFAULT_HIGH_FREQ_HZ,
            low_freq_hz: DEFAULT_LOW_FREQ_HZ,
            symbol_rate_hz: DEFAULT_SYMBOL_RATE_HZ,
            duty_ratio: DEFAULT_DUTY_RATIO,
        }
    }
}

/// Diagnostic sweep tunables. The sweep walks the spectrum so a receiver-side
/// analysis can pick usable tone frequencies; it is not part of the framing
/// protocol.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// How long each frequency step is held (microseconds).
    pub step_duration_micros: u64,
    /// Last frequency of the sweep (Hz).
    pub max_freq_hz: f64,
    /// Increment between consecutive steps (Hz).
    pub increment_hz: f64,
    pub duty_ratio: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            step_duration_micros: DEFAULT_SWEEP_STEP_MICROS,
            max_freq_hz: DEFAULT_SWEEP_MAX_FREQ_HZ,
            increment_hz: DEFAULT_SWEEP_INCREMENT_HZ,
            duty_ratio: DEFAULT_DUTY_RATIO,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.increment_hz.is_finite() || self.increment_hz <= 0.0 {
            return Err(SignalError::InvalidParameter(format!(
                "sweep increment must be positive, got {} Hz",
                self.increment_hz
            )));
        }
        if !self.max_freq_hz.is_finite() || self.max_freq_hz <= 0.0 {
            return Err(SignalError::InvalidParameter(format!(
                "sweep maximum frequency must be positive, got {} Hz",
                self.max_freq_hz
            )));
        }
        if self.step_duration_micros == 0 {
            return Err(SignalError::InvalidParameter(
                "sweep step duration must be nonzero".into(),
            ));
        }
        Ok(())
    }
}

/// On-disk configuration, JSON with both sections optional.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub channel: ChannelConfig,
    pub sweep: SweepConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|err| {
            SignalError::InvalidParameter(format!("config '{}': {err}", path.display()))
        })?;
        serde_json::from_str(&text).map_err(|err| {
            SignalError::InvalidParameter(format!("config '{}': {err}", path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::default();
        assert!(config.channel.high_freq_hz > config.channel.low_freq_hz);
        assert!(config.channel.duty_ratio > 0.0 && config.channel.duty_ratio <= 1.0);
        assert!(config.sweep.validate().is_ok());
    }

    #[test]
    fn partial_json_overrides_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"channel": {"symbol_rate_hz": 2.0}}"#).unwrap();
        assert_eq!(config.channel.symbol_rate_hz, 2.0);
        assert_eq!(config.channel.high_freq_hz, DEFAULT_HIGH_FREQ_HZ);
    }

    #[test]
    fn unknown_fields_rejected() {
        let parsed: std::result::Result<AppConfig, _> =
            serde_json::from_str(r#"{"chanel": {}}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn sweep_validation() {
        let mut sweep = SweepConfig::default();
        sweep.increment_hz = 0.0;
        assert!(sweep.validate().is_err());
        sweep.increment_hz = 100.0;
        sweep.step_duration_micros = 0;
        assert!(sweep.validate().is_err());
    }
}
