use crate::error::{Result, SignalError};

/// Parameters for one load oscillation, shared read-only by every core
/// worker of a tick. Never mutated after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadParameters {
    frequency_hz: f64,
    duty_ratio: f64,
}

impl LoadParameters {
    /// Validate and construct. Frequency must be positive and finite, duty
    /// ratio must lie in (0, 1].
    pub fn new(frequency_hz: f64, duty_ratio: f64) -> Result<Self> {
        if !frequency_hz.is_finite() || frequency_hz <= 0.0 {
            return Err(SignalError::InvalidParameter(format!(
                "frequency must be positive, got {frequency_hz} Hz"
            )));
        }
        if !duty_ratio.is_finite() || duty_ratio <= 0.0 || duty_ratio > 1.0 {
            return Err(SignalError::InvalidParameter(format!(
                "duty ratio must be in (0, 1], got {duty_ratio}"
            )));
        }
        Ok(Self {
            frequency_hz,
            duty_ratio,
        })
    }

    pub fn frequency_hz(&self) -> f64 {
        self.frequency_hz
    }

    pub fn duty_ratio(&self) -> f64 {
        self.duty_ratio
    }

    /// Full oscillation period in microseconds.
    pub fn period_micros(&self) -> f64 {
        1_000_000.0 / self.frequency_hz
    }

    /// Busy portion of the period in microseconds.
    pub fn busy_micros(&self) -> f64 {
        self.period_micros() * self.duty_ratio
    }

    /// Idle portion of the period in microseconds. Zero when duty is 1.0.
    pub fn idle_micros(&self) -> f64 {
        self.period_micros() - self.busy_micros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_parameters() {
        let p = LoadParameters::new(200_000.0, 0.5).unwrap();
        assert_eq!(p.period_micros(), 5.0);
        assert_eq!(p.busy_micros(), 2.5);
        assert_eq!(p.idle_micros(), 2.5);
    }

    #[test]
    fn full_duty_has_no_idle() {
        let p = LoadParameters::new(100.0, 1.0).unwrap();
        assert_eq!(p.idle_micros(), 0.0);
        assert_eq!(p.busy_micros(), p.period_micros());
    }

    #[test]
    fn tiny_duty_has_negligible_busy() {
        let p = LoadParameters::new(100.0, 1e-6).unwrap();
        assert!(p.busy_micros() < 1.0);
        assert!(p.idle_micros() > 0.0);
    }

    #[test]
    fn rejects_bad_frequency() {
        assert!(LoadParameters::new(0.0, 0.5).is_err());
        assert!(LoadParameters::new(-1.0, 0.5).is_err());
        assert!(LoadParameters::new(f64::NAN, 0.5).is_err());
        assert!(LoadParameters::new(f64::INFINITY, 0.5).is_err());
    }

    #[test]
    fn rejects_bad_duty_ratio() {
        assert!(LoadParameters::new(100.0, 0.0).is_err());
        assert!(LoadParameters::new(100.0, -0.1).is_err());
        assert!(LoadParameters::new(100.0, 1.1).is_err());
        assert!(LoadParameters::new(100.0, f64::NAN).is_err());
    }
}
