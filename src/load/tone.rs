use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, trace};

use super::params::LoadParameters;
use super::tick::TickRunner;
use crate::error::{Result, SignalError};
use crate::timing::MonotonicClock;

/// Summary of one sustained tone.
#[derive(Debug, Clone, Copy)]
pub struct ToneReport {
    pub ticks: u64,
    pub elapsed_micros: u64,
}

/// Holds one load-oscillation frequency for a requested duration by running
/// whole ticks back to back.
pub struct ToneGenerator {
    clock: MonotonicClock,
    ticks: TickRunner,
    stop: Arc<AtomicBool>,
}

impl ToneGenerator {
    pub fn new(clock: MonotonicClock) -> Result<Self> {
        Ok(Self {
            clock,
            ticks: TickRunner::new(clock)?,
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Flag checked at every tick boundary; raising it aborts the current
    /// tone with [`SignalError::Interrupted`]. Never checked mid-spin, so a
    /// tick always completes as a whole.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn core_count(&self) -> usize {
        self.ticks.core_count()
    }

    pub fn tick_runner(&self) -> &TickRunner {
        &self.ticks
    }

    /// Emit a tone at `frequency_hz` for at least `duration_micros`.
    ///
    /// Duration rounds up to a whole number of oscillation periods, never
    /// down: a receiver integrating over the symbol window must see the tone
    /// for the full window.
    pub fn generate_tone(
        &self,
        duration_micros: u64,
        frequency_hz: f64,
        duty_ratio: f64,
    ) -> Result<ToneReport> {
        let params = LoadParameters::new(frequency_hz, duty_ratio)?;
        let start = self.clock.now_micros();
        let mut ticks = 0u64;

        while self.clock.now_micros() - start < duration_micros {
            if self.stop.load(Ordering::SeqCst) {
                return Err(SignalError::Interrupted);
            }
            let report = self.ticks.run_tick(&params)?;
            trace!(
                "tick {}: overshoot {} us",
                ticks,
                report.max_overshoot_micros(&params)
            );
            ticks += 1;
        }

        let elapsed_micros = self.clock.now_micros() - start;
        debug!(
            "tone {} Hz held for {} us over {} ticks (requested {} us)",
            frequency_hz, elapsed_micros, ticks, duration_micros
        );
        Ok(ToneReport {
            ticks,
            elapsed_micros,
        })
    }
}
