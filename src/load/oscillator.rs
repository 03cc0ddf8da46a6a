use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use super::params::LoadParameters;
use crate::timing::{spin_until, MonotonicClock};

/// Measured timing of one oscillation cycle.
///
/// The idle phase uses a scheduler sleep, which is best-effort and may
/// overshoot. That jitter is an accepted property of the channel, so it is
/// reported here instead of being hidden.
#[derive(Debug, Clone, Copy)]
pub struct CycleReport {
    pub busy_micros: u64,
    pub total_micros: u64,
}

/// Run one busy/idle cycle of the load square wave on the calling thread.
///
/// The thread is expected to already be pinned to its core. `busy_count` is
/// raised for exactly the busy phase, letting an observer confirm that all
/// cores are loaded simultaneously.
pub fn run_cycle(
    clock: &MonotonicClock,
    params: &LoadParameters,
    busy_count: &AtomicUsize,
) -> CycleReport {
    let start = clock.now_micros();
    let busy_deadline = start + params.busy_micros().round() as u64;

    busy_count.fetch_add(1, Ordering::SeqCst);
    spin_until(clock, busy_deadline);
    busy_count.fetch_sub(1, Ordering::SeqCst);
    let busy_end = clock.now_micros();

    let idle = params.idle_micros();
    if idle > 0.0 {
        thread::sleep(Duration::from_micros(idle.round() as u64));
    }

    let end = clock.now_micros();
    CycleReport {
        busy_micros: busy_end - start,
        total_micros: end - start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Relative tolerance on the busy phase, which is spin-timed and tight.
    const BUSY_TOLERANCE: f64 = 0.25;

    #[test]
    fn cycle_busy_duration_matches_duty() {
        let clock = MonotonicClock::new().unwrap();
        let params = LoadParameters::new(50.0, 0.5).unwrap();
        let busy_count = AtomicUsize::new(0);

        let report = run_cycle(&clock, &params, &busy_count);

        // 50 Hz at 0.5 duty: 10 ms busy, 20 ms period
        let expected_busy = params.busy_micros();
        let delta = (report.busy_micros as f64 - expected_busy).abs();
        assert!(
            delta <= expected_busy * BUSY_TOLERANCE,
            "busy {} us, expected {} us",
            report.busy_micros,
            expected_busy
        );
        // sleep may overshoot but never undershoots the period
        assert!(report.total_micros as f64 >= params.period_micros() * (1.0 - BUSY_TOLERANCE));
        assert_eq!(busy_count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn full_duty_cycle_never_sleeps() {
        let clock = MonotonicClock::new().unwrap();
        let params = LoadParameters::new(100.0, 1.0).unwrap();
        let busy_count = AtomicUsize::new(0);

        let report = run_cycle(&clock, &params, &busy_count);

        // without a sleep the whole period is busy and overshoot stays small
        assert!(report.busy_micros >= 9_000);
        assert!(report.total_micros < 20_000);
    }

    #[test]
    fn near_zero_duty_cycle_terminates() {
        let clock = MonotonicClock::new().unwrap();
        let params = LoadParameters::new(100.0, 1e-9).unwrap();
        let busy_count = AtomicUsize::new(0);

        let report = run_cycle(&clock, &params, &busy_count);
        assert!(report.busy_micros < 1_000);
    }
}
