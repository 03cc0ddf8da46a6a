use tracing::info;

use crate::config::SweepConfig;
use crate::error::Result;
use crate::load::ToneGenerator;
use crate::timing::MonotonicClock;

/// Step through the spectrum, holding each frequency for one step duration.
///
/// Used to characterize the channel before picking tone frequencies: the
/// receiver records the sweep and reads off which bands come through.
pub fn run_sweep(
    clock: &MonotonicClock,
    generator: &ToneGenerator,
    config: &SweepConfig,
) -> Result<()> {
    config.validate()?;

    let steps = (config.max_freq_hz / config.increment_hz) as u64;
    info!(
        "sweep: {} steps up to {} Hz, estimated {:.1} s",
        steps,
        config.max_freq_hz,
        (config.step_duration_micros * steps) as f64 / 1_000_000.0
    );

    let start = clock.now_micros();
    let mut freq = config.increment_hz;
    while freq < config.max_freq_hz {
        generator.generate_tone(config.step_duration_micros, freq, config.duty_ratio)?;
        freq += config.increment_hz;
    }

    info!(
        "sweep finished in {:.1} s",
        (clock.now_micros() - start) as f64 / 1_000_000.0
    );
    Ok(())
}
