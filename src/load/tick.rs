use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::thread;

use core_affinity::CoreId;
use tracing::{debug, warn};

use super::oscillator::{run_cycle, CycleReport};
use super::params::LoadParameters;
use crate::error::{Result, SignalError};
use crate::timing::MonotonicClock;

/// One worker's assignment for a tick, passed by value into its thread.
#[derive(Debug, Clone, Copy)]
struct CoreTask {
    index: usize,
    core: CoreId,
    params: LoadParameters,
}

/// Per-core cycle timings collected from one tick.
#[derive(Debug, Clone)]
pub struct TickReport {
    pub cycles: Vec<CycleReport>,
}

impl TickReport {
    /// Worst sleep overshoot across cores, as observed total minus the
    /// nominal period.
    pub fn max_overshoot_micros(&self, params: &LoadParameters) -> i64 {
        let period = params.period_micros().round() as i64;
        self.cycles
            .iter()
            .map(|c| c.total_micros as i64 - period)
            .max()
            .unwrap_or(0)
    }
}

/// Drives one synchronized busy/idle cycle across every logical core.
///
/// A tick spawns one worker per core, pins it, runs exactly one oscillator
/// cycle on it and joins them all before returning. The join barrier is what
/// keeps consecutive ticks from overlapping; within a tick the workers hold
/// their cores busy in lock-step, which is what makes the aggregate
/// power/EM signal observable.
pub struct TickRunner {
    clock: MonotonicClock,
    cores: Vec<CoreId>,
    busy_workers: Arc<AtomicUsize>,
}

impl TickRunner {
    pub fn new(clock: MonotonicClock) -> Result<Self> {
        let cores = core_affinity::get_core_ids().ok_or(SignalError::CoreDiscovery)?;
        debug!("load engine using {} logical cores", cores.len());
        Ok(Self {
            clock,
            cores,
            busy_workers: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn core_count(&self) -> usize {
        self.cores.len()
    }

    /// Gauge of workers currently in their busy phase. During a tick's busy
    /// phase it reaches `core_count()`, within scheduling jitter.
    pub fn busy_workers(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.busy_workers)
    }

    /// Run one tick: all cores busy, then all cores idle, once.
    ///
    /// Fails with [`SignalError::ThreadCreation`] if any worker cannot be
    /// spawned; a tick with fewer than all cores would change signal
    /// strength unpredictably, so the whole transmission must abort.
    pub fn run_tick(&self, params: &LoadParameters) -> Result<TickReport> {
        let (report_tx, report_rx) = crossbeam_channel::bounded(self.cores.len());
        let clock = self.clock;
        let gauge = &self.busy_workers;

        thread::scope(|scope| -> Result<()> {
            for (index, &core) in self.cores.iter().enumerate() {
                let task = CoreTask {
                    index,
                    core,
                    params: *params,
                };
                let tx = report_tx.clone();
                thread::Builder::new()
                    .name(format!("loadtone-core-{index}"))
                    .spawn_scoped(scope, move || {
                        if !core_affinity::set_for_current(task.core) {
                            warn!("could not pin worker {} to core {:?}", task.index, task.core);
                        }
                        let report = run_cycle(&clock, &task.params, gauge);
                        let _ = tx.send(report);
                    })
                    .map_err(|source| SignalError::ThreadCreation {
                        core: index,
                        source,
                    })?;
            }
            Ok(())
        })?;

        drop(report_tx);
        Ok(TickReport {
            cycles: report_rx.try_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_reports_one_cycle_per_core() {
        let clock = MonotonicClock::new().unwrap();
        let runner = TickRunner::new(clock).unwrap();
        let params = LoadParameters::new(200.0, 0.5).unwrap();

        let report = runner.run_tick(&params).unwrap();
        assert_eq!(report.cycles.len(), runner.core_count());
        for cycle in &report.cycles {
            assert!(cycle.total_micros >= cycle.busy_micros);
        }
    }

    #[test]
    fn ticks_do_not_overlap() {
        let clock = MonotonicClock::new().unwrap();
        let runner = TickRunner::new(clock).unwrap();
        let params = LoadParameters::new(500.0, 0.5).unwrap();

        let start = clock.now_micros();
        runner.run_tick(&params).unwrap();
        let mid = clock.now_micros();
        runner.run_tick(&params).unwrap();
        let end = clock.now_micros();

        // each tick takes at least one period on its own
        let period = params.period_micros() as u64;
        assert!(mid - start >= period);
        assert!(end - mid >= period);
    }
}
