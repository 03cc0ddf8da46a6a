use super::clock::MonotonicClock;

/// Spin until `deadline_micros` on the given clock.
///
/// The loop samples the clock as fast as it can and never yields to the
/// scheduler. That is the point: the spin itself is the CPU load that forms
/// the emitted side-channel signal, so this must not be replaced by a
/// blocking sleep. Callers always pass a deadline in the near future, so the
/// loop cannot run unbounded.
#[inline]
pub fn spin_until(clock: &MonotonicClock, deadline_micros: u64) {
    while clock.now_micros() < deadline_micros {
        std::hint::spin_loop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_reaches_deadline() {
        let clock = MonotonicClock::new().unwrap();
        let deadline = clock.now_micros() + 2_000;
        spin_until(&clock, deadline);
        assert!(clock.now_micros() >= deadline);
    }

    #[test]
    fn past_deadline_returns_immediately() {
        let clock = MonotonicClock::new().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let before = clock.now_micros();
        spin_until(&clock, 0);
        // no full period should have elapsed
        assert!(clock.now_micros() - before < 1_000);
    }
}
