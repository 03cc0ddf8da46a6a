/// 日志级别（可被 RUST_LOG 覆盖）
pub const LOG_LEVEL: &str = "info";

// ============================================================================
// Channel defaults
// ============================================================================

/// Load-oscillation frequency for bit 1 (Hz)
pub const DEFAULT_HIGH_FREQ_HZ: f64 = 400_000.0;

/// Load-oscillation frequency for bit 0 (Hz)
pub const DEFAULT_LOW_FREQ_HZ: f64 = 200_000.0;

/// Symbols per second
pub const DEFAULT_SYMBOL_RATE_HZ: f64 = 1.0;

/// Busy fraction of each oscillation period
pub const DEFAULT_DUTY_RATIO: f64 = 0.5;

// ============================================================================
// Sweep defaults (diagnostic)
// ============================================================================

/// How long each sweep step is held (microseconds)
pub const DEFAULT_SWEEP_STEP_MICROS: u64 = 5_000;

/// Last frequency of the sweep (Hz)
pub const DEFAULT_SWEEP_MAX_FREQ_HZ: f64 = 500_000.0;

/// Increment between sweep steps (Hz)
pub const DEFAULT_SWEEP_INCREMENT_HZ: f64 = 100.0;
