use indicatif::ProgressBar;
use tracing::trace;

use crate::error::{Result, SignalError};
use crate::load::ToneGenerator;

/// Anything that can hold one tone for a duration. The load engine is the
/// real emitter; tests substitute a recording one to inspect the symbol
/// schedule without burning CPU.
pub trait ToneEmitter {
    fn emit_tone(&mut self, duration_micros: u64, frequency_hz: f64, duty_ratio: f64)
        -> Result<()>;
}

impl ToneEmitter for ToneGenerator {
    fn emit_tone(
        &mut self,
        duration_micros: u64,
        frequency_hz: f64,
        duty_ratio: f64,
    ) -> Result<()> {
        self.generate_tone(duration_micros, frequency_hz, duty_ratio)
            .map(|_| ())
    }
}

/// Maps bits to tones: 1 at the high frequency, 0 at the low frequency, one
/// symbol period each, strictly back to back with no inter-symbol gap.
#[derive(Debug, Clone, Copy)]
pub struct BfskModulator {
    high_freq_hz: f64,
    low_freq_hz: f64,
    symbol_micros: u64,
    duty_ratio: f64,
}

impl BfskModulator {
    pub fn new(
        high_freq_hz: f64,
        low_freq_hz: f64,
        symbol_rate_hz: f64,
        duty_ratio: f64,
    ) -> Result<Self> {
        for (name, freq) in [("high", high_freq_hz), ("low", low_freq_hz)] {
            if !freq.is_finite() || freq <= 0.0 {
                return Err(SignalError::InvalidParameter(format!(
                    "{name} tone frequency must be positive, got {freq} Hz"
                )));
            }
        }
        if !symbol_rate_hz.is_finite() || symbol_rate_hz <= 0.0 {
            return Err(SignalError::InvalidParameter(format!(
                "symbol rate must be positive, got {symbol_rate_hz} Hz"
            )));
        }
        if !duty_ratio.is_finite() || duty_ratio <= 0.0 || duty_ratio > 1.0 {
            return Err(SignalError::InvalidParameter(format!(
                "duty ratio must be in (0, 1], got {duty_ratio}"
            )));
        }
        Ok(Self {
            high_freq_hz,
            low_freq_hz,
            symbol_micros: (1_000_000.0 / symbol_rate_hz).round() as u64,
            duty_ratio,
        })
    }

    /// Duration of one symbol in microseconds.
    pub fn symbol_micros(&self) -> u64 {
        self.symbol_micros
    }

    /// Frequency carrying the given bit value.
    pub fn tone_for(&self, bit: u8) -> f64 {
        if bit != 0 {
            self.high_freq_hz
        } else {
            self.low_freq_hz
        }
    }

    /// Transmit the bits in order, one tone per bit.
    pub fn transmit_bits<E: ToneEmitter>(
        &self,
        emitter: &mut E,
        bits: &[u8],
        progress: Option<&ProgressBar>,
    ) -> Result<()> {
        for (index, &bit) in bits.iter().enumerate() {
            trace!("symbol {}: bit {}", index, bit);
            emitter.emit_tone(self.symbol_micros, self.tone_for(bit), self.duty_ratio)?;
            if let Some(bar) = progress {
                bar.inc(1);
            }
        }
        Ok(())
    }
}
