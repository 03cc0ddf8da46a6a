use indicatif::ProgressBar;
use tracing::info;

use super::bfsk::{BfskModulator, ToneEmitter};
use super::bits::{byte_to_bits, bytes_to_bits};
use super::checksum::{crc8, ChecksumFn};
use crate::config::ChannelConfig;
use crate::error::Result;

/// Fixed synchronization marker sent before every frame. Receivers lock on
/// to this alternating pattern before decoding, so it must never change.
pub const PREAMBLE_BITS: [u8; 8] = [1, 0, 1, 0, 1, 0, 1, 0];

/// The complete on-air bit sequence for a payload:
/// preamble, payload bits, checksum bits, in that fixed order.
///
/// The checksum is computed over the raw payload bytes before any bit
/// expansion, never over the preamble or a re-chunked copy of the payload.
pub fn frame_bits(payload: &[u8], checksum: ChecksumFn) -> Vec<u8> {
    let mut bits = Vec::with_capacity(PREAMBLE_BITS.len() + payload.len() * 8 + 8);
    bits.extend_from_slice(&PREAMBLE_BITS);
    bits.extend(bytes_to_bits(payload));
    bits.extend_from_slice(&byte_to_bits(checksum(payload)));
    bits
}

/// Outcome of one transmitted frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameSummary {
    pub bits_sent: usize,
    pub checksum: u8,
}

/// Frame builder: drives preamble, payload and checksum through the BFSK
/// modulator in sequence.
pub struct Transmitter<E: ToneEmitter> {
    emitter: E,
    modulator: BfskModulator,
    checksum: ChecksumFn,
    progress: Option<ProgressBar>,
}

impl<E: ToneEmitter> Transmitter<E> {
    pub fn new(emitter: E, config: &ChannelConfig) -> Result<Self> {
        let modulator = BfskModulator::new(
            config.high_freq_hz,
            config.low_freq_hz,
            config.symbol_rate_hz,
            config.duty_ratio,
        )?;
        Ok(Self {
            emitter,
            modulator,
            checksum: crc8,
            progress: None,
        })
    }

    /// Replace the default CRC-8 with another one-byte checksum.
    pub fn with_checksum(mut self, checksum: ChecksumFn) -> Self {
        self.checksum = checksum;
        self
    }

    /// Give back the emitter, e.g. to inspect a recording emitter in tests.
    pub fn into_emitter(self) -> E {
        self.emitter
    }

    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = Some(bar);
        self
    }

    /// Total frame length in bits for a payload of `payload_len` bytes.
    pub fn frame_len_bits(payload_len: usize) -> usize {
        PREAMBLE_BITS.len() + payload_len * 8 + 8
    }

    /// Transmit one complete frame. An empty payload still sends the
    /// preamble and the checksum of the empty byte sequence.
    pub fn transmit_frame(&mut self, payload: &[u8]) -> Result<FrameSummary> {
        let checksum = (self.checksum)(payload);
        let total_bits = Self::frame_len_bits(payload.len());
        let estimated_secs =
            total_bits as f64 * self.modulator.symbol_micros() as f64 / 1_000_000.0;
        info!(
            "frame: {} payload bytes, {} bits on air, estimated {:.1} s",
            payload.len(),
            total_bits,
            estimated_secs
        );

        info!("preamble start");
        self.modulator
            .transmit_bits(&mut self.emitter, &PREAMBLE_BITS, self.progress.as_ref())?;
        info!("preamble end");

        info!("payload start");
        let payload_bits = bytes_to_bits(payload);
        self.modulator
            .transmit_bits(&mut self.emitter, &payload_bits, self.progress.as_ref())?;
        info!("payload end");

        info!("checksum start: 0x{checksum:02X}");
        self.modulator.transmit_bits(
            &mut self.emitter,
            &byte_to_bits(checksum),
            self.progress.as_ref(),
        )?;
        info!("checksum end");

        if let Some(bar) = &self.progress {
            bar.finish();
        }
        Ok(FrameSummary {
            bits_sent: total_bits,
            checksum,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_for_single_byte_payload() {
        let bits = frame_bits(&[0x41], crc8);
        let crc = crc8(&[0x41]);

        let mut expected = vec![1, 0, 1, 0, 1, 0, 1, 0];
        expected.extend([0, 1, 0, 0, 0, 0, 0, 1]);
        expected.extend(byte_to_bits(crc));
        assert_eq!(bits, expected);
    }

    #[test]
    fn framing_is_idempotent() {
        let payload = b"idempotent framing";
        assert_eq!(frame_bits(payload, crc8), frame_bits(payload, crc8));
    }

    #[test]
    fn empty_payload_still_framed() {
        let bits = frame_bits(&[], crc8);
        assert_eq!(bits.len(), 16);
        assert_eq!(&bits[..8], &PREAMBLE_BITS);
        assert_eq!(&bits[8..], &byte_to_bits(crc8(&[])));
    }

    #[test]
    fn checksum_excludes_preamble() {
        // a payload equal to the preamble byte must checksum as 0xAA alone
        let bits = frame_bits(&[0xAA], crc8);
        assert_eq!(&bits[16..], &byte_to_bits(crc8(&[0xAA])));
    }
}
