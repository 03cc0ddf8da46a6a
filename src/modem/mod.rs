/// Bit-level protocol: bit expansion, checksum, BFSK symbol mapping, framing
pub mod bfsk;
pub mod bits;
pub mod checksum;
pub mod frame;

pub use bfsk::{BfskModulator, ToneEmitter};
pub use bits::{byte_to_bits, bytes_to_bits};
pub use checksum::{crc8, ChecksumFn};
pub use frame::{frame_bits, FrameSummary, Transmitter, PREAMBLE_BITS};
