//! BFSK covert-channel transmitter over CPU load.
//!
//! Data leaves the machine as power/EM emanations: every logical core is
//! driven busy/idle in lock-step at one of two oscillation frequencies, and
//! an external receiver decodes the frequency shifts back into bits. The
//! stack, bottom up: a microsecond clock and a non-yielding spin wait
//! ([`timing`]), a per-core oscillator, an all-cores tick and a tone
//! generator ([`load`]), and BFSK symbol mapping plus framing ([`modem`]).

pub mod config;
pub mod error;
pub mod load;
pub mod modem;
pub mod sweep;
pub mod timing;
pub mod ui;
pub mod utils;

pub use error::{Result, SignalError};
