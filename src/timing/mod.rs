/// Time source and busy-wait primitive
pub mod clock;
pub mod spin;

pub use clock::MonotonicClock;
pub use spin::spin_until;
