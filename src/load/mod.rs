/// Multi-core load generation engine
pub mod oscillator;
pub mod params;
pub mod tick;
pub mod tone;

pub use oscillator::{run_cycle, CycleReport};
pub use params::LoadParameters;
pub use tick::{TickReport, TickRunner};
pub use tone::{ToneGenerator, ToneReport};
