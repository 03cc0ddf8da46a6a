/// Errors that can abort a transmission.
///
/// Every variant is unrecoverable at the point it occurs: a partial tick or a
/// partial frame is meaningless to a receiver, so all of these propagate to
/// the top-level caller which aborts the run. Retrying is a caller-level
/// policy choice, never done here.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// The monotonic time source does not advance at microsecond granularity.
    #[error("monotonic clock unavailable: {0}")]
    ClockUnavailable(String),

    /// A per-core worker thread could not be spawned.
    #[error("failed to spawn worker for core {core}: {source}")]
    ThreadCreation {
        core: usize,
        source: std::io::Error,
    },

    /// Logical cores could not be enumerated for affinity pinning.
    #[error("cannot enumerate logical cores for affinity pinning")]
    CoreDiscovery,

    /// A frequency, duty ratio or symbol rate outside its valid range.
    /// Rejected before any core is touched.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The payload byte source could not be read. Nothing is transmitted,
    /// not even the preamble.
    #[error("payload source '{path}' unavailable: {source}")]
    PayloadUnavailable {
        path: String,
        source: std::io::Error,
    },

    /// The cancellation flag was raised at a tick or symbol boundary.
    #[error("transmission interrupted")]
    Interrupted,
}

pub type Result<T> = std::result::Result<T, SignalError>;
