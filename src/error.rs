use thiserror::Error;

/// Failure taxonomy for the hot spot pipeline
///
/// Every error is fatal for the run and carries the offending quantity so the
/// caller can report which precondition failed. Degenerate neighborhoods are
/// deliberately not here: they are flagged per cell on the result records
/// rather than aborting the run.
#[derive(Debug, Error)]
pub enum HotspotError {
    /// Too few input points, or too few cells after tessellation, for a
    /// cluster pattern to be assessed at all
    #[error("insufficient data: {observed} {what} observed, at least {required} required")]
    InsufficientData {
        observed: usize,
        required: usize,
        what: &'static str,
    },

    /// A zero or negative value reached a square root or division; the
    /// statistic is undefined and must not silently become NaN
    #[error("numeric instability: {0}")]
    NumericInstability(String),

    /// A parameter was rejected before any computation began
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, HotspotError>;
