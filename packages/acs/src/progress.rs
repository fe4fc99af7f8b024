//! Progress reporting for download runs.
//!
//! The driver only talks to [`ProgressCallback`]; the binary renders it as
//! an `indicatif` bar and tests pass [`NullProgress`].

/// Receives progress updates from [`crate::download::download`].
pub trait ProgressCallback: Send + Sync {
    /// Number of (year, state) requests the run will make.
    fn set_total(&self, total: u64);

    /// Counts `delta` finished requests.
    fn inc(&self, delta: u64);

    /// Names the request in flight.
    fn set_message(&self, msg: String);

    /// Ends the run with a summary line.
    fn finish(&self, msg: String);
}

/// Discards all progress updates.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _: u64) {}
    fn inc(&self, _: u64) {}
    fn set_message(&self, _: String) {}
    fn finish(&self, _: String) {}
}
