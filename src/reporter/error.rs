use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the aggregator.
#[derive(Debug, Error)]
pub enum ReporterError {
    /// An event referenced a cid that never appeared in a `runner:start`.
    /// Signals a broken event-ordering invariant; the handler does not
    /// attempt recovery.
    #[error("results with runner CID {cid} not found")]
    RunnerNotFound { cid: String },

    /// A second `runner:start` arrived for an already registered cid.
    #[error("runner CID {cid} already registered")]
    DuplicateRunner { cid: String },

    /// The report could not be written. Recovered locally: the run itself is
    /// never failed because reporting failed.
    #[error("failed to save report file {file} to {} directory: {message}", .dir.display())]
    Persistence {
        dir: PathBuf,
        file: String,
        message: String,
    },
}
