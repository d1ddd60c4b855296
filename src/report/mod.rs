pub mod json;

pub use json::JsonFileSink;

use anyhow::Result;
use std::path::Path;

use crate::reporter::state::RunnerResult;

/// Durable-write collaborator for the final report artifact.
///
/// Implementations must create missing parent directories themselves; the
/// reporter hands over a full path and the complete result set and does not
/// retry on failure.
pub trait ReportSink {
    fn write(&self, results: &[RunnerResult], path: &Path) -> Result<()>;
}
