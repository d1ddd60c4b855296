pub mod report;
pub mod reporter;
pub mod utils;

// Re-export common items
pub use report::{JsonFileSink, ReportSink};
pub use reporter::{Reporter, ReporterError, RunnerEvent};
pub use utils::config::ReporterOptions;
