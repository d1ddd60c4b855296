use std::path::PathBuf;

/// Default output directory, relative to the working directory.
pub const DEFAULT_RESULTS_DIR: &str = "reports";

/// Default report file name.
pub const DEFAULT_RESULTS_FILE: &str = "report.json";

/// Output configuration for the reporter. Both fields are optional; absence
/// falls back to the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct ReporterOptions {
    /// Overrides the default output directory.
    pub results_dir: Option<PathBuf>,

    /// Overrides the default report file name.
    pub results_file: Option<String>,
}

impl ReporterOptions {
    pub fn resolved_dir(&self) -> PathBuf {
        self.results_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_DIR))
    }

    pub fn resolved_file(&self) -> String {
        self.results_file
            .clone()
            .unwrap_or_else(|| DEFAULT_RESULTS_FILE.to_string())
    }

    /// Full path of the report artifact after applying defaults.
    pub fn report_path(&self) -> PathBuf {
        self.resolved_dir().join(self.resolved_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ReporterOptions::default();
        assert_eq!(options.report_path(), PathBuf::from("reports/report.json"));
    }

    #[test]
    fn test_overrides() {
        let options = ReporterOptions {
            results_dir: Some(PathBuf::from("/tmp/out")),
            results_file: Some("final.json".to_string()),
        };
        assert_eq!(options.report_path(), PathBuf::from("/tmp/out/final.json"));
    }
}
