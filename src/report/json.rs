use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::ReportSink;
use crate::reporter::state::RunnerResult;

/// Writes the result set as a single JSON document on the local filesystem.
///
/// The write is synchronous by design: the run ends right after the terminal
/// event, and process exit must not race the report.
#[derive(Debug, Default)]
pub struct JsonFileSink;

impl ReportSink for JsonFileSink {
    fn write(&self, results: &[RunnerResult], path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("creating report directory {}", dir.display()))?;
            }
        }

        let json = serde_json::to_string_pretty(results)?;
        fs::write(path, json).with_context(|| format!("writing report to {}", path.display()))?;
        Ok(())
    }
}

/// Read a previously written report back into memory.
pub fn read_results(path: &Path) -> Result<Vec<RunnerResult>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading report file {}", path.display()))?;
    let results = serde_json::from_str(&raw)
        .with_context(|| format!("parsing report file {}", path.display()))?;
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::events::Capabilities;

    fn sample_results() -> Vec<RunnerResult> {
        let mut runner = RunnerResult::new(
            "0-0",
            Capabilities {
                browser_name: "chrome".to_string(),
                ..Default::default()
            },
            vec!["login.spec.js".to_string()],
            "h1",
        );
        runner.runner_tests_number.passing = 2;
        runner.runner_tests_number.failing = 1;
        vec![runner]
    }

    #[test]
    fn test_write_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("reports").join("report.json");

        JsonFileSink.write(&sample_results(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_written_report_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let results = sample_results();

        JsonFileSink.write(&results, &path).unwrap();
        assert_eq!(read_results(&path).unwrap(), results);
    }

    #[test]
    fn test_artifact_uses_original_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        JsonFileSink.write(&sample_results(), &path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let runner = &parsed.as_array().unwrap()[0];
        assert_eq!(runner["cid"], "0-0");
        assert_eq!(runner["specFileHash"], "h1");
        assert_eq!(runner["runnerTestsNumber"]["passing"], 2);
        assert_eq!(runner["capabilities"]["browserName"], "chrome");
    }

    #[test]
    fn test_read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_results(&dir.path().join("missing.json")).is_err());
    }
}
