use serde::{Deserialize, Serialize};

use super::error::ReporterError;
use super::events::Capabilities;
use super::stats::SuiteStats;

/// Aggregate result for one concurrent test-execution worker.
///
/// Created on `runner:start`, mutated by test events, completed by the
/// end-of-run suite attachment. Never deleted for the life of the run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunnerResult {
    pub cid: String,
    pub capabilities: Capabilities,
    pub spec_file_path: Vec<String>,
    pub spec_file_hash: String,
    pub runner_tests_number: TestsNumber,
    pub suites: Vec<SuiteStats>,
}

impl RunnerResult {
    pub fn new(
        cid: &str,
        capabilities: Capabilities,
        specs: Vec<String>,
        spec_hash: &str,
    ) -> Self {
        Self {
            cid: cid.to_string(),
            capabilities,
            spec_file_path: specs,
            spec_file_hash: spec_hash.to_string(),
            runner_tests_number: TestsNumber::default(),
            suites: Vec::new(),
        }
    }
}

/// Pass/pending/fail counters for one runner. Monotonic: incremented only by
/// the three test-event handlers, never reset.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestsNumber {
    pub passing: u32,
    pub pending: u32,
    pub failing: u32,
}

/// Ordered collection of per-runner results, keyed by cid.
///
/// Insertion order is preserved so the final artifact lists runners in the
/// order they started.
#[derive(Debug, Default)]
pub struct RunnerRegistry {
    results: Vec<RunnerResult>,
}

impl RunnerRegistry {
    /// Register a new runner. A cid can only be registered once per run.
    pub fn create(
        &mut self,
        cid: &str,
        capabilities: Capabilities,
        specs: Vec<String>,
        spec_hash: &str,
    ) -> Result<(), ReporterError> {
        if self.results.iter().any(|r| r.cid == cid) {
            return Err(ReporterError::DuplicateRunner {
                cid: cid.to_string(),
            });
        }
        self.results
            .push(RunnerResult::new(cid, capabilities, specs, spec_hash));
        Ok(())
    }

    pub fn find(&self, cid: &str) -> Result<&RunnerResult, ReporterError> {
        self.results
            .iter()
            .find(|r| r.cid == cid)
            .ok_or_else(|| ReporterError::RunnerNotFound {
                cid: cid.to_string(),
            })
    }

    pub fn find_mut(&mut self, cid: &str) -> Result<&mut RunnerResult, ReporterError> {
        self.results
            .iter_mut()
            .find(|r| r.cid == cid)
            .ok_or_else(|| ReporterError::RunnerNotFound {
                cid: cid.to_string(),
            })
    }

    /// Replace the suite list for a runner. Called once, on `runner:end`.
    pub fn attach_suites(
        &mut self,
        cid: &str,
        suites: Vec<SuiteStats>,
    ) -> Result<(), ReporterError> {
        self.find_mut(cid)?.suites = suites;
        Ok(())
    }

    pub fn results(&self) -> &[RunnerResult] {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut [RunnerResult] {
        &mut self.results
    }
}
