use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::events::Screenshot;

/// Read-only view of the statistics collector owned by the host runner.
///
/// The aggregator never walks the collector itself; it only asks for the
/// statistics tree of one spec file (by cid and spec hash) when that runner
/// ends.
pub trait StatsSource {
    fn spec_stats(&self, cid: &str, spec_hash: &str) -> Option<&SpecStats>;
}

/// Snapshot of the host runner's statistics collector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    #[serde(default)]
    pub runners: HashMap<String, RunnerStats>,
}

impl StatsSource for RunStats {
    fn spec_stats(&self, cid: &str, spec_hash: &str) -> Option<&SpecStats> {
        self.runners.get(cid).and_then(|r| r.specs.get(spec_hash))
    }
}

/// Per-runner statistics, keyed by spec file hash.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunnerStats {
    pub cid: String,
    pub session_id: String,
    pub specs: IndexMap<String, SpecStats>,
}

/// Statistics for one spec file execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpecStats {
    pub uid: String,
    pub files: Vec<String>,
    pub suites: IndexMap<String, SuiteStats>,
}

impl SpecStats {
    /// Suites worth reporting: insertion order preserved, hook-only suites
    /// dropped. A suite with no tests (e.g. global setup) is noise in a
    /// human-consumed report.
    pub fn reportable_suites(&self) -> Vec<SuiteStats> {
        self.suites
            .values()
            .filter(|suite| !suite.tests.is_empty())
            .cloned()
            .collect()
    }
}

/// A named group of tests and hooks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SuiteStats {
    pub uid: String,
    pub title: String,
    pub tests: IndexMap<String, TestStats>,
    pub hooks: IndexMap<String, HookStats>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub duration_ms: Option<u64>,
}

/// Outcome of a single test as recorded by the statistics collector.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TestState {
    #[default]
    Pending,
    Pass,
    Fail,
}

/// One test record. `uid` is unique across the entire run, which lets the
/// screenshot reconciliation pass match by uid alone, without suite context.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TestStats {
    pub uid: String,
    pub title: String,
    /// Back-reference to the owning suite, by uid.
    pub parent_uid: String,
    pub state: TestState,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<TestError>,
    /// Absent until the reconciliation pass runs at the end of the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_screenshot: Option<Screenshot>,
}

/// Setup/teardown hook record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct HookStats {
    pub uid: String,
    pub title: String,
    pub parent_uid: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<TestError>,
}

/// Error detail attached to a failed test or hook.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TestError {
    pub message: String,
    pub stack: String,
    #[serde(rename = "type")]
    pub error_type: String,
}
