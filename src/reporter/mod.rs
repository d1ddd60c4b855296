pub mod error;
pub mod events;
pub mod state;
pub mod stats;

pub use error::ReporterError;
pub use events::{Capabilities, RunnerEvent, Screenshot};
pub use state::{RunnerRegistry, RunnerResult, TestsNumber};
pub use stats::{RunStats, SpecStats, StatsSource, SuiteStats};

use crate::report::ReportSink;
use crate::utils::config::ReporterOptions;

/// Aggregates runner lifecycle events into per-runner results and writes the
/// final JSON artifact when the run ends.
///
/// One `Reporter` is constructed per run and driven through [`handle`]; all
/// state lives on the instance, there is no process-wide registration. The
/// dispatch is synchronous: each call runs to completion before the next
/// event is processed. If events are ever fed from multiple threads, wrap
/// the reporter in a mutex — the reconciliation pass reads across all
/// runners.
///
/// [`handle`]: Reporter::handle
pub struct Reporter {
    options: ReporterOptions,
    sink: Box<dyn ReportSink>,
    registry: RunnerRegistry,
    failure_screenshots: Vec<Screenshot>,
    persistence_failure: Option<ReporterError>,
}

impl Reporter {
    pub fn new(options: ReporterOptions, sink: Box<dyn ReportSink>) -> Self {
        Self {
            options,
            sink,
            registry: RunnerRegistry::default(),
            failure_screenshots: Vec::new(),
            persistence_failure: None,
        }
    }

    /// Dispatch one event.
    ///
    /// `stats` is the host's statistics collector; it is only consulted on
    /// `runner:end`, when the suite tree for the finished spec is flattened
    /// and attached. An error return means the current event could not be
    /// applied (unknown or duplicate cid) — a persistence failure is *not*
    /// reported here, see [`persistence_failure`].
    ///
    /// [`persistence_failure`]: Reporter::persistence_failure
    pub fn handle(
        &mut self,
        event: RunnerEvent,
        stats: &dyn StatsSource,
    ) -> Result<(), ReporterError> {
        match event {
            RunnerEvent::RunnerStart {
                cid,
                capabilities,
                specs,
                spec_hash,
            } => self.registry.create(&cid, capabilities, specs, &spec_hash),

            RunnerEvent::RunnerEnd { cid, spec_hash, .. } => {
                self.on_runner_end(&cid, &spec_hash, stats)
            }

            RunnerEvent::RunnerScreenshot(screenshot) => {
                self.failure_screenshots.push(screenshot);
                Ok(())
            }

            RunnerEvent::TestPass { cid, .. } => {
                self.registry.find_mut(&cid)?.runner_tests_number.passing += 1;
                Ok(())
            }

            RunnerEvent::TestFail { cid, .. } => {
                self.registry.find_mut(&cid)?.runner_tests_number.failing += 1;
                Ok(())
            }

            RunnerEvent::TestPending { cid, .. } => {
                self.registry.find_mut(&cid)?.runner_tests_number.pending += 1;
                Ok(())
            }

            RunnerEvent::End => {
                self.on_end();
                Ok(())
            }
        }
    }

    /// All per-runner results aggregated so far, in start order.
    pub fn runner_results(&self) -> &[RunnerResult] {
        self.registry.results()
    }

    /// The persistence error from the end-of-run write, if it failed. The
    /// write never fails the run; callers that care can escalate from here.
    pub fn persistence_failure(&self) -> Option<&ReporterError> {
        self.persistence_failure.as_ref()
    }

    fn on_runner_end(
        &mut self,
        cid: &str,
        spec_hash: &str,
        stats: &dyn StatsSource,
    ) -> Result<(), ReporterError> {
        // A missing stats entry yields an empty suite list rather than an
        // error; only the registry lookup is allowed to fail here.
        let suites = stats
            .spec_stats(cid, spec_hash)
            .map(SpecStats::reportable_suites)
            .unwrap_or_default();
        self.registry.attach_suites(cid, suites)
    }

    fn on_end(&mut self) {
        self.reconcile_screenshots();
        self.persist();
    }

    /// Attach each buffered screenshot to the test sharing its uid.
    ///
    /// All-pairs scan: runs once per process lifetime and screenshot volume
    /// is bounded by failing-test volume, so no uid index is built. A
    /// screenshot that matches no test is dropped — it is best-effort
    /// diagnostic data, not authoritative.
    fn reconcile_screenshots(&mut self) {
        for screenshot in &self.failure_screenshots {
            for runner in self.registry.results_mut() {
                for suite in &mut runner.suites {
                    for test in suite.tests.values_mut() {
                        if test.uid == screenshot.uid {
                            test.failure_screenshot = Some(screenshot.clone());
                        }
                    }
                }
            }
        }
    }

    fn persist(&mut self) {
        let dir = self.options.resolved_dir();
        let file = self.options.resolved_file();
        let path = dir.join(&file);

        if let Err(e) = self.sink.write(self.registry.results(), &path) {
            log::error!(
                "Failed to save report file {} to {} directory: {:#}",
                file,
                dir.display(),
                e
            );
            self.persistence_failure = Some(ReporterError::Persistence {
                dir,
                file,
                message: format!("{:#}", e),
            });
        }
    }
}
