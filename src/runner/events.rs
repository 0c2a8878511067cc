use super::state::{Parallelism, SpecState, SpecSummary, SuiteConfig, SuiteSummary};
use crate::error::Result;
use crate::report::Reporter;
use crate::utils::config::ReporterConfig;
use serde::{Deserialize, Serialize};

/// Lifecycle events of a test run, in the order the engine emits them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RunEvent {
    SuiteWillBegin {
        config: SuiteConfig,
        summary: SuiteSummary,
    },
    SpecWillRun {
        spec: SpecSummary,
    },
    SpecDidComplete {
        spec: SpecSummary,
    },
    SuiteDidEnd {
        summary: SuiteSummary,
    },
}

/// Decides which announcement each run event turns into.
pub struct EventDispatcher<R: Reporter> {
    reporter: R,
    config: ReporterConfig,
}

impl<R: Reporter> EventDispatcher<R> {
    pub fn new(reporter: R, config: ReporterConfig) -> Self {
        Self { reporter, config }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    pub fn handle(&mut self, event: &RunEvent) -> Result<()> {
        match event {
            RunEvent::SuiteWillBegin { config, summary } => self.suite_will_begin(config, summary),
            RunEvent::SpecWillRun { spec } => self.spec_will_run(spec),
            RunEvent::SpecDidComplete { spec } => self.spec_did_complete(spec),
            RunEvent::SuiteDidEnd { summary } => self.suite_did_end(summary),
        }
    }

    pub fn suite_will_begin(&mut self, config: &SuiteConfig, summary: &SuiteSummary) -> Result<()> {
        let succinct = self.config.succinct;
        log::debug!(
            "suite {:?} starting: {} of {} specs, {:?}",
            config.description,
            summary.specs_run,
            summary.total_specs,
            config.parallelism
        );

        self.reporter.announce_suite(
            &config.description,
            config.random_seed,
            config.randomize_all_specs,
            succinct,
        )?;

        match config.parallelism {
            Parallelism::Node { node, total_nodes } => self.reporter.announce_parallel_run(
                node,
                total_nodes,
                summary.specs_run,
                summary.total_specs,
                succinct,
            ),
            Parallelism::Aggregated { total_nodes } => {
                self.reporter
                    .announce_aggregated_parallel_run(total_nodes, succinct)?;
                self.reporter
                    .announce_number_of_specs(summary.specs_run, summary.total_specs, succinct)
            }
            Parallelism::Serial => self.reporter.announce_number_of_specs(
                summary.specs_run,
                summary.total_specs,
                succinct,
            ),
        }
    }

    pub fn spec_will_run(&mut self, spec: &SpecSummary) -> Result<()> {
        if self.shows_spec_details(spec) {
            self.reporter.announce_spec_will_run(spec)?;
        }
        Ok(())
    }

    pub fn spec_did_complete(&mut self, spec: &SpecSummary) -> Result<()> {
        let succinct = self.config.succinct;
        log::debug!("spec {:?} completed as {:?}", spec.text(), spec.state);

        if self.shows_spec_details(spec) {
            self.reporter.announce_captured_output(spec)?;
        }

        match spec.state {
            SpecState::Passed if spec.is_measurement => {
                self.reporter.announce_successful_measurement(spec, succinct)
            }
            SpecState::Passed if spec.run_time >= self.config.slow_spec_threshold => {
                self.reporter.announce_successful_slow_spec(spec, succinct)
            }
            SpecState::Passed => self.reporter.announce_successful_spec(spec),
            SpecState::Pending => self
                .reporter
                .announce_pending_spec(spec, self.config.noisy_pendings && !succinct),
            SpecState::Skipped => self.reporter.announce_skipped_spec(spec),
            SpecState::TimedOut => self.reporter.announce_spec_timed_out(spec, succinct),
            SpecState::Panicked => self.reporter.announce_spec_panicked(spec, succinct),
            SpecState::Failed => self.reporter.announce_spec_failed(spec, succinct),
        }
    }

    pub fn suite_did_end(&mut self, summary: &SuiteSummary) -> Result<()> {
        log::debug!(
            "suite finished: {} passed, {} failed, {} pending, {} skipped",
            summary.passed,
            summary.failed,
            summary.pending,
            summary.skipped
        );
        self.reporter
            .announce_spec_run_completion(summary, self.config.succinct)
    }

    fn shows_spec_details(&self, spec: &SpecSummary) -> bool {
        self.config.verbose && !spec.is_pending() && !spec.is_skipped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ConsoleReporter, CursorState};
    use crate::runner::state::{CodeLocation, ComponentType, SpecFailure};
    use std::time::Duration;

    /// Records which announcement was called, nothing else.
    #[derive(Default)]
    struct CallLog {
        calls: Vec<String>,
    }

    impl CallLog {
        fn push(&mut self, call: String) -> Result<()> {
            self.calls.push(call);
            Ok(())
        }
    }

    impl Reporter for CallLog {
        fn announce_suite(&mut self, d: &str, seed: i64, all: bool, s: bool) -> Result<()> {
            self.push(format!("suite {} {} {} {}", d, seed, all, s))
        }
        fn announce_aggregated_parallel_run(&mut self, nodes: u32, s: bool) -> Result<()> {
            self.push(format!("aggregated {} {}", nodes, s))
        }
        fn announce_parallel_run(
            &mut self,
            node: u32,
            nodes: u32,
            to_run: u32,
            total: u32,
            s: bool,
        ) -> Result<()> {
            self.push(format!("parallel {} {} {} {} {}", node, nodes, to_run, total, s))
        }
        fn announce_number_of_specs(&mut self, to_run: u32, total: u32, s: bool) -> Result<()> {
            self.push(format!("count {} {} {}", to_run, total, s))
        }
        fn announce_spec_run_completion(&mut self, _: &SuiteSummary, s: bool) -> Result<()> {
            self.push(format!("completion {}", s))
        }
        fn announce_spec_will_run(&mut self, spec: &SpecSummary) -> Result<()> {
            self.push(format!("will-run {}", spec.text()))
        }
        fn announce_captured_output(&mut self, spec: &SpecSummary) -> Result<()> {
            self.push(format!("output {}", spec.text()))
        }
        fn announce_successful_spec(&mut self, spec: &SpecSummary) -> Result<()> {
            self.push(format!("success {}", spec.text()))
        }
        fn announce_successful_slow_spec(&mut self, spec: &SpecSummary, s: bool) -> Result<()> {
            self.push(format!("slow {} {}", spec.text(), s))
        }
        fn announce_successful_measurement(&mut self, spec: &SpecSummary, s: bool) -> Result<()> {
            self.push(format!("measurement {} {}", spec.text(), s))
        }
        fn announce_pending_spec(&mut self, spec: &SpecSummary, noisy: bool) -> Result<()> {
            self.push(format!("pending {} {}", spec.text(), noisy))
        }
        fn announce_skipped_spec(&mut self, spec: &SpecSummary) -> Result<()> {
            self.push(format!("skipped {}", spec.text()))
        }
        fn announce_spec_timed_out(&mut self, spec: &SpecSummary, s: bool) -> Result<()> {
            self.push(format!("timeout {} {}", spec.text(), s))
        }
        fn announce_spec_panicked(&mut self, spec: &SpecSummary, s: bool) -> Result<()> {
            self.push(format!("panic {} {}", spec.text(), s))
        }
        fn announce_spec_failed(&mut self, spec: &SpecSummary, s: bool) -> Result<()> {
            self.push(format!("failure {} {}", spec.text(), s))
        }
    }

    fn spec(text: &str, state: SpecState) -> SpecSummary {
        let mut spec = SpecSummary::new(
            &["Queue", text],
            vec![CodeLocation::new("queue_test.rs", 1), CodeLocation::new("queue_test.rs", 5)],
            state,
        );
        if state.is_failure() {
            spec.failure = Some(SpecFailure {
                message: "nope".to_string(),
                forwarded_panic: String::new(),
                component_index: 1,
                component_type: ComponentType::It,
                location: CodeLocation::new("queue_test.rs", 6),
            });
        }
        spec
    }

    fn dispatcher(config: ReporterConfig) -> EventDispatcher<CallLog> {
        EventDispatcher::new(CallLog::default(), config)
    }

    #[test]
    fn test_serial_suite_announces_spec_count() {
        let mut d = dispatcher(ReporterConfig::default());
        let config = SuiteConfig {
            description: "Queue".to_string(),
            random_seed: 9,
            ..SuiteConfig::default()
        };
        let summary = SuiteSummary {
            total_specs: 4,
            specs_run: 3,
            ..SuiteSummary::default()
        };
        d.suite_will_begin(&config, &summary).unwrap();
        assert_eq!(d.reporter().calls, ["suite Queue 9 false false", "count 3 4 false"]);
    }

    #[test]
    fn test_parallel_suite_announces_node() {
        let mut d = dispatcher(ReporterConfig {
            succinct: true,
            ..ReporterConfig::default()
        });
        let node = SuiteConfig {
            description: "Queue".to_string(),
            random_seed: 1,
            randomize_all_specs: true,
            parallelism: Parallelism::Node {
                node: 2,
                total_nodes: 3,
            },
        };
        let summary = SuiteSummary {
            total_specs: 9,
            specs_run: 3,
            ..SuiteSummary::default()
        };
        d.suite_will_begin(&node, &summary).unwrap();

        let aggregated = SuiteConfig {
            parallelism: Parallelism::Aggregated { total_nodes: 3 },
            ..node
        };
        d.suite_will_begin(&aggregated, &summary).unwrap();

        assert_eq!(
            d.reporter().calls,
            [
                "suite Queue 1 true true",
                "parallel 2 3 3 9 true",
                "suite Queue 1 true true",
                "aggregated 3 true",
                "count 3 9 true",
            ]
        );
    }

    #[test]
    fn test_passed_spec_routing() {
        let mut d = dispatcher(ReporterConfig {
            slow_spec_threshold: Duration::from_secs(2),
            ..ReporterConfig::default()
        });
        let fast = spec("pushes", SpecState::Passed);
        let mut slow = spec("drains", SpecState::Passed);
        slow.run_time = Duration::from_secs(2);
        let mut measured = spec("benchmarks", SpecState::Passed);
        measured.is_measurement = true;
        measured.run_time = Duration::from_secs(10);

        for s in [&fast, &slow, &measured] {
            d.spec_did_complete(s).unwrap();
        }
        assert_eq!(
            d.reporter().calls,
            ["success pushes", "slow drains false", "measurement benchmarks false"]
        );
    }

    #[test]
    fn test_failure_states_routing() {
        let mut d = dispatcher(ReporterConfig {
            succinct: true,
            ..ReporterConfig::default()
        });
        for state in [SpecState::TimedOut, SpecState::Panicked, SpecState::Failed] {
            d.spec_did_complete(&spec("pops", state)).unwrap();
        }
        assert_eq!(
            d.reporter().calls,
            ["timeout pops true", "panic pops true", "failure pops true"]
        );
    }

    #[test]
    fn test_pending_is_quiet_when_succinct() {
        let mut noisy = dispatcher(ReporterConfig::default());
        noisy.spec_did_complete(&spec("later", SpecState::Pending)).unwrap();
        assert_eq!(noisy.reporter().calls, ["pending later true"]);

        let mut quiet = dispatcher(ReporterConfig {
            succinct: true,
            ..ReporterConfig::default()
        });
        quiet.spec_did_complete(&spec("later", SpecState::Pending)).unwrap();
        assert_eq!(quiet.reporter().calls, ["pending later false"]);
    }

    #[test]
    fn test_verbose_announces_spec_and_output() {
        let mut d = dispatcher(ReporterConfig {
            verbose: true,
            ..ReporterConfig::default()
        });
        let passed = spec("pushes", SpecState::Passed);
        let skipped = spec("ignored", SpecState::Skipped);
        d.spec_will_run(&passed).unwrap();
        d.spec_did_complete(&passed).unwrap();
        d.spec_will_run(&skipped).unwrap();
        d.spec_did_complete(&skipped).unwrap();
        assert_eq!(
            d.reporter().calls,
            [
                "will-run pushes",
                "output pushes",
                "success pushes",
                "skipped ignored"
            ]
        );
    }

    #[test]
    fn test_handle_drives_console_reporter() {
        let reporter = ConsoleReporter::new(Vec::new(), false);
        let mut d = EventDispatcher::new(
            reporter,
            ReporterConfig {
                color: false,
                succinct: true,
                ..ReporterConfig::default()
            },
        );
        let summary = SuiteSummary {
            suite_succeeded: false,
            total_specs: 2,
            specs_run: 2,
            passed: 1,
            failed: 1,
            run_time: Duration::from_millis(250),
            ..SuiteSummary::default()
        };
        let events = [
            RunEvent::SuiteWillBegin {
                config: SuiteConfig {
                    description: "Queue".to_string(),
                    random_seed: 3,
                    ..SuiteConfig::default()
                },
                summary: summary.clone(),
            },
            RunEvent::SpecDidComplete {
                spec: spec("pushes", SpecState::Passed),
            },
            RunEvent::SpecDidComplete {
                spec: spec("pops", SpecState::Failed),
            },
        ];
        for event in &events {
            d.handle(event).unwrap();
        }
        assert_eq!(d.reporter().cursor_state(), CursorState::EndBlock);

        d.handle(&RunEvent::SuiteDidEnd { summary }).unwrap();
        let out = String::from_utf8(d.into_reporter().into_inner()).unwrap();
        assert!(out.starts_with("[3] Queue - 2/2 specs •\n------------------------------\nFailure"));
        assert!(out.ends_with("FAIL! -- 1 Passed | 1 Failed | 0 Pending | 0 Skipped\n"));
    }
}
