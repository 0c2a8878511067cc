pub mod color;
pub mod console;
pub mod measurement;
pub mod nested;

use crate::error::Result;
use crate::runner::state::{SpecSummary, SuiteSummary};

pub use color::{Colorizer, Style, ALTERNATING_STYLES};
pub use console::{ConsoleReporter, CursorState};

/// One operation per lifecycle event of a test run.
///
/// Callers invoke these strictly in the order the run happened. Every
/// operation that takes a [`SpecSummary`] validates it before writing, so a
/// malformed summary never produces partial output.
pub trait Reporter {
    fn announce_suite(
        &mut self,
        description: &str,
        random_seed: i64,
        randomize_all: bool,
        succinct: bool,
    ) -> Result<()>;

    fn announce_aggregated_parallel_run(&mut self, total_nodes: u32, succinct: bool)
        -> Result<()>;

    fn announce_parallel_run(
        &mut self,
        node: u32,
        total_nodes: u32,
        specs_to_run: u32,
        total_specs: u32,
        succinct: bool,
    ) -> Result<()>;

    fn announce_number_of_specs(&mut self, specs_to_run: u32, total: u32, succinct: bool)
        -> Result<()>;

    fn announce_spec_run_completion(&mut self, summary: &SuiteSummary, succinct: bool)
        -> Result<()>;

    fn announce_spec_will_run(&mut self, spec: &SpecSummary) -> Result<()>;

    fn announce_captured_output(&mut self, spec: &SpecSummary) -> Result<()>;

    fn announce_successful_spec(&mut self, spec: &SpecSummary) -> Result<()>;

    fn announce_successful_slow_spec(&mut self, spec: &SpecSummary, succinct: bool)
        -> Result<()>;

    fn announce_successful_measurement(&mut self, spec: &SpecSummary, succinct: bool)
        -> Result<()>;

    fn announce_pending_spec(&mut self, spec: &SpecSummary, noisy: bool) -> Result<()>;

    fn announce_skipped_spec(&mut self, spec: &SpecSummary) -> Result<()>;

    fn announce_spec_timed_out(&mut self, spec: &SpecSummary, succinct: bool) -> Result<()>;

    fn announce_spec_panicked(&mut self, spec: &SpecSummary, succinct: bool) -> Result<()>;

    fn announce_spec_failed(&mut self, spec: &SpecSummary, succinct: bool) -> Result<()>;
}
