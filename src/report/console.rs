use super::color::{Colorizer, Style, ALTERNATING_STYLES};
use super::measurement::measurement_report;
use super::Reporter;
use crate::error::Result;
use crate::runner::state::{SpecFailure, SpecState, SpecSummary, SuiteSummary};
use std::io::{self, Stdout, Write};

const DELIMITER: &str = "------------------------------";
const INDENT: &str = "  ";

/// What kind of output was written last.
///
/// Decides which separator, if any, goes in front of the next block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Nothing printed yet, or only inline header text.
    Top,
    /// The last output was a single progress glyph.
    Streaming,
    /// A multi-line block was started but not closed.
    MidBlock,
    /// A block was closed with a delimiter line.
    EndBlock,
}

/// Renders run events as colorized, indented text on one output stream.
pub struct ConsoleReporter<W: Write = Stdout> {
    out: W,
    colorizer: Colorizer,
    cursor_state: CursorState,
}

impl ConsoleReporter<Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            colorizer: Colorizer::new(color),
            cursor_state: CursorState::Top,
        }
    }

    pub fn cursor_state(&self) -> CursorState {
        self.cursor_state
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub(super) fn paint(&self, style: Style, text: impl AsRef<str>) -> String {
        self.colorizer.paint(style, text)
    }

    fn set_cursor(&mut self, state: CursorState) {
        if self.cursor_state != state {
            log::trace!("cursor {:?} -> {:?}", self.cursor_state, state);
        }
        self.cursor_state = state;
    }

    pub(super) fn print(&mut self, indentation: usize, text: &str) -> io::Result<()> {
        write!(self.out, "{}", indent(indentation, text))
    }

    pub(super) fn println(&mut self, indentation: usize, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", indent(indentation, text))
    }

    pub(super) fn print_new_line(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    fn print_delimiter(&mut self) -> io::Result<()> {
        let line = self.paint(Style::GRAY, DELIMITER);
        self.println(0, &line)
    }

    fn print_banner(&mut self, text: &str, banner_char: char) -> io::Result<()> {
        let rule: String = std::iter::repeat(banner_char)
            .take(text.chars().count())
            .collect();
        self.print_new_line()?;
        self.println(0, text)?;
        self.println(0, &rule)?;
        self.print_new_line()
    }

    /// Separates a new multi-line block from whatever was printed before it.
    fn open_block(&mut self) -> io::Result<()> {
        match self.cursor_state {
            CursorState::Streaming => {
                self.print_new_line()?;
                self.print_delimiter()
            }
            CursorState::MidBlock => self.print_new_line(),
            CursorState::Top | CursorState::EndBlock => Ok(()),
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn print_glyph(&mut self, style: Style, glyph: &str) -> Result<()> {
        let glyph = self.paint(style, glyph);
        self.print(0, &glyph)?;
        self.set_cursor(CursorState::Streaming);
        self.flush()
    }

    fn print_block_with_message(
        &mut self,
        header: &str,
        message: &str,
        spec: &SpecSummary,
        succinct: bool,
    ) -> Result<()> {
        self.open_block()?;
        self.println(0, header)?;

        let indentation = self.print_code_location_block(spec, None, succinct)?;

        if !message.is_empty() {
            self.print_new_line()?;
            self.println(indentation, message)?;
        }

        self.print_delimiter()?;
        self.set_cursor(CursorState::EndBlock);
        self.flush()
    }

    fn print_failure(&mut self, label: &str, spec: &SpecSummary, succinct: bool) -> Result<()> {
        let failure = spec.require_failure()?;

        self.open_block()?;
        let header = self.paint(
            Style::RED.bold(),
            format!("{} [{:.3} seconds]", label, spec.run_time.as_secs_f64()),
        );
        self.println(0, &header)?;

        let indentation = self.print_code_location_block(spec, Some(failure), succinct)?;

        self.print_new_line()?;
        if spec.state == SpecState::Panicked {
            self.print_panic(indentation, failure)?;
        } else {
            let message = self.paint(Style::RED, &failure.message);
            self.println(indentation, &message)?;
            self.print_new_line()?;
            self.println(indentation, &failure.location.to_string())?;
        }

        self.print_delimiter()?;
        self.set_cursor(CursorState::EndBlock);
        self.flush()
    }

    fn print_panic(&mut self, indentation: usize, failure: &SpecFailure) -> io::Result<()> {
        let message = self.paint(Style::RED.bold(), &failure.message);
        let panic = self.paint(Style::RED, &failure.forwarded_panic);
        let trace_label = self.paint(Style::RED, "Full Stack Trace");

        self.println(indentation, &message)?;
        self.println(indentation, &panic)?;
        self.println(indentation, &failure.location.to_string())?;
        self.print_new_line()?;
        self.println(indentation, &trace_label)?;
        self.println(indentation, &failure.location.full_stack_trace)
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn announce_suite(
        &mut self,
        description: &str,
        random_seed: i64,
        randomize_all: bool,
        succinct: bool,
    ) -> Result<()> {
        if succinct {
            let line = format!("[{}] {} ", random_seed, self.paint(Style::BOLD, description));
            self.print(0, &line)?;
            return self.flush();
        }

        self.print_banner(&format!("Running Suite: {}", description), '=')?;
        let seed = self.paint(Style::BOLD, random_seed.to_string());
        self.print(0, &format!("Random Seed: {}", seed))?;
        if randomize_all {
            self.print(0, " - Will randomize all specs")?;
        }
        self.print_new_line()?;
        self.flush()
    }

    fn announce_aggregated_parallel_run(
        &mut self,
        total_nodes: u32,
        succinct: bool,
    ) -> Result<()> {
        if succinct {
            self.print(0, &format!("- {} nodes ", total_nodes))?;
            return self.flush();
        }

        let line = format!(
            "Running in parallel across {} nodes",
            self.paint(Style::BOLD, total_nodes.to_string())
        );
        self.println(0, &line)?;
        self.print_new_line()?;
        self.flush()
    }

    fn announce_parallel_run(
        &mut self,
        node: u32,
        total_nodes: u32,
        specs_to_run: u32,
        total_specs: u32,
        succinct: bool,
    ) -> Result<()> {
        if succinct {
            self.print(0, &format!("- node #{} ", node))?;
            return self.flush();
        }

        let line = format!(
            "Parallel test node {}/{}. Assigned {} of {} specs.",
            self.paint(Style::BOLD, node.to_string()),
            self.paint(Style::BOLD, total_nodes.to_string()),
            self.paint(Style::BOLD, specs_to_run.to_string()),
            self.paint(Style::BOLD, total_specs.to_string()),
        );
        self.println(0, &line)?;
        self.print_new_line()?;
        self.flush()
    }

    fn announce_number_of_specs(
        &mut self,
        specs_to_run: u32,
        total: u32,
        succinct: bool,
    ) -> Result<()> {
        if succinct {
            self.print(0, &format!("- {}/{} specs ", specs_to_run, total))?;
            // progress glyphs follow on the same line
            self.set_cursor(CursorState::Streaming);
            return self.flush();
        }

        let line = format!(
            "Will run {} of {} specs",
            self.paint(Style::BOLD, specs_to_run.to_string()),
            self.paint(Style::BOLD, total.to_string()),
        );
        self.println(0, &line)?;
        self.print_new_line()?;
        self.flush()
    }

    fn announce_spec_run_completion(
        &mut self,
        summary: &SuiteSummary,
        succinct: bool,
    ) -> Result<()> {
        if succinct && summary.suite_succeeded {
            let line = format!(
                " {} {:?} ",
                self.paint(Style::GREEN, "SUCCESS!"),
                summary.run_time
            );
            self.print(0, &line)?;
            return self.flush();
        }

        let (outcome_style, status) = if summary.suite_succeeded {
            (Style::GREEN.bold(), "SUCCESS!")
        } else {
            (Style::RED.bold(), "FAIL!")
        };

        self.print_new_line()?;
        let ran = self.paint(
            outcome_style,
            format!(
                "Ran {} of {} Specs in {:.3} seconds",
                summary.specs_run,
                summary.total_specs,
                summary.run_time.as_secs_f64()
            ),
        );
        self.println(0, &ran)?;

        let line = format!(
            "{} -- {} | {} | {} | {}",
            self.paint(outcome_style, status),
            self.paint(Style::GREEN.bold(), format!("{} Passed", summary.passed)),
            self.paint(Style::RED.bold(), format!("{} Failed", summary.failed)),
            self.paint(Style::YELLOW.bold(), format!("{} Pending", summary.pending)),
            self.paint(Style::CYAN.bold(), format!("{} Skipped", summary.skipped)),
        );
        self.println(0, &line)?;
        self.flush()
    }

    fn announce_spec_will_run(&mut self, spec: &SpecSummary) -> Result<()> {
        spec.validate()?;
        self.open_block()?;

        let texts = &spec.component_texts;
        let outer = texts.get(1..texts.len() - 1).unwrap_or_default();
        for (i, text) in outer.iter().enumerate() {
            let text = self.paint(ALTERNATING_STYLES[i % 2], text);
            self.print(0, &format!("{} ", text))?;
        }

        let mut indentation = 0;
        if texts.len() > 2 {
            indentation = 1;
            self.print_new_line()?;
        }

        let text = self.paint(Style::BOLD, spec.text());
        self.print(indentation, &text)?;
        self.print_new_line()?;
        let location = spec
            .location()
            .map(ToString::to_string)
            .unwrap_or_default();
        let location = self.paint(Style::LIGHT_GRAY, location);
        self.print(indentation, &location)?;
        self.print_new_line()?;

        self.set_cursor(CursorState::MidBlock);
        self.flush()
    }

    fn announce_captured_output(&mut self, spec: &SpecSummary) -> Result<()> {
        spec.validate()?;
        if spec.captured_output.is_empty() {
            return Ok(());
        }

        self.open_block()?;
        self.println(0, &spec.captured_output)?;
        self.set_cursor(CursorState::MidBlock);
        self.flush()
    }

    fn announce_successful_spec(&mut self, spec: &SpecSummary) -> Result<()> {
        spec.validate()?;
        self.print_glyph(Style::GREEN, "•")
    }

    fn announce_successful_slow_spec(
        &mut self,
        spec: &SpecSummary,
        succinct: bool,
    ) -> Result<()> {
        spec.validate()?;
        let header = self.paint(
            Style::GREEN,
            format!("• [SLOW TEST:{:.3} seconds]", spec.run_time.as_secs_f64()),
        );
        self.print_block_with_message(&header, "", spec, succinct)
    }

    fn announce_successful_measurement(
        &mut self,
        spec: &SpecSummary,
        succinct: bool,
    ) -> Result<()> {
        spec.validate()?;
        let header = self.paint(Style::GREEN, "• [MEASUREMENT]");
        let report = measurement_report(spec, &self.colorizer);
        self.print_block_with_message(&header, &report, spec, succinct)
    }

    fn announce_pending_spec(&mut self, spec: &SpecSummary, noisy: bool) -> Result<()> {
        spec.validate()?;
        if noisy {
            let header = self.paint(Style::YELLOW, "P [PENDING]");
            self.print_block_with_message(&header, "", spec, false)
        } else {
            self.print_glyph(Style::YELLOW, "P")
        }
    }

    fn announce_skipped_spec(&mut self, spec: &SpecSummary) -> Result<()> {
        spec.validate()?;
        self.print_glyph(Style::CYAN, "S")
    }

    fn announce_spec_timed_out(&mut self, spec: &SpecSummary, succinct: bool) -> Result<()> {
        self.print_failure("Timeout", spec, succinct)
    }

    fn announce_spec_panicked(&mut self, spec: &SpecSummary, succinct: bool) -> Result<()> {
        self.print_failure("Panic", spec, succinct)
    }

    fn announce_spec_failed(&mut self, spec: &SpecSummary, succinct: bool) -> Result<()> {
        self.print_failure("Failure", spec, succinct)
    }
}

/// Prefixes every line of `text` with `indentation` levels of padding.
fn indent(indentation: usize, text: &str) -> String {
    if indentation == 0 {
        return text.to_string();
    }
    let padding = INDENT.repeat(indentation);
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", padding, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
