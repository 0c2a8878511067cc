use super::color::{Style, ALTERNATING_STYLES};
use super::console::ConsoleReporter;
use crate::error::Result;
use crate::runner::state::{SpecFailure, SpecSummary};
use std::io::Write;

impl<W: Write> ConsoleReporter<W> {
    /// Renders the spec's nesting chain with each level's code location.
    ///
    /// The outermost container is left to the caller unless it is the only
    /// component. When `failure` is given, the level it points at is
    /// highlighted together with the kind of block that failed.
    ///
    /// Returns the indentation any trailing message should use: always 1 in
    /// succinct mode, otherwise the level of the innermost entry.
    pub(super) fn print_code_location_block(
        &mut self,
        spec: &SpecSummary,
        failure: Option<&SpecFailure>,
        succinct: bool,
    ) -> Result<usize> {
        let texts = &spec.component_texts;
        let locations = &spec.component_code_locations;
        let start_index = if texts.len() == 1 { 0 } else { 1 };

        let mut indentation = 0;
        for i in start_index..texts.len() {
            let failing = failure.filter(|f| f.component_index == i);
            match (failing, succinct) {
                (Some(failure), true) => {
                    let text = self.paint(
                        Style::RED.bold(),
                        format!("[{}] {} ", failure.component_type.label(), texts[i]),
                    );
                    self.print(0, &text)?;
                }
                (Some(failure), false) => {
                    let text = self.paint(
                        Style::RED.bold(),
                        format!("{} [{}]", texts[i], failure.component_type.label()),
                    );
                    let location = self.paint(Style::GRAY, format!("({})", locations[i]));
                    self.println(indentation, &text)?;
                    self.println(indentation, &location)?;
                }
                (None, true) => {
                    let text = self.paint(ALTERNATING_STYLES[i % 2], format!("{} ", texts[i]));
                    self.print(0, &text)?;
                }
                (None, false) => {
                    let location = self.paint(Style::GRAY, format!("({})", locations[i]));
                    self.println(indentation, &texts[i])?;
                    self.println(indentation, &location)?;
                }
            }
            indentation += 1;
        }

        if succinct {
            if let Some(last) = locations.last().filter(|_| indentation > 0) {
                let location = self.paint(Style::LIGHT_GRAY, format!("({})", last));
                self.print_new_line()?;
                self.print(0, &location)?;
            }
            self.print_new_line()?;
            Ok(1)
        } else {
            Ok(indentation.saturating_sub(1))
        }
    }
}
