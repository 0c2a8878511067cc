pub mod events;
pub mod state;

use crate::error::{ReportError, Result};
use crate::report::Reporter;
use std::io::BufRead;

pub use events::*;
pub use state::*;

/// Replay a recorded run from newline-delimited JSON events
///
/// Returns whether the suite succeeded, or `None` if the stream ended before
/// a `suiteDidEnd` event.
pub fn replay<B: BufRead, R: Reporter>(
    input: B,
    dispatcher: &mut EventDispatcher<R>,
) -> Result<Option<bool>> {
    let mut outcome = None;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let event: RunEvent = serde_json::from_str(&line).map_err(|source| ReportError::Parse {
            line: index + 1,
            source,
        })?;
        if let RunEvent::SuiteDidEnd { summary } = &event {
            outcome = Some(summary.suite_succeeded);
        }
        dispatcher.handle(&event)?;
    }

    log::debug!("replay finished, outcome {:?}", outcome);
    Ok(outcome)
}
