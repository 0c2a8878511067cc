pub mod error;
pub mod report;
pub mod runner;
pub mod utils;

// Re-export common items
pub use error::ReportError;
pub use report::{ConsoleReporter, CursorState, Reporter};
pub use runner::{replay, EventDispatcher, RunEvent};
pub use utils::config::ReporterConfig;
