use std::time::Duration;

/// Reporter configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ReporterConfig {
    /// Wrap output in ANSI styles
    pub color: bool,

    /// Compact, mostly single-line output
    pub succinct: bool,

    /// Announce each spec before it runs and show captured output
    pub verbose: bool,

    /// Print a full block for pending specs instead of a glyph
    pub noisy_pendings: bool,

    /// Passing specs at least this slow get a slow-test block
    pub slow_spec_threshold: Duration,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            color: true,
            succinct: false,
            verbose: false,
            noisy_pendings: true,
            slow_spec_threshold: Duration::from_secs(5),
        }
    }
}
