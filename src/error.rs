use thiserror::Error;

/// Errors raised while rendering a run.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The caller handed over a summary that breaks the input contract.
    #[error("invalid spec summary: {0}")]
    InvalidSpec(String),

    /// A recorded event stream contained a line that is not a valid event.
    #[error("malformed event on line {line}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = ReportError> = std::result::Result<T, E>;
