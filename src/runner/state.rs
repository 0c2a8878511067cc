use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Final state of a single spec
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SpecState {
    Passed,
    Failed,
    Panicked,
    TimedOut,
    Skipped,
    Pending,
}

impl SpecState {
    /// States that must carry a [`SpecFailure`] record.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            SpecState::Failed | SpecState::Panicked | SpecState::TimedOut
        )
    }
}

/// Kind of block a failure was raised from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ComponentType {
    BeforeEach,
    JustBeforeEach,
    AfterEach,
    It,
    Measurement,
}

impl ComponentType {
    pub fn label(&self) -> &'static str {
        match self {
            ComponentType::BeforeEach => "BeforeEach",
            ComponentType::JustBeforeEach => "JustBeforeEach",
            ComponentType::AfterEach => "AfterEach",
            ComponentType::It => "It",
            ComponentType::Measurement => "Measurement",
        }
    }
}

/// Source position where a component was declared
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CodeLocation {
    pub file_name: String,
    pub line_number: u32,
    #[serde(default)]
    pub full_stack_trace: String,
}

impl CodeLocation {
    pub fn new(file_name: &str, line_number: u32) -> Self {
        Self {
            file_name: file_name.to_string(),
            line_number,
            full_stack_trace: String::new(),
        }
    }
}

impl fmt::Display for CodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_name, self.line_number)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpecFailure {
    pub message: String,
    /// Rendered value the spec panicked with, empty unless the spec panicked.
    #[serde(default)]
    pub forwarded_panic: String,
    pub component_index: usize,
    pub component_type: ComponentType,
    pub location: CodeLocation,
}

/// Statistical summary of one named measurement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub name: String,
    #[serde(default)]
    pub info: Option<String>,
    pub smallest_label: String,
    pub smallest: f64,
    pub largest_label: String,
    pub largest: f64,
    pub average_label: String,
    pub average: f64,
    pub std_deviation: f64,
    pub units: String,
}

/// Immutable snapshot of a finished (or about to run) spec
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpecSummary {
    /// Outermost container first, the spec's own text last.
    pub component_texts: Vec<String>,
    pub component_code_locations: Vec<CodeLocation>,
    pub state: SpecState,
    #[serde(with = "duration_secs")]
    pub run_time: Duration,
    #[serde(default)]
    pub failure: Option<SpecFailure>,
    #[serde(default)]
    pub captured_output: String,
    #[serde(default)]
    pub is_measurement: bool,
    #[serde(default)]
    pub number_of_samples: u32,
    #[serde(default)]
    pub measurements: BTreeMap<String, Measurement>,
}

impl SpecSummary {
    pub fn new(texts: &[&str], locations: Vec<CodeLocation>, state: SpecState) -> Self {
        Self {
            component_texts: texts.iter().map(|t| t.to_string()).collect(),
            component_code_locations: locations,
            state,
            run_time: Duration::ZERO,
            failure: None,
            captured_output: String::new(),
            is_measurement: false,
            number_of_samples: 0,
            measurements: BTreeMap::new(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state == SpecState::Pending
    }

    pub fn is_skipped(&self) -> bool {
        self.state == SpecState::Skipped
    }

    /// Checks the structural contract every rendering operation relies on.
    pub fn validate(&self) -> Result<()> {
        let count = self.component_texts.len();
        if count == 0 {
            return Err(ReportError::InvalidSpec(
                "spec has no component texts".to_string(),
            ));
        }
        if self.component_code_locations.len() != count {
            return Err(ReportError::InvalidSpec(format!(
                "spec has {} component texts but {} code locations",
                count,
                self.component_code_locations.len()
            )));
        }
        if let Some(failure) = &self.failure {
            if failure.component_index >= count {
                return Err(ReportError::InvalidSpec(format!(
                    "failure component index {} is out of range for {} components",
                    failure.component_index, count
                )));
            }
        }
        Ok(())
    }

    /// Validates the spec and returns its failure record.
    pub fn require_failure(&self) -> Result<&SpecFailure> {
        self.validate()?;
        self.failure.as_ref().ok_or_else(|| {
            ReportError::InvalidSpec(format!(
                "spec in state {:?} carries no failure record",
                self.state
            ))
        })
    }

    pub fn text(&self) -> &str {
        self.component_texts.last().map(String::as_str).unwrap_or("")
    }

    pub fn location(&self) -> Option<&CodeLocation> {
        self.component_code_locations.last()
    }
}

/// Aggregate counts for a whole run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuiteSummary {
    pub suite_succeeded: bool,
    pub total_specs: u32,
    pub specs_run: u32,
    pub passed: u32,
    pub failed: u32,
    pub pending: u32,
    pub skipped: u32,
    #[serde(with = "duration_secs", default)]
    pub run_time: Duration,
}

/// How the current process takes part in a parallel run
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Parallelism {
    #[default]
    Serial,
    #[serde(rename_all = "camelCase")]
    Node { node: u32, total_nodes: u32 },
    #[serde(rename_all = "camelCase")]
    Aggregated { total_nodes: u32 },
}

/// Suite-level settings announced at the start of a run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuiteConfig {
    pub description: String,
    pub random_seed: i64,
    #[serde(default)]
    pub randomize_all_specs: bool,
    #[serde(default)]
    pub parallelism: Parallelism,
}

/// Durations travel as fractional seconds.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
