use super::color::{Colorizer, Style};
use crate::runner::state::{Measurement, SpecSummary};

pub const NO_MEASUREMENTS: &str = "Found no measurements";

/// Formats every measurement attached to `spec` as one multi-line report.
///
/// Measurements are listed in name order, one block each, separated by a
/// blank line.
pub fn measurement_report(spec: &SpecSummary, colorizer: &Colorizer) -> String {
    if spec.measurements.is_empty() {
        return NO_MEASUREMENTS.to_string();
    }

    let mut lines = vec![format!(
        "Ran {} samples:",
        colorizer.paint(Style::BOLD, spec.number_of_samples.to_string())
    )];

    for (i, measurement) in spec.measurements.values().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        if let Some(info) = &measurement.info {
            lines.push(info.clone());
        }
        lines.push(format_measurement(measurement, colorizer));
    }

    lines.join("\n")
}

fn format_measurement(m: &Measurement, colorizer: &Colorizer) -> String {
    let value = |style: Style, v: f64| colorizer.paint(style, format!("{:.3}", v));

    format!(
        "{}:\n  {}: {} {}\n  {}: {} {}\n  {}: {} {} ± {} {}",
        colorizer.paint(Style::BOLD, &m.name),
        m.smallest_label,
        value(Style::GREEN, m.smallest),
        m.units,
        m.largest_label,
        value(Style::RED, m.largest),
        m.units,
        m.average_label,
        value(Style::CYAN, m.average),
        m.units,
        value(Style::CYAN, m.std_deviation),
        m.units,
    )
}
