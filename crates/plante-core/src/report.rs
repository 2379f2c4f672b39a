use std::fmt;

use crate::detection::regions::round_area;
use crate::detection::Region;

/// Format an area in shortest form with at least one fractional digit
/// (`4.0`, `12.5`, `0.1234`).
pub fn format_area(area: f64) -> String {
    let s = format!("{area}");
    if area.is_finite() && !s.contains(['.', 'e', 'E']) {
        format!("{s}.0")
    } else {
        s
    }
}

/// Area text shown to the user, e.g. `12.5 cm²`.
pub fn area_with_unit(area: f64, unit: &str) -> String {
    format!("{} {unit}²", format_area(area))
}

/// One line of the text report.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportLine {
    pub label: String,
    pub area: f64,
}

impl ReportLine {
    pub fn render(&self, unit: &str) -> String {
        format!("{}: {}", self.label, area_with_unit(self.area, unit))
    }
}

/// Per-region areas in final rank order.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub unit: String,
    pub lines: Vec<ReportLine>,
}

impl Report {
    pub fn from_regions(regions: &[Region], unit: &str) -> Self {
        Self {
            unit: unit.to_string(),
            lines: regions
                .iter()
                .map(|r| ReportLine {
                    label: r.label.clone(),
                    area: r.area,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Rendered lines, `"<label>: <area> <unit>²"`.
    pub fn to_lines(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.render(&self.unit)).collect()
    }

    /// Sum of all areas, rounded like each area.
    pub fn total_area(&self) -> f64 {
        round_area(self.lines.iter().map(|l| l.area).sum())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_lines().join("\n"))
    }
}
