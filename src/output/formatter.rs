//! Output formatters for batch reports
//!
//! Provides table, JSON and CSV renderings of a finished batch.

use crate::models::{BatchReport, TestOutcome};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Csv,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "csv" => Some(OutputFormat::Csv),
            _ => None,
        }
    }
}

/// Report formatter
pub struct ReportFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ReportFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Format a whole batch report
    pub fn format_report(&self, report: &BatchReport) -> String {
        match self.format {
            OutputFormat::Table => self.format_table(report),
            OutputFormat::Json => serde_json::to_string(report).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(report).unwrap_or_default(),
            OutputFormat::Csv => self.format_csv(report),
        }
    }

    fn format_outcome(&self, outcome: &TestOutcome) -> String {
        let status = match (outcome.is_failure(), self.colorize) {
            (false, true) => "\x1b[32m✓ PASS\x1b[0m",
            (true, true) => "\x1b[31m✗ FAIL\x1b[0m",
            (false, false) => "✓ PASS",
            (true, false) => "✗ FAIL",
        };

        format!(
            "{:40} {} {:>4} tests {:>4} failures {:>8}s",
            outcome.file,
            status,
            outcome.summary.tests,
            outcome.summary.failures,
            outcome.summary.time
        )
    }

    fn format_table(&self, report: &BatchReport) -> String {
        let mut output = String::new();

        output.push_str("\n╔══════════════════════════════════════════════════════════════════════════════╗\n");
        for outcome in &report.outcomes {
            output.push_str(&format!("║  {}\n", self.format_outcome(outcome)));
        }
        output.push_str("╠══════════════════════════════════════════════════════════════════════════════╣\n");

        let failures = if self.colorize && report.total_failures() > 0 {
            format!("\x1b[31m{}\x1b[0m", report.total_failures())
        } else {
            report.total_failures().to_string()
        };

        output.push_str(&format!(
            "║  Files: {} | Tests: {} | Failures: {}\n",
            report.files(),
            report.total_tests(),
            failures
        ));
        output.push_str("╚══════════════════════════════════════════════════════════════════════════════╝\n");

        output
    }

    fn format_csv(&self, report: &BatchReport) -> String {
        let mut output = String::new();
        output.push_str("file,suite,tests,failures,time\n");
        for outcome in &report.outcomes {
            output.push_str(&format!(
                "\"{}\",\"{}\",{},{},{}\n",
                outcome.file.replace('"', "\"\""),
                outcome.summary.name.replace('"', "\"\""),
                outcome.summary.tests,
                outcome.summary.failures,
                outcome.summary.time
            ));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SuiteSummary;

    fn report() -> BatchReport {
        let outcome = |file: &str, failures| {
            TestOutcome::new(
                file,
                SuiteSummary {
                    name: file.trim_end_matches(".vim").to_string(),
                    tests: 3,
                    failures,
                    time: "0.25".to_string(),
                },
            )
        };
        BatchReport {
            outcomes: vec![outcome("a.vim", 0), outcome("b.vim", 2)],
            failed: true,
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("table"), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(
            OutputFormat::from_str("json-pretty"),
            Some(OutputFormat::JsonPretty)
        );
        assert_eq!(OutputFormat::from_str("xml"), None);
    }

    #[test]
    fn test_table() {
        let output = ReportFormatter::new(OutputFormat::Table)
            .no_color()
            .format_report(&report());

        assert!(output.contains("✓ PASS"));
        assert!(output.contains("✗ FAIL"));
        assert!(output.contains("Files: 2 | Tests: 6 | Failures: 2"));
    }

    #[test]
    fn test_json() {
        let output = ReportFormatter::new(OutputFormat::Json).format_report(&report());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["failed"], true);
        assert_eq!(value["outcomes"][1]["summary"]["failures"], 2);
    }

    #[test]
    fn test_csv() {
        let output = ReportFormatter::new(OutputFormat::Csv).format_report(&report());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "file,suite,tests,failures,time");
        assert_eq!(lines[2], "\"b.vim\",\"b\",3,2,0.25");
    }
}
