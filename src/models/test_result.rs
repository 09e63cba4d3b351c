//! Test outcome models
//!
//! Per-file outcomes read from result documents and the batch report built
//! from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Summary attributes of one result document
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteSummary {
    pub name: String,
    pub tests: u32,
    pub failures: u32,
    pub time: String,
}

impl SuiteSummary {
    pub fn is_failure(&self) -> bool {
        self.failures > 0
    }
}

impl fmt::Display for SuiteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tests run: {}, Failures: {}, Time elapsed: {} sec",
            self.tests, self.failures, self.time
        )
    }
}

/// Outcome of running a single test file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOutcome {
    /// Test file path relative to its file set
    pub file: String,
    pub summary: SuiteSummary,
}

impl TestOutcome {
    pub fn new(file: impl Into<String>, summary: SuiteSummary) -> Self {
        Self {
            file: file.into(),
            summary,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.summary.is_failure()
    }

    pub fn status(&self) -> &'static str {
        if self.is_failure() {
            "FAIL"
        } else {
            "PASS"
        }
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} - {}", self.status(), self.file, self.summary)
    }
}

/// Everything a finished batch produced
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub outcomes: Vec<TestOutcome>,
    pub failed: bool,
}

impl BatchReport {
    pub fn files(&self) -> usize {
        self.outcomes.len()
    }

    pub fn total_tests(&self) -> u32 {
        self.outcomes.iter().map(|o| o.summary.tests).sum()
    }

    pub fn total_failures(&self) -> u32 {
        self.outcomes.iter().map(|o| o.summary.failures).sum()
    }

    pub fn failed_files(&self) -> impl Iterator<Item = &TestOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        for outcome in &self.outcomes {
            writeln!(f, "  {outcome}")?;
        }
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(
            f,
            "Files: {} | Tests: {} | Failures: {}",
            self.files(),
            self.total_tests(),
            self.total_failures()
        )
    }
}
