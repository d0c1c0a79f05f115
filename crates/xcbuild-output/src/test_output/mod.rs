//! Turns raw test-runner output into a structured [`TestRunResult`].
//!
//! Two formats are recognized: the classic XCTest `Test Suite … Executed N
//! tests` stream and the glyph-annotated swift-testing stream. Anything
//! else degrades to a keyword heuristic that reports a verdict but no
//! counts. Parsing never fails; the safest default is a failed run with
//! zero counts.

mod swift_testing;
mod xctest;

pub use swift_testing::SwiftTestingStrategy;
pub use xctest::XctestStrategy;

use serde::Serialize;
use tracing::debug;

/// Outcome of one test execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestRunResult {
    /// True only when the output was positively recognized as a passing
    /// run. Absence of failure evidence is not success.
    pub success: bool,
    pub passed: u32,
    pub failed: u32,
    /// Identifiers of failing tests, in order of appearance, when the
    /// format allowed extracting them.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failing_tests: Vec<String>,
    /// The exact input text, verbatim. Never truncated or trimmed, so
    /// callers can always log or display the original output.
    pub raw_output: String,
}

impl TestRunResult {
    pub(crate) fn unrecognized(raw_output: &str, success: bool) -> Self {
        Self {
            success,
            passed: 0,
            failed: 0,
            failing_tests: Vec::new(),
            raw_output: raw_output.to_string(),
        }
    }
}

/// One recognizable test-runner output format.
pub(crate) trait TestOutputStrategy {
    fn name(&self) -> &'static str;
    fn can_parse(&self, raw_output: &str) -> bool;
    fn parse(&self, raw_output: &str) -> TestRunResult;
}

/// Parse raw test-run output with the first strategy that recognizes it.
///
/// The list order is the tie-break for mixed output that both recognizers
/// would accept: the swift-testing strategy is registered before the
/// XCTest strategy, and the first match wins.
pub fn parse_test_output(raw_output: &str) -> TestRunResult {
    let strategies: [&dyn TestOutputStrategy; 2] = [&SwiftTestingStrategy, &XctestStrategy];

    for strategy in strategies {
        if strategy.can_parse(raw_output) {
            debug!(strategy = strategy.name(), "parsing test output");
            return strategy.parse(raw_output);
        }
    }

    debug!("no test framework recognized, using keyword heuristic");
    fallback_parse(raw_output)
}

const FAILURE_KEYWORDS: [&str; 3] = ["error", "fail", "aborted"];
const SUCCESS_KEYWORDS: [&str; 3] = ["build succeeded", "all good", "succeeded"];

/// Best-effort verdict for output neither framework recognized. Counts stay
/// zero since nothing structured is extractable.
fn fallback_parse(raw_output: &str) -> TestRunResult {
    if raw_output.trim().is_empty() {
        return TestRunResult::unrecognized(raw_output, false);
    }

    let lower = raw_output.to_lowercase();
    if FAILURE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return TestRunResult::unrecognized(raw_output, false);
    }
    if SUCCESS_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return TestRunResult::unrecognized(raw_output, true);
    }

    TestRunResult::unrecognized(raw_output, false)
}
