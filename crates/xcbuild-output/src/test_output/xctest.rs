//! Parser for the classic XCTest runner stream:
//!
//! ```text
//! Test Suite 'All tests' started at 2024-05-01 10:00:00.000
//! Test Case '-[AppTests testFeedLoads]' passed (0.001 seconds).
//! Test Suite 'AppTests' passed at 2024-05-01 10:00:01.000.
//! 	 Executed 4 tests, with 0 failures (0 unexpected) in 0.8 seconds
//! ```
//!
//! Suites nest (bundle → class → "All tests") and every level emits its own
//! `Executed` summary, while several test bundles in one run each emit a
//! full block, so counts accumulate across every summary line seen.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{TestOutputStrategy, TestRunResult};

static SUITE_STARTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"Test Suite ['"][^'"]+['"] started"#).expect("suite regex"));
static EXECUTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Executed (\d+) tests?, with (\d+) failures?").expect("executed regex")
});
static FAILED_CASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Test Case '-\[[^\s\]]+ ([^\s\]]+)\]' failed").expect("failed case regex")
});

pub struct XctestStrategy;

impl TestOutputStrategy for XctestStrategy {
    fn name(&self) -> &'static str {
        "xctest"
    }

    fn can_parse(&self, raw_output: &str) -> bool {
        SUITE_STARTED.is_match(raw_output)
    }

    fn parse(&self, raw_output: &str) -> TestRunResult {
        let mut suite_verdict: Option<bool> = None;
        let mut passed: u32 = 0;
        let mut failed: u32 = 0;
        let mut failing_tests: Vec<String> = Vec::new();

        for line in raw_output.lines() {
            // Suite verdict lines appear innermost-first; the outermost
            // "All tests" suite reports last, so the last marker wins.
            if line.contains("Test Suite") {
                if line.contains("passed") {
                    suite_verdict = Some(true);
                } else if line.contains("failed") {
                    suite_verdict = Some(false);
                }
            }

            if let Some(caps) = EXECUTED.captures(line) {
                let tests: u32 = caps[1].parse().unwrap_or(0);
                let failures: u32 = caps[2].parse().unwrap_or(0);
                passed = passed.saturating_add(tests);
                failed = failed.saturating_add(failures);
            }

            if let Some(caps) = FAILED_CASE.captures(line) {
                failing_tests.push(caps[1].to_string());
            }
        }

        // Both signals must agree on success, to stay robust against
        // truncated or interleaved output.
        let success = suite_verdict != Some(false) && failed == 0;

        TestRunResult {
            success,
            passed,
            failed,
            failing_tests,
            raw_output: raw_output.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_quoted_suite_started() {
        let strategy = XctestStrategy;
        assert!(strategy.can_parse("Test Suite 'All tests' started at 2024-05-01"));
        assert!(strategy.can_parse(r#"Test Suite "AppTests" started at 2024-05-01"#));
        assert!(!strategy.can_parse("Test run with 3 tests passed"));
    }

    #[test]
    fn passing_run_with_single_suite() {
        let output = "\
Test Suite 'All tests' started at 2024-05-01 10:00:00.000\n\
Test Suite 'AppTests' started at 2024-05-01 10:00:00.001\n\
Test Case '-[AppTests testFeedLoads]' started.\n\
Test Case '-[AppTests testFeedLoads]' passed (0.004 seconds).\n\
Test Suite 'AppTests' passed at 2024-05-01 10:00:00.010.\n\
\t Executed 1 test, with 0 failures (0 unexpected) in 0.004 (0.009) seconds\n\
Test Suite 'All tests' passed at 2024-05-01 10:00:00.011.\n";

        let result = XctestStrategy.parse(output);
        assert!(result.success);
        assert_eq!(result.passed, 1);
        assert_eq!(result.failed, 0);
        assert!(result.failing_tests.is_empty());
    }

    #[test]
    fn counts_accumulate_across_bundle_summaries() {
        let output = "\
Test Suite 'UnitTests.xctest' started at 2024-05-01 10:00:00.000\n\
Test Suite 'UnitTests.xctest' passed at 2024-05-01 10:00:01.000.\n\
\t Executed 5 tests, with 0 failures (0 unexpected) in 0.9 seconds\n\
Test Suite 'UITests.xctest' started at 2024-05-01 10:00:01.100\n\
Test Case '-[UITests testLogin]' failed (1.2 seconds).\n\
Test Case '-[UITests testCheckout]' failed (0.8 seconds).\n\
Test Suite 'UITests.xctest' failed at 2024-05-01 10:00:04.000.\n\
\t Executed 3 tests, with 2 failures (0 unexpected) in 2.8 seconds\n\
Test Suite 'All tests' failed at 2024-05-01 10:00:04.001.\n";

        let result = XctestStrategy.parse(output);
        assert!(!result.success);
        assert_eq!(result.passed, 8);
        assert_eq!(result.failed, 2);
        assert_eq!(result.failing_tests, vec!["testLogin", "testCheckout"]);
    }

    #[test]
    fn failing_test_names_keep_order_and_duplicates() {
        let output = "\
Test Suite 'Retry' started at 2024-05-01\n\
Test Case '-[Retry testFlaky]' failed (0.1 seconds).\n\
Test Case '-[Retry testFlaky]' failed (0.1 seconds).\n\
\t Executed 2 tests, with 2 failures (0 unexpected) in 0.2 seconds\n";

        let result = XctestStrategy.parse(output);
        assert_eq!(result.failing_tests, vec!["testFlaky", "testFlaky"]);
    }

    #[test]
    fn last_suite_verdict_wins() {
        // Inner class suite passes, outer aggregate fails: the outer line
        // comes last and decides.
        let output = "\
Test Suite 'A' started at 2024-05-01\n\
Test Suite 'A' passed at 2024-05-01.\n\
\t Executed 2 tests, with 0 failures (0 unexpected) in 0.1 seconds\n\
Test Suite 'All tests' failed at 2024-05-01.\n";

        let result = XctestStrategy.parse(output);
        assert!(!result.success);
    }

    #[test]
    fn failure_count_alone_fails_the_run() {
        // No suite verdict line at all (truncated log), but failures were
        // counted: the run cannot be reported as passing.
        let output = "\
Test Suite 'A' started at 2024-05-01\n\
\t Executed 3 tests, with 1 failure (0 unexpected) in 0.1 seconds\n";

        let result = XctestStrategy.parse(output);
        assert!(!result.success);
        assert_eq!(result.failed, 1);
    }

    #[test]
    fn raw_output_is_preserved() {
        let output = "Test Suite 'A' started at 2024-05-01\n  trailing  ";
        let result = XctestStrategy.parse(output);
        assert_eq!(result.raw_output, output);
    }
}
