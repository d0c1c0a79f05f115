//! Parser for the swift-testing runner stream, recognizable by its `◇`
//! progress glyph:
//!
//! ```text
//! ◇ Test run started.
//! ◇ Test "feed loads" started.
//! ✔ Test "feed loads" passed after 0.012 seconds.
//! ✗ Test "checkout totals" failed after 0.002 seconds.
//! ✗ Test run with 2 tests (1 passed, 1 failed) after 0.015 seconds.
//! ```
//!
//! The final `Test run with …` line is authoritative: when present, its
//! counts override anything tallied from per-test lines.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{TestOutputStrategy, TestRunResult};

const RECOGNITION_GLYPH: char = '◇';
const PASS_GLYPH: &str = "✔";
const FAIL_GLYPH: char = '✗';

static TEST_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(✔|✗) Test "([^"]+)" (passed|failed) after"#).expect("test line regex")
});
static SUMMARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(✔|✗) Test run with (\d+) tests? \((\d+) passed, (\d+) failed\) after")
        .expect("summary regex")
});
static SUMMARY_SIMPLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(✔|✗) Test run with (\d+) tests? (passed|failed) after")
        .expect("simple summary regex")
});

pub struct SwiftTestingStrategy;

impl TestOutputStrategy for SwiftTestingStrategy {
    fn name(&self) -> &'static str {
        "swift-testing"
    }

    fn can_parse(&self, raw_output: &str) -> bool {
        raw_output.contains(RECOGNITION_GLYPH)
    }

    fn parse(&self, raw_output: &str) -> TestRunResult {
        let mut passed: u32 = 0;
        let mut failed: u32 = 0;
        let mut failing_tests: Vec<String> = Vec::new();

        for caps in TEST_LINE.captures_iter(raw_output) {
            match &caps[3] {
                "failed" => {
                    failed += 1;
                    failing_tests.push(caps[2].to_string());
                }
                _ => passed += 1,
            }
        }

        let success;
        if let Some(caps) = SUMMARY.captures(raw_output) {
            success = &caps[1] == PASS_GLYPH;
            passed = caps[3].parse().unwrap_or(passed);
            failed = caps[4].parse().unwrap_or(failed);
        } else if let Some(caps) = SUMMARY_SIMPLE.captures(raw_output) {
            let total: u32 = caps[2].parse().unwrap_or(0);
            success = &caps[1] == PASS_GLYPH;
            if &caps[3] == "passed" {
                passed = total;
                failed = 0;
            } else {
                passed = 0;
                failed = total;
            }
        } else {
            // No summary at all (interrupted run): any failure glyph in the
            // stream means the run cannot be reported as passing.
            success = !raw_output.contains(FAIL_GLYPH);
        }

        TestRunResult {
            success,
            passed,
            failed,
            failing_tests,
            raw_output: raw_output.to_string(),
        }
    }
}
