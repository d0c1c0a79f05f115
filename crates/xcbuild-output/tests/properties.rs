//! Property tests: the parsers are total functions over arbitrary text.

use proptest::prelude::*;
use xcbuild_output::{classify_build_errors, parse_compile_output, parse_test_output};

proptest! {
    #[test]
    fn test_output_parser_never_panics_and_round_trips(input in ".*") {
        let result = parse_test_output(&input);
        prop_assert_eq!(result.raw_output, input);
    }

    #[test]
    fn classifier_never_panics(input in ".*") {
        let _ = classify_build_errors(&input);
    }

    #[test]
    fn compile_parser_never_panics(input in ".*") {
        let _ = parse_compile_output(&input);
    }

    #[test]
    fn repeated_diagnostics_always_deduplicate(
        file in "[a-zA-Z/][a-zA-Z0-9/_.]{0,30}",
        line in 1u32..10_000,
        column in 1u32..500,
        message in "[a-zA-Z ]{1,40}",
        repeats in 2usize..6,
    ) {
        let diagnostic = format!("{file}:{line}:{column}: error: {message}\n");
        let output = diagnostic.repeat(repeats);

        let parsed = parse_compile_output(&output);
        prop_assert_eq!(parsed.errors.len(), 1);
    }

    #[test]
    fn legacy_counts_sum_across_suites(counts in proptest::collection::vec((0u32..100, 0u32..10), 1..5)) {
        let mut output = String::from("Test Suite 'All tests' started at 2024-05-01\n");
        for (tests, failures) in &counts {
            output.push_str(&format!(
                "\t Executed {tests} tests, with {failures} failures (0 unexpected) in 0.1 seconds\n"
            ));
        }

        let result = parse_test_output(&output);
        let total_tests: u32 = counts.iter().map(|(t, _)| t).sum();
        let total_failures: u32 = counts.iter().map(|(_, f)| f).sum();
        prop_assert_eq!(result.passed, total_tests);
        prop_assert_eq!(result.failed, total_failures);
        prop_assert_eq!(result.success, total_failures == 0);
    }
}
