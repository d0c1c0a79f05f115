//! Renders structured parse results into the text returned to the MCP
//! client. The core guarantees title/details are always present and
//! identifiers are already substituted; this layer only does layout.

use xcbuild_output::{BuildError, CompileDiagnostics, TestRunResult};

/// Bullet list for a failed build: classified errors first, then compiler
/// diagnostics with their locations.
pub fn render_build_failure(errors: &[BuildError], diagnostics: &CompileDiagnostics) -> String {
    let mut out = String::from("❌ Build failed");

    for error in errors {
        out.push_str(&format!("\n• {}\n  {}", error.title, error.details));
        if let Some(suggestion) = &error.suggestion {
            out.push_str(&format!("\n  💡 {suggestion}"));
        }
    }

    if !diagnostics.errors.is_empty() {
        out.push_str(&format!("\n\nCompiler errors ({}):", diagnostics.errors.len()));
        for diag in &diagnostics.errors {
            out.push_str(&format!(
                "\n  {}:{}:{}: {}",
                diag.file, diag.line, diag.column, diag.message
            ));
        }
    }

    if !diagnostics.warnings.is_empty() {
        out.push_str(&format!("\n\nWarnings: {}", diagnostics.warnings.len()));
    }

    out
}

pub fn render_build_success(diagnostics: &CompileDiagnostics) -> String {
    if diagnostics.warnings.is_empty() {
        "✅ Build succeeded".to_string()
    } else {
        format!(
            "✅ Build succeeded with {} warning{}",
            diagnostics.warnings.len(),
            if diagnostics.warnings.len() == 1 { "" } else { "s" }
        )
    }
}

pub fn render_test_result(result: &TestRunResult) -> String {
    if result.success {
        return format!(
            "✅ Tests passed: {} passed, {} failed",
            result.passed, result.failed
        );
    }

    let mut out = format!(
        "❌ Tests failed: {} passed, {} failed",
        result.passed, result.failed
    );
    if !result.failing_tests.is_empty() {
        out.push_str("\n\nFailing tests:");
        for name in &result.failing_tests {
            out.push_str(&format!("\n  • {name}"));
        }
    }
    out
}

/// Last-resort rendering when a build failed but no signature matched:
/// report the tail of the raw output so the client still sees something
/// actionable. Classifier silence is not an error in itself.
pub fn render_unclassified_failure(raw_output: &str) -> String {
    let tail: Vec<&str> = raw_output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .rev()
        .take(10)
        .collect();
    let tail: Vec<&str> = tail.into_iter().rev().collect();

    format!(
        "❌ Build failed (no known failure signature matched)\n\nLast output lines:\n{}",
        tail.join("\n")
    )
}
