//! Parsers and classifiers for the output of `xcodebuild`, `swift build`,
//! `swift test`, and the two test-runner frameworks (XCTest and
//! swift-testing).
//!
//! Everything in this crate is pure, synchronous text processing over an
//! already-captured string: no I/O, no process state, no shared mutable
//! state. Parsing never fails — malformed input degrades to a safe default
//! result so the caller always has something to present.

pub mod build_errors;
pub mod compile_errors;
mod destination;
pub mod test_output;

pub use build_errors::{BuildError, BuildErrorKind, classify_build_errors, extract_platform_tokens};
pub use compile_errors::{CompileDiagnostics, Diagnostic, DiagnosticKind, parse_compile_output};
pub use test_output::{TestRunResult, parse_test_output};
