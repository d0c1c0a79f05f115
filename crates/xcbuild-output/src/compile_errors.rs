//! Extracts `file:line:column: error|warning|note: message` diagnostics
//! from raw build output, deduplicated across build phases.

use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    Error,
    Warning,
    Note,
}

/// One compiler diagnostic at a source location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Path as emitted by the compiler; may be relative or absolute.
    pub file: String,
    /// 1-based line of the diagnostic.
    pub line: u32,
    /// 1-based column of the diagnostic.
    pub column: u32,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompileDiagnostics {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl CompileDiagnostics {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

const MARKERS: [(&str, DiagnosticKind); 3] = [
    (": error:", DiagnosticKind::Error),
    (": warning:", DiagnosticKind::Warning),
    (": note:", DiagnosticKind::Note),
];

/// Scan raw build output line-by-line for compiler diagnostics.
///
/// Identical diagnostics repeated across build phases (per-architecture
/// passes, re-runs of the same target) are folded into one entry keyed on
/// (file, line, column, message). `note` diagnostics are recognized so the
/// marker scan stays uniform, but are currently discarded.
pub fn parse_compile_output(raw_output: &str) -> CompileDiagnostics {
    let mut result = CompileDiagnostics::default();
    let mut seen: HashSet<(String, u32, u32, String)> = HashSet::new();

    for line in raw_output.lines() {
        let Some((marker_pos, marker, kind)) = find_marker(line) else {
            continue;
        };

        let location = &line[..marker_pos];
        let message = line[marker_pos + marker.len()..].trim().to_string();

        // The location prefix parses from the right: column, then line,
        // then whatever remains is the file path. Not every line with a
        // colon is a diagnostic, so any parse failure skips the line.
        let mut parts = location.rsplitn(3, ':');
        let Some(column) = parts.next().and_then(|s| s.trim().parse::<u32>().ok()) else {
            continue;
        };
        let Some(line_no) = parts.next().and_then(|s| s.trim().parse::<u32>().ok()) else {
            continue;
        };
        let Some(file) = parts.next() else {
            continue;
        };
        let file = file.trim().to_string();

        if !seen.insert((file.clone(), line_no, column, message.clone())) {
            continue;
        }

        let diagnostic = Diagnostic {
            kind,
            file,
            line: line_no,
            column,
            message,
        };

        match kind {
            DiagnosticKind::Error => result.errors.push(diagnostic),
            DiagnosticKind::Warning => result.warnings.push(diagnostic),
            DiagnosticKind::Note => {}
        }
    }

    debug!(
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "parsed compiler diagnostics"
    );

    result
}

/// Find the leftmost diagnostic marker on a line. When two markers start at
/// the same offset (impossible for well-formed compiler output, but the
/// input is untrusted) the error marker wins.
fn find_marker(line: &str) -> Option<(usize, &'static str, DiagnosticKind)> {
    MARKERS
        .iter()
        .filter_map(|&(marker, kind)| line.find(marker).map(|pos| (pos, marker, kind)))
        .min_by_key(|&(pos, _, _)| pos)
}
