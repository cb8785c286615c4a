//! The uniform diagnostics model.
//!
//! Every backend reports problems through the same shape: a map from file
//! name to the diagnostics detected in that file, each diagnostic carrying a
//! severity, a message and an optional source interval. Keeping the shape
//! uniform means the executor, the persistence layer and telemetry never
//! need to understand a backend-specific format.
//!
//! Positions are zero-based throughout the model. Only the rendered report
//! lines convert to one-based positions, because those lines are meant for
//! humans and for editors that follow the `file:line:column` convention.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic.
///
/// Variants are ordered from least to most severe, so the maximum over a
/// stream of diagnostics is the one that decides whether compilation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Severity> for miette::Severity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Info => miette::Severity::Advice,
            Severity::Warning => miette::Severity::Warning,
            Severity::Error => miette::Severity::Error,
        }
    }
}

/// A zero-based position in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPosition {
    pub line: u32,
    pub column: u32,
}

impl TextPosition {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open source interval, zero-based on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInterval {
    pub start: TextPosition,
    pub end: TextPosition,
}

impl TextInterval {
    pub fn new(start: TextPosition, end: TextPosition) -> Self {
        Self { start, end }
    }
}

/// One reported problem in one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Where the problem sits, when the backend could locate it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<TextInterval>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            interval: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn with_interval(mut self, interval: TextInterval) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Render the human-readable report line for this diagnostic.
    ///
    /// The format is `<file>:<line>:<column>: <SEVERITY>: <message>` with
    /// one-based line and column; a diagnostic without an interval renders
    /// as `<file>: <SEVERITY>: <message>`.
    pub fn report_line(&self, file_name: &str) -> String {
        match &self.interval {
            Some(interval) => format!(
                "{}:{}:{}: {}: {}",
                file_name,
                interval.start.line + 1,
                interval.start.column + 1,
                self.severity,
                self.message
            ),
            None => format!("{}: {}: {}", file_name, self.severity, self.message),
        }
    }
}

/// Diagnostics for a whole project, keyed by file name.
///
/// The map preserves insertion order and each file keeps its diagnostics in
/// detection order, so rendered reports are deterministic across runs. Keys
/// only ever name files of the originating project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompilerDiagnostics {
    files: IndexMap<String, Vec<Diagnostic>>,
}

impl CompilerDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one diagnostic to a file, creating the file entry on first use.
    pub fn push(&mut self, file_name: impl Into<String>, diagnostic: Diagnostic) {
        self.files.entry(file_name.into()).or_default().push(diagnostic);
    }

    /// Append every diagnostic of `other`, preserving both orders.
    pub fn merge(&mut self, other: CompilerDiagnostics) {
        for (file_name, diagnostics) in other.files {
            self.files.entry(file_name).or_default().extend(diagnostics);
        }
    }

    pub fn file(&self, file_name: &str) -> Option<&[Diagnostic]> {
        self.files.get(file_name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &[Diagnostic])> + '_ {
        self.files.iter().map(|(name, diagnostics)| (name, diagnostics.as_slice()))
    }

    /// Total number of diagnostics across all files.
    pub fn len(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.files.values().all(Vec::is_empty)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.files
            .values()
            .flatten()
            .filter(|diagnostic| diagnostic.severity == severity)
            .count()
    }

    /// True when any diagnostic is an [`Severity::Error`]. This is the single
    /// predicate that separates a compiled result from a failed one.
    pub fn has_errors(&self) -> bool {
        self.files
            .values()
            .flatten()
            .any(|diagnostic| diagnostic.severity == Severity::Error)
    }

    /// The most severe level present, or `None` when there are no diagnostics.
    pub fn severest(&self) -> Option<Severity> {
        self.files.values().flatten().map(|diagnostic| diagnostic.severity).max()
    }

    /// Render every diagnostic as a report line, file order first, detection
    /// order within each file.
    pub fn report_lines(&self) -> Vec<String> {
        self.files
            .iter()
            .flat_map(|(name, diagnostics)| {
                diagnostics.iter().map(move |diagnostic| diagnostic.report_line(name))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(line: u32, column: u32) -> TextInterval {
        TextInterval::new(TextPosition::new(line, column), TextPosition::new(line, column + 1))
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn test_report_line_with_interval() {
        let diagnostic = Diagnostic::error("unresolved reference: prinln").with_interval(interval(2, 4));
        assert_eq!(
            diagnostic.report_line("Main.vela"),
            "Main.vela:3:5: ERROR: unresolved reference: prinln"
        );
    }

    #[test]
    fn test_report_line_without_interval() {
        let diagnostic = Diagnostic::warning("unused variable");
        assert_eq!(
            diagnostic.report_line("Main.vela"),
            "Main.vela: WARNING: unused variable"
        );
    }

    #[test]
    fn test_has_errors_and_severest() {
        let mut diagnostics = CompilerDiagnostics::new();
        diagnostics.push("a.vela", Diagnostic::info("inlined"));
        assert!(!diagnostics.has_errors());
        assert_eq!(diagnostics.severest(), Some(Severity::Info));

        diagnostics.push("a.vela", Diagnostic::warning("unused variable"));
        assert_eq!(diagnostics.severest(), Some(Severity::Warning));

        diagnostics.push("b.vela", Diagnostic::error("type mismatch"));
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.severest(), Some(Severity::Error));
        assert_eq!(diagnostics.count(Severity::Error), 1);
        assert_eq!(diagnostics.count(Severity::Warning), 1);
        assert_eq!(diagnostics.len(), 3);
    }

    #[test]
    fn test_report_lines_preserve_order() {
        let mut diagnostics = CompilerDiagnostics::new();
        diagnostics.push("b.vela", Diagnostic::error("first").with_interval(interval(0, 0)));
        diagnostics.push("a.vela", Diagnostic::error("second"));
        diagnostics.push("b.vela", Diagnostic::warning("third"));

        let lines = diagnostics.report_lines();
        assert_eq!(
            lines,
            vec![
                "b.vela:1:1: ERROR: first".to_string(),
                "b.vela: WARNING: third".to_string(),
                "a.vela: ERROR: second".to_string(),
            ]
        );
    }

    #[test]
    fn test_merge_extends_existing_files() {
        let mut left = CompilerDiagnostics::new();
        left.push("a.vela", Diagnostic::warning("one"));

        let mut right = CompilerDiagnostics::new();
        right.push("a.vela", Diagnostic::error("two"));
        right.push("b.vela", Diagnostic::info("three"));

        left.merge(right);
        assert_eq!(left.file("a.vela").map(<[Diagnostic]>::len), Some(2));
        assert_eq!(left.file("b.vela").map(<[Diagnostic]>::len), Some(1));
        assert!(left.has_errors());
    }
}
