//! Diagnostic reporting for MFL
//!
//! This module turns type and evaluation failures into structured reports
//! with stable error codes, the offending source line, and machine-readable
//! JSON output. Presentation is left to the driver.

use serde::{Deserialize, Serialize};

use crate::ast::Line;
use crate::interpreter::EvalError;
use crate::typechecker::TypeError;

pub mod error_codes;
pub use error_codes::*;

#[cfg(test)]
mod tests;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Which checking phase produced the diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Type,
    Runtime,
}

/// A structured failure report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable error code (e.g., "E1001")
    pub code: String,

    /// Severity level
    pub severity: Severity,

    /// Phase that raised it
    pub phase: Phase,

    /// Primary message
    pub message: String,

    /// Source line (1-indexed, 0 when unknown)
    pub line: Line,

    /// Additional notes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: impl Into<String>, phase: Phase) -> DiagnosticBuilder {
        DiagnosticBuilder {
            code: code.into(),
            severity: Severity::Error,
            phase,
            message: String::new(),
            line: 0,
            notes: Vec::new(),
        }
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Format as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format as human-readable string, quoting the offending line of `source`
    pub fn to_human_readable(&self, source: &str) -> String {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };

        let mut output = format!(
            "{}[{}]: {}\n  --> line {}\n",
            severity, self.code, self.message, self.line
        );

        let index = self.line as usize;
        if let Some(text) = index.checked_sub(1).and_then(|i| source.lines().nth(i)) {
            output.push_str(&format!("   |\n{:>3} | {}\n   |\n", self.line, text));
        }

        for note in &self.notes {
            output.push_str(&format!("   = note: {}\n", note));
        }

        output
    }
}

/// Builder for constructing diagnostics
pub struct DiagnosticBuilder {
    code: String,
    severity: Severity,
    phase: Phase,
    message: String,
    line: Line,
    notes: Vec<String>,
}

impl DiagnosticBuilder {
    /// Set the message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the source line
    pub fn line(mut self, line: Line) -> Self {
        self.line = line;
        self
    }

    /// Add a note
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Build the diagnostic
    pub fn build(self) -> Diagnostic {
        Diagnostic {
            code: self.code,
            severity: self.severity,
            phase: self.phase,
            message: self.message,
            line: self.line,
            notes: self.notes,
        }
    }
}

fn with_help(builder: DiagnosticBuilder, err: &dyn miette::Diagnostic) -> DiagnosticBuilder {
    match err.help() {
        Some(help) => builder.note(help.to_string()),
        None => builder,
    }
}

impl From<&TypeError> for Diagnostic {
    fn from(err: &TypeError) -> Self {
        let builder = Diagnostic::error(err.code(), Phase::Type)
            .message(err.to_string())
            .line(err.line());
        with_help(builder, err).build()
    }
}

impl From<&EvalError> for Diagnostic {
    fn from(err: &EvalError) -> Self {
        let builder = Diagnostic::error(err.code(), Phase::Runtime)
            .message(err.to_string())
            .line(err.line());
        with_help(builder, err).build()
    }
}
