//! User-friendly diagnostic messages.
//!
//! Every error surfaced to the user carries the offending input, the
//! context it was found in, and a concrete way to fix it.

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::coordinate::COORDINATE_GRAMMAR;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when an override value is not a valid coordinate.
    pub const FIX_COORDINATE: &str =
        "Write the value as <groupId>:<artifactId>[:<extension>[:<classifier>]][:<version>]";

    /// Suggestion pointing at the sources overrides are read from.
    pub const CHECK_OVERRIDES: &str =
        "Check the overrides files and any `--set` arguments for typos";

    /// Suggestion for a dependency override that carries no version.
    pub const ADD_VERSION: &str =
        "Add a version, e.g. `com.example:lib:1.0`; a dependency override without one is ignored";

    /// Suggestion when a rewrite needs more detail.
    pub const VERBOSE: &str = "Run `thinpom rewrite --verbose` to see each directive as it is applied";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Error,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Warning,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = if color {
            match self.severity {
                Severity::Error => "\x1b[1;31merror\x1b[0m",
                Severity::Warning => "\x1b[1;33mwarning\x1b[0m",
            }
        } else {
            match self.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            }
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// An artifact coordinate that does not match the coordinate grammar.
///
/// `key` is the override key the value came from; it is absent when a
/// coordinate is parsed on its own (e.g. `thinpom coords`).
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
#[error(
    "bad artifact coordinates `{value}`{}, expected format is {}",
    key_suffix(.key),
    COORDINATE_GRAMMAR
)]
#[diagnostic(
    code(thinpom::coordinate::malformed),
    help("expected format is <groupId>:<artifactId>[:<extension>[:<classifier>]][:<version>]")
)]
pub struct MalformedCoordinateError {
    pub key: Option<String>,
    pub value: String,
}

fn key_suffix(key: &Option<String>) -> String {
    match key {
        Some(key) => format!(" for `{}`", key),
        None => String::new(),
    }
}

impl MalformedCoordinateError {
    pub fn new(value: impl Into<String>) -> Self {
        MalformedCoordinateError {
            key: None,
            value: value.into(),
        }
    }

    /// Attach the override key the bad value was read from.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// The grammar a coordinate must follow.
    pub fn expected_grammar(&self) -> &'static str {
        COORDINATE_GRAMMAR
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(format!("bad artifact coordinates `{}`", self.value));

        if let Some(key) = &self.key {
            diag = diag.with_context(format!("read from override `{}`", key));
        }

        diag.with_context(format!("expected format is {}", COORDINATE_GRAMMAR))
            .with_suggestion(suggestions::FIX_COORDINATE)
            .with_suggestion(suggestions::CHECK_OVERRIDES)
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
