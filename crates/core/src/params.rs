//! Parameter specification loading.
//!
//! A parameter spec is line-oriented text:
//!
//! ```text
//! # drift-rate sweep
//! :v     0.1  0.5  0.1   # five values
//! :a     1.0  2.0  0.5
//! ```
//!
//! Each non-blank line is `NAME START END STEP`. `#` starts a comment that
//! runs to the end of the line. Loading is partial-failure tolerant: a
//! malformed line is recorded as a [`SpecDiagnostic`] and skipped, and the
//! remaining lines still load.

use std::fmt;
use std::path::Path;

use thiserror::Error;
use tracing::warn;

use crate::error::{Error, SpaceError, SpecParseError, ValidationError};
use crate::range::ParamRange;
use crate::space::HyperSpace;

/// Comment marker in spec files.
pub const COMMENT_MARKER: char = '#';

/// Tokens on a spec line.
pub const SPEC_LINE_TOKENS: usize = 4;

/// Why a spec line was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecLineError {
    #[error(transparent)]
    Shape(#[from] SpecParseError),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// A rejected or suspicious spec line.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecDiagnostic {
    /// 1-based line number.
    pub line: usize,
    /// The raw line, without its trailing newline.
    pub text: String,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    /// The line was skipped.
    Rejected(SpecLineError),
    /// The line redefines a dimension first defined on `previous_line`.
    Redefined { previous_line: usize },
}

impl fmt::Display for SpecDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::Rejected(err) => {
                write!(f, "line {}: {} (skipped: `{}`)", self.line, err, self.text)
            }
            DiagnosticKind::Redefined { previous_line } => write!(
                f,
                "line {}: redefines dimension from line {} (`{}`)",
                self.line, previous_line, self.text
            ),
        }
    }
}

/// The ranges loaded from a spec plus what went wrong along the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSpec {
    /// Valid ranges in file order, with their line numbers.
    pub ranges: Vec<(usize, ParamRange)>,
    pub diagnostics: Vec<SpecDiagnostic>,
}

impl ParamSpec {
    /// Parse spec text.
    pub fn parse(source: &str) -> Self {
        let mut spec = ParamSpec::default();

        for (index, raw) in source.lines().enumerate() {
            let line = index + 1;
            let range = match parse_line(raw) {
                Ok(Some(range)) => range,
                Ok(None) => continue,
                Err(err) => {
                    spec.diagnostics.push(SpecDiagnostic {
                        line,
                        text: raw.to_string(),
                        kind: DiagnosticKind::Rejected(err),
                    });
                    continue;
                }
            };

            if let Some((previous_line, _)) =
                spec.ranges.iter().find(|(_, r)| r.name() == range.name())
            {
                spec.diagnostics.push(SpecDiagnostic {
                    line,
                    text: raw.to_string(),
                    kind: DiagnosticKind::Redefined {
                        previous_line: *previous_line,
                    },
                });
            }
            spec.ranges.push((line, range));
        }

        spec
    }

    /// Read and parse a spec file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&source))
    }

    /// Number of lines that were skipped.
    pub fn rejected_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.kind, DiagnosticKind::Rejected(_)))
            .count()
    }

    /// Emit every diagnostic as a warning.
    pub fn log_diagnostics(&self) {
        for diagnostic in &self.diagnostics {
            warn!("{}", diagnostic);
        }
    }

    /// The valid ranges in file order.
    pub fn param_ranges(&self) -> impl Iterator<Item = &ParamRange> + '_ {
        self.ranges.iter().map(|(_, range)| range)
    }

    /// Build a space from the valid ranges. A redefined dimension takes its
    /// last definition.
    pub fn to_space(&self) -> Result<HyperSpace, SpaceError> {
        HyperSpace::new(self.param_ranges().cloned())
    }
}

/// Parse one spec line. Blank and comment-only lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ParamRange>, SpecLineError> {
    let content = match line.find(COMMENT_MARKER) {
        Some(at) => &line[..at],
        None => line,
    };

    let tokens: Vec<&str> = content.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(None);
    }
    if tokens.len() != SPEC_LINE_TOKENS {
        return Err(SpecParseError::WrongTokenCount {
            expected: SPEC_LINE_TOKENS,
            found: tokens.len(),
        }
        .into());
    }

    let range = ParamRange::parse(tokens[0], tokens[1], tokens[2], tokens[3])?;
    Ok(Some(range))
}
