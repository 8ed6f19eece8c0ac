//! Sweep errors

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for sweep operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The numeric fields of a parameter range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeField {
    Start,
    End,
    Step,
}

impl fmt::Display for RangeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeField::Start => write!(f, "start"),
            RangeField::End => write!(f, "end"),
            RangeField::Step => write!(f, "step"),
        }
    }
}

/// A parameter range failed validation and was not created.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("invalid dimension name '{0}': expected ':' followed by at least one character")]
    InvalidName(String),

    #[error("invalid {field} value '{value}': not a finite number")]
    NotNumeric { field: RangeField, value: String },

    #[error("end ({end}) is less than start ({start})")]
    EndBeforeStart { start: f64, end: f64 },

    #[error("step must not be negative, got {0}")]
    NegativeStep(f64),

    #[error("step is zero but start ({start}) and end ({end}) differ")]
    ZeroStep { start: f64, end: f64 },

    #[error("step {step} expands to {count} values, more than the maximum of {max}")]
    TooManyValues { step: f64, count: f64, max: usize },
}

impl ValidationError {
    /// The range field this error refers to, or `None` for the name.
    pub fn field(&self) -> Option<RangeField> {
        match self {
            ValidationError::InvalidName(_) => None,
            ValidationError::NotNumeric { field, .. } => Some(*field),
            ValidationError::EndBeforeStart { .. } => Some(RangeField::End),
            ValidationError::NegativeStep(_)
            | ValidationError::ZeroStep { .. }
            | ValidationError::TooManyValues { .. } => Some(RangeField::Step),
        }
    }
}

/// A dimension was referenced that the space or point does not have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dimension '{name}'")]
pub struct UnknownDimensionError {
    pub name: String,
}

impl UnknownDimensionError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A parameter spec line has the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecParseError {
    #[error("expected {expected} tokens (NAME START END STEP), found {found}")]
    WrongTokenCount { expected: usize, found: usize },
}

/// A directive template does not have the expected substitution slots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("directive template must contain exactly {expected} '{{}}' slots, found {found}")]
    SlotCount { expected: usize, found: usize },
}

/// Errors raised while configuring or partitioning a space.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpaceError {
    #[error("sample count must be greater than zero")]
    ZeroSampleCount,

    #[error("invalid model label '{0}': must be non-empty without whitespace or path separators")]
    InvalidModelLabel(String),

    #[error("cannot divide a space into zero partitions")]
    ZeroPartitions,

    #[error("number of points overflows usize")]
    TooManyPoints,

    #[error("run ids overflow u64: {points} points of {sample_count} runs from run id {run_start_id}")]
    RunIdOverflow {
        run_start_id: u64,
        sample_count: u64,
        points: usize,
    },

    #[error(transparent)]
    UnknownDimension(#[from] UnknownDimensionError),
}

/// Errors that can occur when loading or validating a sweep manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse manifest YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid apiVersion: expected 'hypersweep/v1', got '{0}'")]
    InvalidApiVersion(String),

    #[error("invalid kind: expected 'Sweep', got '{0}'")]
    InvalidKind(String),

    #[error("missing required field: {0}")]
    MissingField(String),
}

/// Top-level error for the crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    UnknownDimension(#[from] UnknownDimensionError),

    #[error(transparent)]
    SpecParse(#[from] SpecParseError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Space(#[from] SpaceError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
