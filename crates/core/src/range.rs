//! Parameter ranges
//!
//! A [`ParamRange`] is one named sweep dimension: `start`, `end` and `step`
//! over a scalar. Ranges are validated on construction and immutable
//! afterwards; there is no way to obtain a half-built range.
//!
//! Expansion is inclusive of `end`:
//!
//! ```
//! use hypersweep_core::ParamRange;
//!
//! let range = ParamRange::new(":A", 0.0, 1.0, 0.5).unwrap();
//! assert_eq!(range.expand(), vec![0.0, 0.5, 1.0]);
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::{RangeField, ValidationError};

/// Leading character of every dimension name.
pub const DIMENSION_MARKER: char = ':';

/// Most values a single range may expand to.
pub const MAX_RANGE_LEN: usize = u32::MAX as usize;

/// A validated scalar range for one dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamRange {
    name: String,
    start: f64,
    end: f64,
    step: f64,
}

/// Unvalidated serde form of a range.
#[derive(Deserialize)]
struct RawRange {
    name: String,
    start: f64,
    end: f64,
    #[serde(default)]
    step: f64,
}

impl<'de> Deserialize<'de> for ParamRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawRange::deserialize(deserializer)?;
        ParamRange::new(raw.name, raw.start, raw.end, raw.step).map_err(de::Error::custom)
    }
}

impl ParamRange {
    /// Create a range, validating every field.
    ///
    /// A zero `step` is accepted only when `start == end`.
    pub fn new(
        name: impl Into<String>,
        start: f64,
        end: f64,
        step: f64,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if !is_dimension_name(&name) {
            return Err(ValidationError::InvalidName(name));
        }
        check_finite(RangeField::Start, start)?;
        check_finite(RangeField::End, end)?;
        check_finite(RangeField::Step, step)?;

        if end < start {
            return Err(ValidationError::EndBeforeStart { start, end });
        }
        if step < 0.0 {
            return Err(ValidationError::NegativeStep(step));
        }
        if step == 0.0 && start != end {
            return Err(ValidationError::ZeroStep { start, end });
        }
        if step > 0.0 {
            let count = ((end - start) / step).floor() + 1.0;
            if count > MAX_RANGE_LEN as f64 {
                return Err(ValidationError::TooManyValues {
                    step,
                    count,
                    max: MAX_RANGE_LEN,
                });
            }
        }

        Ok(Self {
            name,
            start,
            end,
            step,
        })
    }

    /// Create a range from unparsed text fields, as found in a spec line.
    pub fn parse(name: &str, start: &str, end: &str, step: &str) -> Result<Self, ValidationError> {
        if !is_dimension_name(name) {
            return Err(ValidationError::InvalidName(name.to_string()));
        }
        let start = parse_number(RangeField::Start, start)?;
        let end = parse_number(RangeField::End, end)?;
        let step = parse_number(RangeField::Step, step)?;
        Self::new(name, start, end, step)
    }

    /// Create a degenerate range holding the single value `value`.
    pub fn pinned(name: impl Into<String>, value: f64) -> Result<Self, ValidationError> {
        Self::new(name, value, value, 0.0)
    }

    /// Degenerate copy of this range holding only `value`, one of its own values.
    pub(crate) fn pin(&self, value: f64) -> Self {
        Self {
            name: self.name.clone(),
            start: value,
            end: value,
            step: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Check if this range holds exactly one value.
    pub fn is_pinned(&self) -> bool {
        self.step == 0.0
    }

    /// Number of values produced by [`expand`](Self::expand):
    /// `floor((end - start) / step) + 1`, at most [`MAX_RANGE_LEN`].
    pub fn len(&self) -> usize {
        if self.is_pinned() {
            return 1;
        }
        ((self.end - self.start) / self.step).floor() as usize + 1
    }

    /// Always false: a valid range holds at least `start`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The `index`-th value of the expansion, if in bounds.
    pub fn value_at(&self, index: usize) -> Option<f64> {
        if index >= self.len() {
            return None;
        }
        Some(self.nth(index))
    }

    /// Expand the range into `start, start + step, ...` up to and including
    /// the largest value not above `end`.
    ///
    /// Values are computed as `start + i * step` rather than by accumulation,
    /// so long ranges do not drift. A range like `0 0.3 0.1` stops at `0.2`:
    /// `0.3 / 0.1` is just below 3 in binary floating point.
    pub fn expand(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.nth(i)).collect()
    }

    fn nth(&self, index: usize) -> f64 {
        // rounding in `index * step` must not land past `end`
        (self.start + index as f64 * self.step).min(self.end)
    }
}

impl fmt::Display for ParamRange {
    /// Renders the spec-line form `NAME START END STEP`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.name, self.start, self.end, self.step)
    }
}

/// Check that `name` is a dimension marker followed by at least one character.
pub fn is_dimension_name(name: &str) -> bool {
    name.strip_prefix(DIMENSION_MARKER)
        .is_some_and(|rest| !rest.is_empty())
}

fn parse_number(field: RangeField, text: &str) -> Result<f64, ValidationError> {
    let value = text
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::NotNumeric {
            field,
            value: text.to_string(),
        })?;
    check_finite(field, value)?;
    Ok(value)
}

fn check_finite(field: RangeField, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotNumeric {
            field,
            value: value.to_string(),
        })
    }
}
