//! Hyperpoints
//!
//! A [`HyperPoint`] is one fully instantiated coordinate of a space, plus
//! the run metadata needed to turn it into a simulation directive.
//!
//! Dimensions are kept in canonical (lexicographic) order. The same order
//! drives both [`HyperPoint::serialize`] and [`HyperPoint::canonical_name`],
//! so a point's directive and its output file always correspond.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::UnknownDimensionError;
use crate::naming::{format_value, sanitize};
use crate::render::DirectiveTemplate;

/// Extension appended to every canonical point name.
pub const RESULT_EXTENSION: &str = ".txt";

/// One coordinate in a hyperparameter space.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperPoint {
    values: BTreeMap<String, f64>,
    sample_count: u64,
    run_start_id: u64,
    model_label: String,
}

impl HyperPoint {
    pub(crate) fn new(
        values: BTreeMap<String, f64>,
        sample_count: u64,
        run_start_id: u64,
        model_label: String,
    ) -> Self {
        Self {
            values,
            sample_count,
            run_start_id,
            model_label,
        }
    }

    /// Dimension names in canonical order.
    pub fn dimension_names(&self) -> Vec<&str> {
        self.values.keys().map(String::as_str).collect()
    }

    /// `(name, value)` pairs in canonical order.
    pub fn coordinates(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Look up the value of a dimension.
    pub fn value_of(&self, name: &str) -> Result<f64, UnknownDimensionError> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| UnknownDimensionError::new(name))
    }

    /// Number of simulated runs at this point.
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// First run id allocated to this point.
    pub fn run_start_id(&self) -> u64 {
        self.run_start_id
    }

    /// Last run id allocated to this point.
    pub fn run_end_id(&self) -> u64 {
        self.run_start_id + self.sample_count.saturating_sub(1)
    }

    pub fn model_label(&self) -> &str {
        &self.model_label
    }

    /// Filesystem-safe name for this point under `label`.
    ///
    /// `<label>_<dim1>_<v1>_..._<dimN>_<vN>.txt`, with sanitized dimension
    /// names and values at fixed precision.
    pub fn canonical_name(&self, label: &str) -> String {
        let mut name = String::from(label);
        for (dimension, value) in &self.values {
            name.push('_');
            name.push_str(&sanitize(dimension));
            name.push('_');
            name.push_str(&format_value(*value));
        }
        name.push_str(RESULT_EXTENSION);
        name
    }

    /// Canonical name under this point's own model label.
    pub fn file_name(&self) -> String {
        self.canonical_name(&self.model_label)
    }

    /// Render the point as a parenthesized list of `(dimension value)` pairs.
    ///
    /// `((:A 0.500) (:B -2.000))`
    pub fn serialize(&self) -> String {
        let pairs: Vec<String> = self
            .values
            .iter()
            .map(|(dimension, value)| format!("({} {})", dimension, format_value(*value)))
            .collect();
        format!("({})", pairs.join(" "))
    }

    /// Render the full simulation directive for this point.
    ///
    /// Slots are filled with the sample count, the serialized point, the
    /// first run id and the canonical file name, in that order.
    pub fn to_directive(&self, template: &DirectiveTemplate) -> String {
        template.fill([
            self.sample_count.to_string(),
            self.serialize(),
            self.run_start_id.to_string(),
            self.file_name(),
        ])
    }

    /// Check whether two points sit at the same coordinate, ignoring run metadata.
    pub fn same_coordinates(&self, other: &HyperPoint) -> bool {
        self.values == other.values
    }
}

impl fmt::Display for HyperPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.serialize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(values: &[(&str, f64)]) -> HyperPoint {
        let values = values
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect();
        HyperPoint::new(values, 100, 200, "ddm".to_string())
    }

    #[test]
    fn test_dimension_names_sorted() {
        let p = point(&[(":zeta", 1.0), (":alpha", 2.0), (":mid", 3.0)]);
        assert_eq!(p.dimension_names(), vec![":alpha", ":mid", ":zeta"]);
    }

    #[test]
    fn test_value_of() {
        let p = point(&[(":A", 0.5)]);
        assert_eq!(p.value_of(":A"), Ok(0.5));
        assert_eq!(p.value_of(":B"), Err(UnknownDimensionError::new(":B")));
    }

    #[test]
    fn test_serialize() {
        let p = point(&[(":B", -2.0), (":A", 0.5)]);
        assert_eq!(p.serialize(), "((:A 0.500) (:B -2.000))");
        assert_eq!(p.to_string(), p.serialize());
    }

    #[test]
    fn test_serialize_no_dimensions() {
        let p = point(&[]);
        assert_eq!(p.serialize(), "()");
    }

    #[test]
    fn test_canonical_name() {
        let p = point(&[(":noise-level", 0.25), (":A", 1.0)]);
        assert_eq!(p.canonical_name("run"), "run_A_1.000_noiselevel_0.250.txt");
        assert_eq!(p.file_name(), "ddm_A_1.000_noiselevel_0.250.txt");
    }

    #[test]
    fn test_name_and_serialization_share_order() {
        let p = point(&[(":c", 3.0), (":a", 1.0), (":b", 2.0)]);
        let from_name: Vec<String> = p
            .file_name()
            .trim_end_matches(RESULT_EXTENSION)
            .split('_')
            .skip(1)
            .step_by(2)
            .map(String::from)
            .collect();
        let from_names: Vec<String> = p.dimension_names().iter().map(|n| sanitize(n)).collect();
        assert_eq!(from_name, from_names);
        assert!(p.serialize().starts_with("((:a 1.000) (:b 2.000) (:c 3.000"));
    }

    #[test]
    fn test_to_directive() {
        let p = point(&[(":A", 0.5)]);
        let directive = p.to_directive(&DirectiveTemplate::default());
        assert_eq!(
            directive,
            "(simulate 100 :params '((:A 0.500)) :start 200 :filename \"ddm_A_0.500.txt\")"
        );
    }

    #[test]
    fn test_run_id_span() {
        let p = point(&[(":A", 0.5)]);
        assert_eq!(p.run_start_id(), 200);
        assert_eq!(p.run_end_id(), 299);
    }
}
