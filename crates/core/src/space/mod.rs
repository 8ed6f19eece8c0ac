//! Hyperparameter spaces
//!
//! A [`HyperSpace`] is an ordered set of [`ParamRange`]s, unique by name,
//! plus the run metadata shared by every point it derives.
//!
//! # Derivation
//!
//! Points are never stored. [`HyperSpace::points`] expands every range,
//! takes the Cartesian product in dimension insertion order (first
//! dimension slowest) and assigns run ids in a single pass:
//!
//! ```text
//! run_id(i) = run_start_id + i * sample_count
//! ```
//!
//! Re-deriving an unmodified space therefore always yields the same points,
//! ids and names.
//!
//! Every mutator rejects a change that would make the point count overflow
//! `usize` or the run ids overflow `u64`, so derivation itself cannot fail.
//!
//! # Slicing
//!
//! [`HyperSpace::cut_across`] pins one dimension per child space and
//! [`HyperSpace::divide_into`] splits the flattened enumeration into
//! balanced contiguous blocks. Both cover every point of the parent exactly
//! once.

mod partition;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::ops::Range;

use indexmap::IndexMap;
use tracing::debug;

use crate::combine::{cartesian_product, product_len, unrank};
use crate::error::{SpaceError, UnknownDimensionError};
use crate::naming::{format_value, sanitize};
use crate::point::HyperPoint;
use crate::range::ParamRange;
use crate::render::PointSource;

pub use partition::SpacePartition;

/// Model label used when none is configured.
pub const DEFAULT_MODEL_LABEL: &str = "sweep";

/// A hyperparameter space.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperSpace {
    dimensions: IndexMap<String, ParamRange>,
    sample_count: u64,
    run_start_id: u64,
    model_label: String,
}

impl Default for HyperSpace {
    fn default() -> Self {
        Self {
            dimensions: IndexMap::new(),
            sample_count: 1,
            run_start_id: 0,
            model_label: DEFAULT_MODEL_LABEL.to_string(),
        }
    }
}

impl HyperSpace {
    /// Create a space from ranges. A later range replaces an earlier one
    /// with the same name.
    pub fn new(ranges: impl IntoIterator<Item = ParamRange>) -> Result<Self, SpaceError> {
        let mut space = Self::default();
        for range in ranges {
            space.set_dimension(range)?;
        }
        Ok(space)
    }

    /// Builder method: set the number of runs per point.
    pub fn with_sample_count(mut self, sample_count: u64) -> Result<Self, SpaceError> {
        if sample_count == 0 {
            return Err(SpaceError::ZeroSampleCount);
        }
        check_extent(&self.expansion_lens(), sample_count, self.run_start_id)?;
        self.sample_count = sample_count;
        Ok(self)
    }

    /// Builder method: set the first run id allocated by this space.
    pub fn with_run_start_id(mut self, run_start_id: u64) -> Result<Self, SpaceError> {
        check_extent(&self.expansion_lens(), self.sample_count, run_start_id)?;
        self.run_start_id = run_start_id;
        Ok(self)
    }

    /// Builder method: set the label prefixed to every output name.
    pub fn with_model_label(mut self, label: impl Into<String>) -> Result<Self, SpaceError> {
        let label = label.into();
        if !is_model_label(&label) {
            return Err(SpaceError::InvalidModelLabel(label));
        }
        self.model_label = label;
        Ok(self)
    }

    /// Insert a dimension, replacing any dimension with the same name in place.
    ///
    /// Returns the replaced range, if any. The space is left unchanged when
    /// the new range would overflow its point count or run ids.
    pub fn set_dimension(
        &mut self,
        range: ParamRange,
    ) -> Result<Option<ParamRange>, SpaceError> {
        let mut lens = self.expansion_lens();
        match self.dimensions.get_index_of(range.name()) {
            Some(index) => lens[index] = range.len(),
            None => lens.push(range.len()),
        }
        check_extent(&lens, self.sample_count, self.run_start_id)?;

        let replaced = self.dimensions.insert(range.name().to_string(), range);
        if let Some(old) = &replaced {
            debug!(dimension = old.name(), "replaced dimension");
        }
        Ok(replaced)
    }

    /// Remove a dimension, keeping the order of the others.
    pub fn remove_dimension(&mut self, name: &str) -> Result<ParamRange, UnknownDimensionError> {
        self.dimensions
            .shift_remove(name)
            .ok_or_else(|| UnknownDimensionError::new(name))
    }

    /// Look up a dimension by name.
    pub fn dimension(&self, name: &str) -> Result<&ParamRange, UnknownDimensionError> {
        self.dimensions
            .get(name)
            .ok_or_else(|| UnknownDimensionError::new(name))
    }

    /// Dimensions in insertion (enumeration) order.
    pub fn dimensions(&self) -> impl Iterator<Item = &ParamRange> + '_ {
        self.dimensions.values()
    }

    /// Dimension names in insertion (enumeration) order.
    pub fn dimension_names(&self) -> Vec<&str> {
        self.dimensions.keys().map(String::as_str).collect()
    }

    pub fn dimension_count(&self) -> usize {
        self.dimensions.len()
    }

    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    pub fn run_start_id(&self) -> u64 {
        self.run_start_id
    }

    pub fn model_label(&self) -> &str {
        &self.model_label
    }

    /// Number of points: the product of every dimension's expansion length.
    ///
    /// A space without dimensions has no points.
    pub fn size(&self) -> usize {
        // bounded by check_extent on every mutation
        product_len(&self.expansion_lens()).unwrap_or(usize::MAX)
    }

    /// Total number of run ids allocated by this space.
    pub fn run_id_count(&self) -> u64 {
        self.size() as u64 * self.sample_count
    }

    /// The run ids allocated by this space.
    pub fn run_ids(&self) -> Range<u64> {
        self.run_start_id..self.run_start_id + self.run_id_count()
    }

    /// Derive every point in enumeration order.
    pub fn points(&self) -> Vec<HyperPoint> {
        let axes: Vec<Vec<f64>> = self.dimensions.values().map(ParamRange::expand).collect();
        let points: Vec<HyperPoint> = cartesian_product(&axes)
            .into_iter()
            .enumerate()
            .map(|(index, tuple)| self.build_point(index, tuple))
            .collect();
        debug!(
            label = %self.model_label,
            dimensions = self.dimensions.len(),
            points = points.len(),
            "derived points"
        );
        points
    }

    /// Derive the point at `index` in enumeration order without expanding
    /// the whole space.
    pub fn point_at(&self, index: usize) -> Option<HyperPoint> {
        let indices = unrank(&self.expansion_lens(), index)?;
        let tuple = self
            .dimensions
            .values()
            .zip(indices)
            .map(|(range, i)| range.value_at(i))
            .collect::<Option<Vec<f64>>>()?;
        Some(self.build_point(index, tuple))
    }

    /// Slice the space across one dimension.
    ///
    /// Produces one child per value of `name`, each with that dimension
    /// pinned and its label extended with the dimension and value. Child `k`
    /// allocates the `k`-th block of this space's run ids, so ids stay
    /// unique across children.
    pub fn cut_across(&self, name: &str) -> Result<Vec<HyperSpace>, UnknownDimensionError> {
        let range = self.dimension(name)?;
        let values = range.expand();
        let child_ids = (self.size() / values.len()) as u64 * self.sample_count;

        let mut children = Vec::with_capacity(values.len());
        for (k, value) in values.into_iter().enumerate() {
            let mut child = self.clone();
            // a pinned child is smaller than its parent, so it stays in bounds
            child.dimensions.insert(name.to_string(), range.pin(value));
            child.model_label = format!(
                "{}_{}_{}",
                self.model_label,
                sanitize(name),
                format_value(value)
            );
            child.run_start_id = self.run_start_id + k as u64 * child_ids;
            children.push(child);
        }

        debug!(
            label = %self.model_label,
            dimension = name,
            children = children.len(),
            "cut across dimension"
        );
        Ok(children)
    }

    /// Slice the space across several dimensions in turn.
    ///
    /// With no names the result is this space alone.
    pub fn cut_across_all<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<Vec<HyperSpace>, UnknownDimensionError> {
        let mut spaces = vec![self.clone()];
        for name in names {
            let mut next = Vec::new();
            for space in &spaces {
                next.extend(space.cut_across(name.as_ref())?);
            }
            spaces = next;
        }
        Ok(spaces)
    }

    /// Split the enumeration into `n` contiguous blocks whose sizes differ
    /// by at most one.
    ///
    /// The first `size % n` partitions hold the extra points. Partitions
    /// keep this space's run ids and labels. When `n` exceeds the size,
    /// trailing partitions are empty.
    pub fn divide_into(&self, n: usize) -> Result<Vec<SpacePartition>, SpaceError> {
        if n == 0 {
            return Err(SpaceError::ZeroPartitions);
        }

        let total = self.size();
        let base = total / n;
        let extra = total % n;

        let mut partitions = Vec::with_capacity(n);
        let mut start = 0;
        for index in 0..n {
            let len = base + usize::from(index < extra);
            partitions.push(SpacePartition::new(self.clone(), index, start..start + len));
            start += len;
        }

        debug!(
            label = %self.model_label,
            partitions = n,
            points = total,
            "divided space"
        );
        Ok(partitions)
    }

    fn expansion_lens(&self) -> Vec<usize> {
        self.dimensions.values().map(ParamRange::len).collect()
    }

    fn build_point(&self, index: usize, tuple: Vec<f64>) -> HyperPoint {
        let values: BTreeMap<String, f64> = self.dimensions.keys().cloned().zip(tuple).collect();
        HyperPoint::new(
            values,
            self.sample_count,
            self.run_start_id + index as u64 * self.sample_count,
            self.model_label.clone(),
        )
    }
}

impl PointSource for HyperSpace {
    fn label(&self) -> &str {
        &self.model_label
    }

    fn points(&self) -> Vec<HyperPoint> {
        HyperSpace::points(self)
    }
}

/// Check that a space with these expansion lengths has a point count that
/// fits `usize` and run ids `run_start_id..run_start_id + size * sample_count`
/// that fit `u64`.
fn check_extent(lens: &[usize], sample_count: u64, run_start_id: u64) -> Result<(), SpaceError> {
    let points = product_len(lens).ok_or(SpaceError::TooManyPoints)?;
    u64::try_from(points)
        .ok()
        .and_then(|n| n.checked_mul(sample_count))
        .and_then(|runs| runs.checked_add(run_start_id))
        .map(|_| ())
        .ok_or(SpaceError::RunIdOverflow {
            run_start_id,
            sample_count,
            points,
        })
}

/// Check that a label can prefix a file name.
fn is_model_label(label: &str) -> bool {
    !label.is_empty()
        && !label
            .chars()
            .any(|c| c.is_whitespace() || c == '/' || c == '\\')
}
