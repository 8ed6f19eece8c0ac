//! Contiguous blocks of a space's enumeration.

use std::ops::Range;

use crate::point::HyperPoint;
use crate::render::PointSource;

use super::HyperSpace;

/// One block produced by [`HyperSpace::divide_into`].
///
/// Points keep the run ids and file names they have in the parent space.
#[derive(Debug, Clone, PartialEq)]
pub struct SpacePartition {
    space: HyperSpace,
    index: usize,
    span: Range<usize>,
    label: String,
}

impl SpacePartition {
    pub(super) fn new(space: HyperSpace, index: usize, span: Range<usize>) -> Self {
        let label = format!("{}_part{}", space.model_label(), index);
        Self {
            space,
            index,
            span,
            label,
        }
    }

    /// Position of this partition among its siblings.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Enumeration indices of the parent covered by this partition.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// The parent space.
    pub fn space(&self) -> &HyperSpace {
        &self.space
    }

    pub fn len(&self) -> usize {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// Derive this partition's points in enumeration order.
    pub fn points(&self) -> Vec<HyperPoint> {
        self.span
            .clone()
            .filter_map(|index| self.space.point_at(index))
            .collect()
    }
}

impl PointSource for SpacePartition {
    fn label(&self) -> &str {
        &self.label
    }

    fn points(&self) -> Vec<HyperPoint> {
        SpacePartition::points(self)
    }
}
