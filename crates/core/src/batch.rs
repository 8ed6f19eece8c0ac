//! Batches of independently dispatchable work.
//!
//! A [`PartitionPlan`] says how a space is split for dispatch; applying it
//! yields [`Batch`]es, each rendered into one script.

use serde::{Deserialize, Serialize};

use crate::error::SpaceError;
use crate::point::HyperPoint;
use crate::render::PointSource;
use crate::space::{HyperSpace, SpacePartition};

/// How to split a space into batches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartitionPlan {
    /// The whole space as one batch.
    #[default]
    Whole,
    /// One batch per combination of values of the named dimensions.
    CutAcross(Vec<String>),
    /// `n` balanced contiguous batches.
    DivideInto(usize),
}

/// One unit of work produced by a [`PartitionPlan`].
#[derive(Debug, Clone, PartialEq)]
pub enum Batch {
    Space(HyperSpace),
    Partition(SpacePartition),
}

impl Batch {
    /// Number of points in this batch.
    pub fn size(&self) -> usize {
        match self {
            Batch::Space(space) => space.size(),
            Batch::Partition(partition) => partition.len(),
        }
    }
}

impl PointSource for Batch {
    fn label(&self) -> &str {
        match self {
            Batch::Space(space) => space.label(),
            Batch::Partition(partition) => partition.label(),
        }
    }

    fn points(&self) -> Vec<HyperPoint> {
        match self {
            Batch::Space(space) => space.points(),
            Batch::Partition(partition) => partition.points(),
        }
    }
}

impl PartitionPlan {
    /// Split `space` according to this plan.
    pub fn apply(&self, space: &HyperSpace) -> Result<Vec<Batch>, SpaceError> {
        let batches = match self {
            PartitionPlan::Whole => vec![Batch::Space(space.clone())],
            PartitionPlan::CutAcross(names) => space
                .cut_across_all(names.as_slice())?
                .into_iter()
                .map(Batch::Space)
                .collect(),
            PartitionPlan::DivideInto(n) => space
                .divide_into(*n)?
                .into_iter()
                .map(Batch::Partition)
                .collect(),
        };
        Ok(batches)
    }
}
