//! Hypersweep Core
//!
//! Enumerates every point of a discrete hyperparameter grid and renders
//! each point as a directive for an external simulator.
//!
//! Pipeline:
//! spec text → [`ParamRange`]s → [`HyperSpace`] → [`HyperPoint`]s → script
//!
//! All operations are pure computations over value types. A space may be
//! read from several threads at once; only [`HyperSpace::set_dimension`]
//! and [`HyperSpace::remove_dimension`] mutate it.

pub mod batch;
pub mod combine;
pub mod error;
pub mod manifest;
pub mod naming;
pub mod params;
pub mod point;
pub mod range;
pub mod render;
pub mod space;

pub use batch::{Batch, PartitionPlan};
pub use error::{
    Error, ManifestError, RangeField, Result, SpaceError, SpecParseError, TemplateError,
    UnknownDimensionError, ValidationError,
};
pub use manifest::SweepManifest;
pub use params::{ParamSpec, SpecDiagnostic};
pub use point::HyperPoint;
pub use range::ParamRange;
pub use render::{DirectiveTemplate, PointSource, ScriptTemplate, render, render_with};
pub use space::{HyperSpace, SpacePartition};
