//! Sweep manifests
//!
//! A manifest describes a complete sweep: where the ranges come from, the
//! run metadata, the script template and how the space is partitioned.
//!
//! # File Format
//!
//! ```yaml
//! apiVersion: hypersweep/v1
//! kind: Sweep
//!
//! metadata:
//!   name: ddm_grid
//!   description: "Drift-rate by threshold sweep"
//!
//! # Ranges from a spec file, relative to the manifest
//! paramsFile: params.txt
//!
//! # Inline ranges override file ranges of the same name
//! dimensions:
//!   - { name: ":v", start: 0.1, end: 0.5, step: 0.1 }
//!
//! sampleCount: 100
//! runStartId: 0
//! modelLabel: ddm
//!
//! script:
//!   intro: "(load \"model.lisp\")\n"
//!   outro: "(quit)\n"
//!
//! partition:
//!   cutAcross: [":v"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::batch::PartitionPlan;
use crate::error::{Error, ManifestError};
use crate::params::ParamSpec;
use crate::range::ParamRange;
use crate::render::ScriptTemplate;
use crate::space::HyperSpace;

/// Expected `apiVersion`.
pub const API_VERSION: &str = "hypersweep/v1";

/// Expected `kind`.
pub const KIND: &str = "Sweep";

/// A sweep manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepManifest {
    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_kind")]
    pub kind: String,

    #[serde(default)]
    pub metadata: SweepMetadata,

    /// Parameter spec file, resolved against the manifest's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params_file: Option<PathBuf>,

    /// Inline ranges, applied after the spec file.
    #[serde(default)]
    pub dimensions: Vec<ParamRange>,

    #[serde(default = "default_sample_count")]
    pub sample_count: u64,

    #[serde(default)]
    pub run_start_id: u64,

    /// Label prefixed to every output name. Defaults to `metadata.name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_label: Option<String>,

    #[serde(default)]
    pub script: ScriptTemplate,

    #[serde(default)]
    pub partition: PartitionPlan,
}

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_kind() -> String {
    KIND.to_string()
}

fn default_sample_count() -> u64 {
    1
}

/// Metadata for a sweep.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepMetadata {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SweepManifest {
    /// Create a manifest with defaults and the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            metadata: SweepMetadata {
                name: name.into(),
                description: None,
            },
            params_file: None,
            dimensions: Vec::new(),
            sample_count: default_sample_count(),
            run_start_id: 0,
            model_label: None,
            script: ScriptTemplate::default(),
            partition: PartitionPlan::Whole,
        }
    }

    /// Load a manifest from a YAML file.
    ///
    /// A relative `paramsFile` is resolved against the manifest's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut manifest = Self::from_yaml(&content)?;
        if let (Some(params), Some(dir)) = (manifest.params_file.as_mut(), path.parent()) {
            if params.is_relative() {
                *params = dir.join(&*params);
            }
        }
        Ok(manifest)
    }

    /// Parse a manifest from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ManifestError> {
        let manifest: SweepManifest = serde_yaml::from_str(yaml)?;
        manifest.validate_schema()?;
        Ok(manifest)
    }

    fn validate_schema(&self) -> Result<(), ManifestError> {
        if self.api_version != API_VERSION {
            return Err(ManifestError::InvalidApiVersion(self.api_version.clone()));
        }
        if self.kind != KIND {
            return Err(ManifestError::InvalidKind(self.kind.clone()));
        }
        if self.metadata.name.is_empty() {
            return Err(ManifestError::MissingField("metadata.name".to_string()));
        }
        Ok(())
    }

    /// The label for output names.
    pub fn label(&self) -> &str {
        self.model_label.as_deref().unwrap_or(&self.metadata.name)
    }

    /// Load the spec file named by `paramsFile`, if any.
    pub fn load_params(&self) -> Result<Option<ParamSpec>, Error> {
        self.params_file.as_ref().map(ParamSpec::load).transpose()
    }

    /// Build the space from `spec` (if any) and the inline dimensions.
    pub fn build_space(&self, spec: Option<&ParamSpec>) -> Result<HyperSpace, Error> {
        let mut space = spec
            .map(ParamSpec::to_space)
            .transpose()?
            .unwrap_or_default();
        for range in &self.dimensions {
            space.set_dimension(range.clone())?;
        }
        let space = space
            .with_sample_count(self.sample_count)?
            .with_run_start_id(self.run_start_id)?
            .with_model_label(self.label())?;
        Ok(space)
    }

    /// Builder method: add an inline dimension.
    pub fn with_dimension(mut self, range: ParamRange) -> Self {
        self.dimensions.push(range);
        self
    }

    /// Builder method: set the number of runs per point.
    pub fn with_sample_count(mut self, sample_count: u64) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Builder method: set the partition plan.
    pub fn with_partition(mut self, partition: PartitionPlan) -> Self {
        self.partition = partition;
        self
    }
}
