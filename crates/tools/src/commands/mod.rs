//! Subcommands of the `hypersweep` binary.

pub mod generate;
pub mod inspect;
pub mod points;

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use hypersweep_core::{HyperSpace, SweepManifest};

/// Where the sweep comes from, plus overrides for the manifest's values.
#[derive(Args, Debug, Clone, Default)]
pub struct SweepArgs {
    /// Parameter spec file (`NAME START END STEP` per line)
    pub params: Option<PathBuf>,

    /// Sweep manifest (YAML). A positional spec file replaces its `paramsFile`.
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Label prefixed to every output name
    #[arg(long)]
    pub label: Option<String>,

    /// Simulated runs per point
    #[arg(long)]
    pub samples: Option<u64>,

    /// First run id of the sweep
    #[arg(long)]
    pub start_id: Option<u64>,
}

/// A fully resolved sweep.
#[derive(Debug, Clone)]
pub struct Sweep {
    pub manifest: SweepManifest,
    pub space: HyperSpace,
}

impl SweepArgs {
    /// Load the manifest and spec, apply overrides and build the space.
    ///
    /// Rejected spec lines are logged and skipped.
    pub fn resolve(&self) -> Result<Sweep, String> {
        let mut manifest = match &self.manifest {
            Some(path) => {
                let manifest = SweepManifest::load(path)
                    .map_err(|e| format!("Failed to load manifest '{}': {}", path.display(), e))?;
                info!("Loaded manifest: {} ({})", manifest.metadata.name, path.display());
                manifest
            }
            None => SweepManifest::new(hypersweep_core::space::DEFAULT_MODEL_LABEL),
        };

        if let Some(params) = &self.params {
            manifest.params_file = Some(params.clone());
        }
        if manifest.params_file.is_none() && manifest.dimensions.is_empty() {
            return Err("No parameters given: pass a spec file or a manifest with dimensions".into());
        }
        if let Some(label) = &self.label {
            manifest.model_label = Some(label.clone());
        }
        if let Some(samples) = self.samples {
            manifest.sample_count = samples;
        }
        if let Some(start_id) = self.start_id {
            manifest.run_start_id = start_id;
        }

        let spec = manifest.load_params().map_err(|e| e.to_string())?;
        if let Some(spec) = &spec {
            spec.log_diagnostics();
            info!(
                "Loaded {} dimensions ({} lines skipped)",
                spec.ranges.len(),
                spec.rejected_count()
            );
        }

        let space = manifest
            .build_space(spec.as_ref())
            .map_err(|e| e.to_string())?;
        Ok(Sweep { manifest, space })
    }
}
