//! `hypersweep generate`: write simulation scripts for a sweep.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use hypersweep_core::PartitionPlan;

use super::SweepArgs;
use crate::output::{BatchSummary, ScriptWriter};

#[derive(Args, Debug, Clone)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub sweep: SweepArgs,

    /// Directory the scripts are written to
    #[arg(short, long, default_value = "scripts")]
    pub out: PathBuf,

    /// Write one script per value of this dimension (repeatable)
    #[arg(long = "cut-across", value_name = "DIMENSION")]
    pub cut_across: Vec<String>,

    /// Split the sweep into this many balanced scripts
    #[arg(long, conflicts_with = "cut_across")]
    pub divide_into: Option<usize>,

    /// Write one script per point
    #[arg(long)]
    pub per_point: bool,

    /// Extension of the generated scripts
    #[arg(long, default_value = "lisp")]
    pub extension: String,
}

impl GenerateCommand {
    /// The partition plan: flags win over the manifest.
    fn plan(&self, configured: &PartitionPlan) -> PartitionPlan {
        if let Some(n) = self.divide_into {
            PartitionPlan::DivideInto(n)
        } else if !self.cut_across.is_empty() {
            PartitionPlan::CutAcross(self.cut_across.clone())
        } else {
            configured.clone()
        }
    }
}

pub fn run(command: GenerateCommand) -> Result<BatchSummary, String> {
    let sweep = command.sweep.resolve()?;
    let plan = command.plan(&sweep.manifest.partition);

    info!(
        "Sweep '{}': {} dimensions, {} points, {} runs per point",
        sweep.space.model_label(),
        sweep.space.dimension_count(),
        sweep.space.size(),
        sweep.space.sample_count()
    );

    let batches = plan.apply(&sweep.space).map_err(|e| e.to_string())?;
    info!("Partitioned into {} batches ({:?})", batches.len(), plan);

    let writer = ScriptWriter {
        out_dir: command.out.clone(),
        extension: command.extension.clone(),
        template: sweep.manifest.script.clone(),
        per_point: command.per_point,
    };
    let summary = writer.write_all(&batches)?;

    info!(
        "Wrote {} scripts covering {} points to {}",
        summary.scripts.len(),
        summary.total_points,
        command.out.display()
    );
    Ok(summary)
}
