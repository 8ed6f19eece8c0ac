//! Writing rendered scripts to disk.
//!
//! Each batch (or each point, in per-point mode) becomes one script file
//! in the output directory. A `batches.json` summary lists every file
//! written, so a dispatcher can hand them to workers.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use hypersweep_core::point::RESULT_EXTENSION;
use hypersweep_core::render::render_points;
use hypersweep_core::{Batch, HyperPoint, PointSource, ScriptTemplate};

/// Name of the summary written next to the scripts.
pub const SUMMARY_FILE: &str = "batches.json";

/// Schema tag of the summary file.
pub const SUMMARY_SCHEMA: &str = "hypersweep.batches/v1";

/// One script written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSummary {
    pub label: String,
    pub script: String,
    pub points: usize,
    pub first_run_id: u64,
    pub last_run_id: u64,
}

/// Summary file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub schema: String,
    pub total_points: usize,
    pub scripts: Vec<ScriptSummary>,
}

/// Where and how scripts are written.
#[derive(Debug, Clone)]
pub struct ScriptWriter {
    pub out_dir: PathBuf,
    pub extension: String,
    pub template: ScriptTemplate,
    /// Write one script per point instead of one per batch.
    pub per_point: bool,
}

impl ScriptWriter {
    /// Render and write every batch, in parallel. Empty batches are skipped.
    pub fn write_all(&self, batches: &[Batch]) -> Result<BatchSummary, String> {
        fs::create_dir_all(&self.out_dir).map_err(|e| {
            format!("Failed to create {}: {}", self.out_dir.display(), e)
        })?;

        let per_batch: Vec<Vec<ScriptSummary>> = batches
            .par_iter()
            .map(|batch| self.write_batch(batch))
            .collect::<Result<_, String>>()?;

        let scripts: Vec<ScriptSummary> = per_batch.into_iter().flatten().collect();
        let summary = BatchSummary {
            schema: SUMMARY_SCHEMA.to_string(),
            total_points: scripts.iter().map(|s| s.points).sum(),
            scripts,
        };

        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| format!("Failed to serialize summary: {}", e))?;
        write_file(&self.out_dir.join(SUMMARY_FILE), &json)?;

        Ok(summary)
    }

    fn write_batch(&self, batch: &Batch) -> Result<Vec<ScriptSummary>, String> {
        let points = batch.points();
        if points.is_empty() {
            warn!("Skipping empty batch {}", batch.label());
            return Ok(Vec::new());
        }

        if self.per_point {
            points
                .iter()
                .map(|point| {
                    let label = point.file_name();
                    let label = label.strip_suffix(RESULT_EXTENSION).unwrap_or(&label);
                    self.write_script(label, std::slice::from_ref(point))
                })
                .collect()
        } else {
            Ok(vec![self.write_script(batch.label(), &points)?])
        }
    }

    fn write_script(&self, label: &str, points: &[HyperPoint]) -> Result<ScriptSummary, String> {
        let script = format!("{}.{}", label, self.extension);
        let path = self.out_dir.join(&script);
        write_file(&path, &render_points(points, &self.template))?;
        debug!("Wrote {} ({} points)", path.display(), points.len());

        Ok(ScriptSummary {
            label: label.to_string(),
            script,
            points: points.len(),
            first_run_id: points.first().map_or(0, HyperPoint::run_start_id),
            last_run_id: points.last().map_or(0, HyperPoint::run_end_id),
        })
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), String> {
    fs::write(path, contents).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}
