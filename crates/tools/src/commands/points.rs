//! `hypersweep points`: list points in enumeration order.

use clap::Args;

use super::SweepArgs;

#[derive(Args, Debug, Clone)]
pub struct PointsCommand {
    #[command(flatten)]
    pub sweep: SweepArgs,

    /// Print at most this many points
    #[arg(long)]
    pub limit: Option<usize>,
}

pub fn run(command: PointsCommand) -> Result<(), String> {
    let sweep = command.sweep.resolve()?;
    let limit = command.limit.unwrap_or(usize::MAX);

    for point in sweep.space.points().into_iter().take(limit) {
        println!(
            "{}\t{}\t{}",
            point.run_start_id(),
            point.file_name(),
            point.serialize()
        );
    }
    Ok(())
}
