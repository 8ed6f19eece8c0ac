//! `hypersweep inspect`: describe a sweep without writing anything.

use clap::Args;

use super::SweepArgs;

#[derive(Args, Debug, Clone)]
pub struct InspectCommand {
    #[command(flatten)]
    pub sweep: SweepArgs,
}

pub fn run(command: InspectCommand) -> Result<(), String> {
    let sweep = command.sweep.resolve()?;
    let space = &sweep.space;

    println!("Sweep: {}", space.model_label());
    println!("Dimensions:");
    for range in space.dimensions() {
        println!(
            "  {:<16} start={:<10} end={:<10} step={:<10} values={}",
            range.name(),
            range.start(),
            range.end(),
            range.step(),
            range.len()
        );
    }
    println!("Points: {}", space.size());
    println!("Runs per point: {}", space.sample_count());
    let run_ids = space.run_ids();
    if !run_ids.is_empty() {
        println!("Run ids: {}..{}", run_ids.start, run_ids.end);
    }
    Ok(())
}
