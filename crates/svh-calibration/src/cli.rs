use super::pipeline::Pipeline;
use super::records::Summary;
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use svh_core::BOUNDARY_BAND;
use svh_core::Context;
use svh_core::ROLLOUT_CANDIDATES;
use svh_core::ROLLOUT_SAMPLES;

/// Calibration run configuration parsed from the command line.
#[derive(Parser)]
#[command(author, version, about = "sevenhand offline seed calibration", long_about = None)]
pub struct Cli {
    /// Number of sequential seeds to calibrate
    #[arg(long, default_value_t = 1024)]
    seeds: u64,
    /// First seed of the batch
    #[arg(long, default_value_t = 0)]
    start: u64,
    /// Run identifier; defaults to the unix timestamp
    #[arg(long)]
    run_id: Option<String>,
    /// Rollouts per candidate in stage B
    #[arg(long, default_value_t = ROLLOUT_SAMPLES)]
    rollouts: usize,
    /// Candidates per decision point in stage B
    #[arg(long, default_value_t = ROLLOUT_CANDIDATES)]
    candidates: usize,
    /// Cutoff band fraction routing seeds into stage B
    #[arg(long, default_value_t = BOUNDARY_BAND)]
    band: f32,
    /// Artifact root directory
    #[arg(long, default_value = "artifacts/pipeline")]
    out: PathBuf,
}

impl Cli {
    /// Parse, declare calibration context, run the pipeline, report.
    pub fn run() -> anyhow::Result<()> {
        svh_core::assume(Context::Calibration);
        let cli = Self::parse();
        let run_id = cli.run_id.clone().unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time moves slow")
                .as_secs()
                .to_string()
        });
        let pipeline = Pipeline {
            run_id,
            seeds: (cli.start..cli.start + cli.seeds).collect(),
            samples: cli.rollouts,
            candidates: cli.candidates,
            band: cli.band,
            seed_source: format!("sequential:{}..{}", cli.start, cli.start + cli.seeds),
            out: cli.out.clone(),
        };
        let summary = pipeline.run()?;
        Self::report(&summary);
        Ok(())
    }

    fn report(summary: &Summary) {
        log::info!("[pipeline] run {} complete", summary.run_id);
        println!("{}", format!("run        {}", summary.run_id).white());
        println!("{}", format!("prng       {}", summary.prng).white());
        for (tier, count) in &summary.tiers {
            let target = summary.targets.get(tier).copied().unwrap_or(0);
            println!(
                "{}",
                format!("{:<10} {} seeds, target {}", tier, count, target).cyan(),
            );
        }
        println!("{}", format!("refined    {}", summary.refined).yellow());
        println!("{}", format!("passed     {}", summary.passed).green());
        println!("{}", format!("failed     {}", summary.failed).red());
    }
}
