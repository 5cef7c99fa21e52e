use std::{fs::File, io::Write, path::PathBuf};

use clap::Parser;
use log::info;

mod generator;

/// Program to generate single-machine tardiness scheduling instances
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of jobs to generate
    #[arg(short, long, env, default_value_t = 10)]
    jobs: usize,

    /// Seed for the random number generator
    #[arg(short, long, env, default_value_t = 0)]
    seed: u64,

    /// Probability of a precedence between any two jobs
    #[arg(short, long, env, default_value_t = 0.1)]
    edge_probability: f64,

    /// Generate job weights
    #[arg(short, long)]
    weighted: bool,

    /// Write JSON instead of the text format
    #[arg(long)]
    json: bool,

    /// Target file for output
    file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Args = Args::parse();

    if !(0.0..=1.0).contains(&args.edge_probability) {
        anyhow::bail!("edge probability must be between 0 and 1");
    }
    if args.jobs == 0 || args.jobs > usize::from(u16::MAX) {
        anyhow::bail!("job count must be between 1 and {}", u16::MAX);
    }

    let instance = generator::generate_instance(&generator::GeneratorOptions {
        jobs: args.jobs,
        seed: args.seed,
        edge_probability: args.edge_probability,
        weighted: args.weighted,
    });
    info!(
        "generated {} jobs with {} precedences",
        instance.jobs,
        instance.precedences.len()
    );

    let mut writer = File::create(&args.file)?;
    if args.json {
        serde_json::to_writer_pretty(&writer, &instance)?;
    } else {
        write!(writer, "{instance}")?;
    }

    writer.flush()?;

    Ok(())
}
