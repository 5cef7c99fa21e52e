#![forbid(unsafe_code)]
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::Verbosity;
use log::{debug, error};
use tardiness::schedulers::tabu::{Neighborhood, TabuConfig};

mod commands;

#[derive(Debug, Parser)]
#[command(author, version)]
/// Single-machine tardiness scheduler
struct App {
    #[command(flatten)]
    verbose: Verbosity,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a schedule for a given instance file
    Schedule(Schedule),
    /// Run tabu search for every combination of list length and tolerance
    Sweep(Sweep),
    /// Create a graphviz notation of the precedences of an instance file
    Graph {
        #[arg(required = true)]
        instance_file: PathBuf,
        #[arg(required = true)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Engine {
    Tabu,
    Lcl,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NeighborhoodArg {
    Adjacent,
    AllPairs,
}

impl From<NeighborhoodArg> for Neighborhood {
    fn from(value: NeighborhoodArg) -> Self {
        match value {
            NeighborhoodArg::Adjacent => Neighborhood::Adjacent,
            NeighborhoodArg::AllPairs => Neighborhood::AllPairs,
        }
    }
}

#[derive(Debug, Args)]
pub struct Schedule {
    /// Instance file, text format or `.json`
    #[arg(required = true)]
    pub path: PathBuf,

    /// Which algorithm to run
    #[arg(short, long, value_enum, default_value_t = Engine::Both)]
    pub run: Engine,

    /// List length for tabu search
    #[arg(short, long, env = "TABU_LIST_LENGTH", default_value_t = 20)]
    pub list_length: usize,

    /// Maximum iterations for tabu search
    #[arg(short, long, env = "TABU_MAX_ITERATIONS", default_value_t = 1000)]
    pub max_iterations: usize,

    /// Tolerance for tabu search
    #[arg(short, long, env = "TABU_TOLERANCE", default_value_t = 10)]
    pub tolerance: i64,

    /// Exchanges considered by tabu search
    #[arg(long, value_enum, default_value_t = NeighborhoodArg::Adjacent)]
    pub neighborhood: NeighborhoodArg,

    /// Compare weighted tardiness when LCL picks the next job
    #[arg(long)]
    pub weighted_lcl: bool,

    /// Save the run log to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Schedule {
    pub fn tabu_config(&self) -> TabuConfig {
        TabuConfig::default()
            .with_list_length(self.list_length)
            .with_max_iterations(self.max_iterations)
            .with_tolerance(self.tolerance)
            .with_neighborhood(self.neighborhood.into())
    }
}

#[derive(Debug, Args)]
pub struct Sweep {
    /// Instance file, text format or `.json`
    #[arg(required = true)]
    pub path: PathBuf,

    /// Target file for the results, one line per configuration
    #[arg(required = true)]
    pub output: PathBuf,

    #[arg(short, long, value_delimiter = ',', default_values_t = vec![5, 10, 20, 50, 100])]
    pub list_lengths: Vec<usize>,

    #[arg(short, long, value_delimiter = ',', default_values_t = vec![0, 10, 50, 100])]
    pub tolerances: Vec<i64>,

    #[arg(short, long, default_value_t = 1000)]
    pub max_iterations: usize,

    #[arg(long, value_enum, default_value_t = NeighborhoodArg::Adjacent)]
    pub neighborhood: NeighborhoodArg,
}

fn main() {
    let args: App = App::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    debug!("{args:?}");

    if let Err(err) = match args.command {
        Commands::Schedule(schedule) => commands::schedule(schedule),
        Commands::Sweep(sweep) => commands::sweep(sweep),
        Commands::Graph {
            instance_file,
            output,
        } => commands::graph(instance_file, output),
    } {
        error!("An error occurred: {err:#}");
        std::process::exit(1);
    }
}
