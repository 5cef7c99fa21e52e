use anyhow::Result;
use instance_parser::load_instance;
use log::info;
use tardiness::{
    schedulers::tabu::{sweep as tabu_sweep, TabuConfig},
    PrecedenceGraph,
};

use crate::Sweep;

pub fn sweep(sweep: Sweep) -> Result<()> {
    if sweep.list_lengths.is_empty() || sweep.tolerances.is_empty() {
        anyhow::bail!("at least one list length and one tolerance are required")
    }

    let instance = load_instance(&sweep.path)?;
    let dag = PrecedenceGraph::from_instance(&instance)?;

    let configs: Vec<TabuConfig> = sweep
        .list_lengths
        .iter()
        .flat_map(|&list_length| {
            sweep.tolerances.iter().map(move |&tolerance| {
                TabuConfig::default()
                    .with_list_length(list_length)
                    .with_tolerance(tolerance)
                    .with_max_iterations(sweep.max_iterations)
                    .with_neighborhood(sweep.neighborhood.into())
            })
        })
        .collect();

    info!("sweeping {} configurations", configs.len());

    let outcomes = tabu_sweep(&dag, instance.initial_schedule.as_deref(), &configs);

    let mut lines =
        vec!["list_length,tolerance,max_iterations,total_tardiness,iterations".to_string()];
    for (config, outcome) in configs.iter().zip(outcomes) {
        let outcome = outcome?;
        lines.push(format!(
            "{},{},{},{},{}",
            config.list_length,
            config.tolerance,
            config.max_iterations,
            outcome.total_tardiness,
            outcome.iterations
        ));
    }

    std::fs::write(&sweep.output, lines.join("\n"))?;
    info!("Wrote sweep results to: {:?}", sweep.output);

    Ok(())
}
