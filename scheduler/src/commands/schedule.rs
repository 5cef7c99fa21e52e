use anyhow::Result;
use instance_parser::load_instance;
use log::{debug, info};
use tardiness::{
    schedulers::{
        lcl::{lcl_with, LclConfig, LclCriterion, LclOutcome},
        tabu::{tabu_search_with, TabuOutcome},
    },
    PrecedenceGraph, SchedulingError,
};

use super::run_log::RunLog;
use crate::{Engine, Schedule};

pub fn schedule(schedule: Schedule) -> Result<()> {
    let instance = load_instance(&schedule.path)?;
    debug!("parsed instance: {instance:?}");

    let dag = PrecedenceGraph::from_instance(&instance)?;
    let initial_schedule = instance.initial_schedule.as_deref();

    let lcl_config = LclConfig::default().with_criterion(if schedule.weighted_lcl {
        LclCriterion::Weighted
    } else {
        LclCriterion::Unweighted
    });
    let tabu_config = schedule.tabu_config();
    tabu_config.validate()?;

    let run_lcl = || -> (Result<LclOutcome, SchedulingError>, RunLog) {
        let mut run_log = RunLog::default();
        run_log.push(format!("LCL with {:?} criterion", lcl_config.criterion));
        let outcome = lcl_with(&dag, &lcl_config, &mut run_log);
        (outcome, run_log)
    };
    let run_tabu = || -> (Result<TabuOutcome, SchedulingError>, RunLog) {
        let mut run_log = RunLog::default();
        run_log.push(format!(
            "List Length: {}, Iterations: {}, Tolerance: {}, Neighborhood: {:?}",
            tabu_config.list_length,
            tabu_config.max_iterations,
            tabu_config.tolerance,
            tabu_config.neighborhood
        ));
        let outcome = tabu_search_with(&dag, initial_schedule, &tabu_config, &mut run_log);
        (outcome, run_log)
    };

    // The engines only read the graph, so both can run at once
    let (lcl, tabu) = match schedule.run {
        Engine::Lcl => (Some(run_lcl()), None),
        Engine::Tabu => (None, Some(run_tabu())),
        Engine::Both => {
            let (lcl, tabu) = rayon::join(run_lcl, run_tabu);
            (Some(lcl), Some(tabu))
        }
    };

    let mut run_logs = vec![];

    if let Some((outcome, run_log)) = lcl {
        let outcome = outcome?;
        println!("LCL schedule: {:?}", outcome.schedule);
        println!("LCL maximum tardiness: {}", outcome.max_tardiness);
        println!(
            "LCL total weighted tardiness: {}",
            outcome.total_weighted_tardiness
        );
        run_logs.push(run_log);
    }

    if let Some((outcome, run_log)) = tabu {
        let outcome = outcome?;
        println!("Tabu schedule: {:?}", outcome.schedule);
        println!("Tabu total tardiness: {}", outcome.total_tardiness);
        println!(
            "Tabu iterations: {} ({:?})",
            outcome.iterations, outcome.termination
        );
        run_logs.push(run_log);
    }

    if let Some(output) = &schedule.output {
        RunLog::write_all(output, &run_logs)?;
        info!("Wrote run log to: {:?}", output);
    }

    Ok(())
}
