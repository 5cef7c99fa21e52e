//! Least Cost Last: backward greedy construction.
//!
//! The schedule is filled from the last position towards the first. At every
//! step the job that would be least tardy when finishing at the current
//! completion-time cursor is placed, chosen among the jobs whose successors are
//! all placed already. With the unweighted criterion this minimises the
//! maximum tardiness.

use std::collections::BTreeSet;

use log::{debug, info};

use crate::{
    dag::PrecedenceGraph,
    error::{Result, SchedulingError},
    job::{Cost, Job},
    observer::{EventKind, NoopObserver, SearchEvent, SearchObserver},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LclCriterion {
    /// Compare plain tardiness, `max(0, C - d)`.
    #[default]
    Unweighted,
    /// Compare `weight * max(0, C - d)`. Heuristic only, no minimax guarantee.
    Weighted,
}

impl LclCriterion {
    fn cost(self, job: &Job, completion_time: i64) -> Cost {
        match self {
            LclCriterion::Unweighted => job.tardiness(completion_time),
            LclCriterion::Weighted => job.weighted_tardiness(completion_time),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LclConfig {
    pub criterion: LclCriterion,
}

impl LclConfig {
    pub fn with_criterion(mut self, criterion: LclCriterion) -> Self {
        self.criterion = criterion;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LclOutcome {
    pub schedule: Vec<usize>,
    /// Largest per-step minimum, measured with the configured criterion.
    pub max_tardiness: Cost,
    /// Indexed by job.
    pub completion_times: Vec<i64>,
    pub total_weighted_tardiness: Cost,
}

pub fn run_lcl(dag: &PrecedenceGraph) -> Result<LclOutcome> {
    lcl_with(dag, &LclConfig::default(), &mut NoopObserver)
}

/// Run LCL, reporting every placement to `observer`.
///
/// Fails with [`SchedulingError::CyclicGraph`] if some jobs can never become
/// available because of a precedence cycle.
pub fn lcl_with<O>(
    dag: &PrecedenceGraph,
    config: &LclConfig,
    observer: &mut O,
) -> Result<LclOutcome>
where
    O: SearchObserver + ?Sized,
{
    let number_of_jobs = dag.num_jobs();

    // Unplaced successors per job
    let mut successors: Vec<usize> = (0..number_of_jobs).map(|job| dag.out_degree(job)).collect();

    // Jobs whose successors are all placed, ordered so ties go to the lowest index
    let mut available: BTreeSet<usize> = (0..number_of_jobs)
        .filter(|&job| successors[job] == 0)
        .collect();

    let mut schedule = vec![usize::MAX; number_of_jobs];
    let mut completion_times = vec![0; number_of_jobs];
    let mut completion_time = dag.total_processing_time();
    let mut max_tardiness = 0;
    let mut next_position = number_of_jobs;

    while let Some((next_job, min_tardiness)) =
        find_next_job(dag, &available, completion_time, config.criterion)
    {
        next_position -= 1;
        schedule[next_position] = next_job;
        completion_times[next_job] = completion_time;
        completion_time -= i64::from(dag.job(next_job).processing_time);
        max_tardiness = max_tardiness.max(min_tardiness);

        available.remove(&next_job);
        for predecessor in dag.predecessors(next_job) {
            successors[predecessor] -= 1;
            if successors[predecessor] == 0 {
                available.insert(predecessor);
            }
        }

        observer.on_event(&SearchEvent {
            iteration: number_of_jobs - next_position,
            kind: EventKind::Placed,
            schedule: &schedule[next_position..],
            cost: min_tardiness,
        });
    }

    if next_position != 0 {
        return Err(SchedulingError::CyclicGraph {
            placed: number_of_jobs - next_position,
            jobs: number_of_jobs,
        });
    }

    assert!(
        dag.respects_precedences(&schedule),
        "LCL schedule {schedule:?} violates a precedence"
    );

    let total_weighted_tardiness = dag.total_weighted_tardiness(&schedule);
    info!("LCL schedule: {schedule:?}");
    info!("LCL maximum tardiness: {max_tardiness}");

    observer.on_event(&SearchEvent {
        iteration: number_of_jobs,
        kind: EventKind::Terminated,
        schedule: &schedule,
        cost: max_tardiness,
    });

    Ok(LclOutcome {
        schedule,
        max_tardiness,
        completion_times,
        total_weighted_tardiness,
    })
}

/// Available job with the smallest cost when finishing at `completion_time`.
fn find_next_job(
    dag: &PrecedenceGraph,
    available: &BTreeSet<usize>,
    completion_time: i64,
    criterion: LclCriterion,
) -> Option<(usize, Cost)> {
    let mut next: Option<(usize, Cost)> = None;

    for &job_index in available {
        let tardiness = criterion.cost(dag.job(job_index), completion_time);
        if next.map_or(true, |(_, min_tardiness)| tardiness < min_tardiness) {
            next = Some((job_index, tardiness));
        }
    }

    if let Some((job_index, tardiness)) = next {
        debug!(
            "placing job {job_index} to complete at {completion_time} with tardiness {tardiness}"
        );
    }

    next
}
