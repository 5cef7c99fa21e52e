use hashbrown::HashSet;
use instance_parser::structs::Instance;
use log::{debug, trace};
use petgraph::matrix_graph::{DiMatrix, NodeIndex};
use petgraph::Direction;

use crate::error::{Result, SchedulingError};
use crate::job::{Cost, Job};

mod topological;

// Dense adjacency matrix: O(1) direct-edge lookup, u16 node indices.
type Graph = DiMatrix<usize, ()>;
type NodeId = NodeIndex;

/// Jobs plus the precedence relation between them.
///
/// Built once, then shared read-only by every scheduling engine.
pub struct PrecedenceGraph {
    jobs: Vec<Job>,
    precedences: Vec<(usize, usize)>,
    graph: Graph,
}

impl PrecedenceGraph {
    pub const MAX_JOBS: usize = u16::MAX as usize;

    /// Build the graph from parallel job arrays and `(predecessor, successor)` pairs.
    ///
    /// Missing weights default to 1. Duplicate precedence pairs are collapsed.
    /// Cycles are not detected here, see [`PrecedenceGraph::generate_initial_schedule`].
    pub fn build(
        processing_times: &[u32],
        due_dates: &[i64],
        weights: Option<&[u32]>,
        precedences: &[(usize, usize)],
    ) -> Result<Self> {
        let number_of_jobs = processing_times.len();

        if number_of_jobs > Self::MAX_JOBS {
            return Err(SchedulingError::TooManyJobs {
                max: Self::MAX_JOBS,
                actual: number_of_jobs,
            });
        }
        if due_dates.len() != number_of_jobs {
            return Err(SchedulingError::LengthMismatch {
                field: "due dates",
                expected: number_of_jobs,
                actual: due_dates.len(),
            });
        }
        if let Some(weights) = weights {
            if weights.len() != number_of_jobs {
                return Err(SchedulingError::LengthMismatch {
                    field: "weights",
                    expected: number_of_jobs,
                    actual: weights.len(),
                });
            }
        }

        let mut jobs = Vec::with_capacity(number_of_jobs);
        for (index, (&processing_time, &due_date)) in
            processing_times.iter().zip(due_dates).enumerate()
        {
            let weight = weights.map(|weights| weights[index]).unwrap_or(1);

            if processing_time == 0 {
                return Err(SchedulingError::ZeroProcessingTime { job: index });
            }
            if weight == 0 {
                return Err(SchedulingError::ZeroWeight { job: index });
            }

            jobs.push(Job::new(index, processing_time, due_date, weight));
        }

        check_cost_range(&jobs)?;

        let mut graph = Graph::with_capacity(number_of_jobs);
        for job in &jobs {
            graph.add_node(job.index);
        }

        let mut seen = HashSet::new();
        let mut unique_precedences = Vec::with_capacity(precedences.len());
        for &(predecessor, successor) in precedences {
            if predecessor >= number_of_jobs || successor >= number_of_jobs {
                return Err(SchedulingError::PrecedenceOutOfRange {
                    predecessor,
                    successor,
                    jobs: number_of_jobs,
                });
            }

            if seen.insert((predecessor, successor)) {
                graph.update_edge(node(predecessor), node(successor), ());
                unique_precedences.push((predecessor, successor));
            } else {
                trace!("ignoring duplicate precedence ({predecessor}, {successor})");
            }
        }

        debug!(
            "built precedence graph with {} jobs and {} precedences",
            jobs.len(),
            unique_precedences.len()
        );

        Ok(Self {
            jobs,
            precedences: unique_precedences,
            graph,
        })
    }

    pub fn from_instance(instance: &Instance) -> Result<Self> {
        Self::build(
            &instance.processing_times,
            &instance.due_dates,
            instance.weights.as_deref(),
            &instance.precedences,
        )
    }

    pub fn num_jobs(&self) -> usize {
        self.jobs.len()
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn job(&self, index: usize) -> &Job {
        &self.jobs[index]
    }

    /// Deduplicated `(predecessor, successor)` pairs in input order.
    pub fn precedences(&self) -> &[(usize, usize)] {
        &self.precedences
    }

    /// Whether `predecessor` must directly precede `successor`. Transitive
    /// precedences are not reported.
    pub fn has_direct_edge(&self, predecessor: usize, successor: usize) -> bool {
        predecessor < self.num_jobs()
            && successor < self.num_jobs()
            && self.graph.has_edge(node(predecessor), node(successor))
    }

    /// Direct successors in ascending index order.
    pub fn successors(&self, job: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors_directed(node(job), Direction::Outgoing)
            .map(|node| node.index())
    }

    /// Direct predecessors in ascending index order.
    pub fn predecessors(&self, job: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors_directed(node(job), Direction::Incoming)
            .map(|node| node.index())
    }

    pub fn in_degree(&self, job: usize) -> usize {
        self.predecessors(job).count()
    }

    pub fn out_degree(&self, job: usize) -> usize {
        self.successors(job).count()
    }

    pub fn total_processing_time(&self) -> i64 {
        self.jobs
            .iter()
            .fold(0, |acc, job| acc + i64::from(job.processing_time))
    }

    /// Completion time of every job, indexed by job, when processed in `schedule` order.
    pub fn completion_times(&self, schedule: &[usize]) -> Vec<i64> {
        let mut completion_times = vec![0; self.num_jobs()];
        let mut completion_time = 0;

        for &job_index in schedule {
            completion_time += i64::from(self.jobs[job_index].processing_time);
            completion_times[job_index] = completion_time;
        }

        completion_times
    }

    /// Sum of `weight * max(0, completion - due)` over the schedule.
    pub fn total_weighted_tardiness(&self, schedule: &[usize]) -> Cost {
        let mut completion_time = 0;
        let mut tardiness = 0;

        for job in schedule.iter().map(|&job_index| &self.jobs[job_index]) {
            completion_time += i64::from(job.processing_time);
            tardiness += job.weighted_tardiness(completion_time);
        }

        tardiness
    }

    /// Position of every job in `schedule`, indexed by job.
    pub fn positions(&self, schedule: &[usize]) -> Vec<usize> {
        let mut positions = vec![usize::MAX; self.num_jobs()];
        for (position, &job_index) in schedule.iter().enumerate() {
            positions[job_index] = position;
        }
        positions
    }

    /// Strict check: every predecessor sits at a smaller position than its successor.
    ///
    /// `schedule` is assumed to be a permutation of all jobs.
    pub fn respects_precedences(&self, schedule: &[usize]) -> bool {
        let positions = self.positions(schedule);

        self.precedences
            .iter()
            .all(|&(predecessor, successor)| positions[predecessor] < positions[successor])
    }

    /// Checks that `schedule` is a permutation of all jobs that respects every precedence.
    pub fn validate_schedule(&self, schedule: &[usize]) -> Result<()> {
        let number_of_jobs = self.num_jobs();
        let not_a_permutation = SchedulingError::NotAPermutation {
            jobs: number_of_jobs,
        };

        if schedule.len() != number_of_jobs {
            return Err(not_a_permutation);
        }

        let mut seen = vec![false; number_of_jobs];
        for &job_index in schedule {
            match seen.get_mut(job_index) {
                Some(seen) if !*seen => *seen = true,
                _ => return Err(not_a_permutation),
            }
        }

        let positions = self.positions(schedule);
        if let Some(&(predecessor, successor)) = self
            .precedences
            .iter()
            .find(|&&(predecessor, successor)| positions[predecessor] >= positions[successor])
        {
            return Err(SchedulingError::PrecedenceViolated {
                predecessor,
                successor,
            });
        }

        Ok(())
    }
}

/// Rejects jobs whose weighted tardiness, summed over all jobs, could leave the
/// `Cost` range. No completion time exceeds the total processing time.
fn check_cost_range(jobs: &[Job]) -> Result<()> {
    let horizon: i64 = jobs.iter().map(|job| i64::from(job.processing_time)).sum();

    let mut worst_case: Cost = 0;
    for job in jobs {
        worst_case = horizon
            .checked_sub(job.due_date)
            .map(|lateness| lateness.max(0))
            .and_then(|lateness| lateness.checked_mul(Cost::from(job.weight)))
            .and_then(|tardiness| worst_case.checked_add(tardiness))
            .ok_or(SchedulingError::CostOutOfRange { job: job.index })?;
    }

    Ok(())
}

fn node(job: usize) -> NodeId {
    NodeId::new(job)
}
