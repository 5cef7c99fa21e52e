//! First-improvement tabu search over pairwise exchanges.
//!
//! Every iteration probes the candidate exchanges in a rotated order, starting
//! right after the previously accepted one, and takes the first exchange that
//! keeps the precedences and is acceptable:
//!
//! * not tabu and not worse than the current cost by `tolerance` or more, or
//! * better than the best cost found so far (aspiration), tabu or not.
//!
//! The search stops after `max_iterations` iterations or as soon as no
//! candidate is both feasible and acceptable.

use log::{debug, info, trace};
use rayon::prelude::*;

use crate::{
    dag::PrecedenceGraph,
    error::{Result, SchedulingError},
    job::Cost,
    observer::{EventKind, NoopObserver, SearchEvent, SearchObserver},
    tabu_list::{swap_key, FifoTabuList, TabuList},
};

/// Which position pairs may be exchanged.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Neighborhood {
    /// Positions `i` and `i + 1` only, `n - 1` candidates.
    #[default]
    Adjacent,
    /// Every pair `i < j`, `n * (n - 1) / 2` candidates.
    AllPairs,
}

impl Neighborhood {
    fn candidates(self, number_of_jobs: usize) -> Vec<(usize, usize)> {
        match self {
            Neighborhood::Adjacent => (1..number_of_jobs).map(|j| (j - 1, j)).collect(),
            Neighborhood::AllPairs => (0..number_of_jobs)
                .flat_map(|i| (i + 1..number_of_jobs).map(move |j| (i, j)))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabuConfig {
    /// Maximum number of forbidden exchanges remembered.
    pub list_length: usize,
    pub max_iterations: usize,
    /// Non-tabu moves must not worsen the current cost by this much or more.
    pub tolerance: Cost,
    pub neighborhood: Neighborhood,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            list_length: 20,
            max_iterations: 1000,
            tolerance: 10,
            neighborhood: Neighborhood::Adjacent,
        }
    }
}

impl TabuConfig {
    pub fn with_list_length(mut self, list_length: usize) -> Self {
        self.list_length = list_length;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: Cost) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.list_length == 0 {
            return Err(SchedulingError::InvalidParameter {
                name: "list length",
                reason: "must be positive",
            });
        }
        if self.max_iterations == 0 {
            return Err(SchedulingError::InvalidParameter {
                name: "max iterations",
                reason: "must be positive",
            });
        }
        if self.tolerance < 0 {
            return Err(SchedulingError::InvalidParameter {
                name: "tolerance",
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    MaxIterations,
    /// No feasible and acceptable exchange was left.
    NoMove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabuOutcome {
    pub schedule: Vec<usize>,
    pub total_tardiness: Cost,
    /// Indexed by job.
    pub completion_times: Vec<i64>,
    pub iterations: usize,
    pub termination: Termination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved { new_best: bool },
    NoMove,
}

pub struct TabuSearch<'a, L: TabuList = FifoTabuList> {
    dag: &'a PrecedenceGraph,
    config: TabuConfig,
    tabu_list: L,
    candidates: Vec<(usize, usize)>,
    current_schedule: Vec<usize>,
    current_cost: Cost,
    best_schedule: Vec<usize>,
    best_cost: Cost,
    /// Candidate index of the last accepted exchange, rotation starts after it.
    previous_interchange: Option<usize>,
    iteration: usize,
}

impl<'a> TabuSearch<'a, FifoTabuList> {
    pub fn new(
        dag: &'a PrecedenceGraph,
        initial_schedule: Vec<usize>,
        config: TabuConfig,
    ) -> Result<Self> {
        let tabu_list = FifoTabuList::new(config.list_length);
        Self::with_tabu_list(dag, initial_schedule, config, tabu_list)
    }
}

impl<'a, L: TabuList> TabuSearch<'a, L> {
    /// Start from a pre-filled tabu list, e.g. one carried over from an earlier run.
    ///
    /// The list's capacity must equal `config.list_length`.
    pub fn with_tabu_list(
        dag: &'a PrecedenceGraph,
        initial_schedule: Vec<usize>,
        config: TabuConfig,
        tabu_list: L,
    ) -> Result<Self> {
        config.validate()?;
        if tabu_list.capacity() != config.list_length {
            return Err(SchedulingError::InvalidParameter {
                name: "tabu list",
                reason: "capacity differs from the configured list length",
            });
        }
        dag.validate_schedule(&initial_schedule)?;

        let current_cost = dag.total_weighted_tardiness(&initial_schedule);
        let candidates = config.neighborhood.candidates(dag.num_jobs());

        info!("tabu search initialized with schedule: {initial_schedule:?}, cost {current_cost}");
        info!("options: {config:?}");

        Ok(Self {
            dag,
            config,
            tabu_list,
            candidates,
            best_schedule: initial_schedule.clone(),
            best_cost: current_cost,
            current_schedule: initial_schedule,
            current_cost,
            previous_interchange: None,
            iteration: 0,
        })
    }

    pub fn current_schedule(&self) -> &[usize] {
        &self.current_schedule
    }

    pub fn current_cost(&self) -> Cost {
        self.current_cost
    }

    pub fn best_schedule(&self) -> &[usize] {
        &self.best_schedule
    }

    pub fn best_cost(&self) -> Cost {
        self.best_cost
    }

    pub fn tabu_list(&self) -> &L {
        &self.tabu_list
    }

    /// Iterations performed so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Candidate position pairs in the order the next iteration probes them.
    pub fn rotated_candidates(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let count = self.candidates.len();
        let start = self.previous_interchange.map_or(0, |previous| previous + 1);

        (0..count).map(move |offset| self.candidates[(start + offset) % count])
    }

    /// Perform one iteration.
    ///
    /// # Panics
    ///
    /// If the current schedule violates a precedence, which would mean an
    /// infeasible exchange slipped through.
    pub fn step<O>(&mut self, observer: &mut O) -> StepOutcome
    where
        O: SearchObserver + ?Sized,
    {
        assert!(
            self.dag.respects_precedences(&self.current_schedule),
            "ran into invalid schedule pre-swap: {:?}",
            self.current_schedule
        );

        self.iteration += 1;
        let iteration = self.iteration;

        let positions = self.dag.positions(&self.current_schedule);
        let count = self.candidates.len();
        let start = self.previous_interchange.map_or(0, |previous| previous + 1);

        for offset in 0..count {
            let candidate = (start + offset) % count;
            let (i, j) = self.candidates[candidate];

            if !self.is_valid_swap(&positions, i, j) {
                continue;
            }

            self.current_schedule.swap(i, j);
            let new_cost = self.dag.total_weighted_tardiness(&self.current_schedule);
            let key = swap_key(self.current_schedule[i], self.current_schedule[j]);
            let is_tabu = self.tabu_list.contains(key);
            let aspiration = new_cost < self.best_cost;

            trace!(
                "swap {key:?} at ({i}, {j}): cost {new_cost}, tabu {is_tabu}, aspiration {aspiration}"
            );

            let acceptable = !is_tabu && self.current_cost - new_cost > -self.config.tolerance;
            if !(acceptable || aspiration) {
                self.current_schedule.swap(i, j);
                continue;
            }

            self.current_cost = new_cost;
            self.previous_interchange = Some(candidate);
            self.emit(observer, EventKind::Moved);

            let new_best = new_cost < self.best_cost;
            if new_best {
                self.best_cost = new_cost;
                self.best_schedule.clone_from(&self.current_schedule);
                debug!("iteration {iteration}: new best tardiness {new_cost}");
                self.emit(observer, EventKind::NewBest);
            }

            // A tabu move let through by aspiration is already listed
            if !aspiration || !self.tabu_list.contains(key) {
                self.tabu_list.push(key);
            }

            return StepOutcome::Moved { new_best };
        }

        debug!("iteration {iteration}: no interchange found, terminating");
        self.emit(observer, EventKind::NoMove);

        StepOutcome::NoMove
    }

    /// Iterate until `max_iterations` is reached or no move is left.
    pub fn run<O>(mut self, observer: &mut O) -> TabuOutcome
    where
        O: SearchObserver + ?Sized,
    {
        let mut termination = Termination::MaxIterations;

        while self.iteration < self.config.max_iterations {
            if self.step(observer) == StepOutcome::NoMove {
                termination = Termination::NoMove;
                break;
            }
        }

        info!("best schedule: {:?}", self.best_schedule);
        info!("best total tardiness: {}", self.best_cost);

        observer.on_event(&SearchEvent {
            iteration: self.iteration,
            kind: EventKind::Terminated,
            schedule: &self.best_schedule,
            cost: self.best_cost,
        });

        TabuOutcome {
            completion_times: self.dag.completion_times(&self.best_schedule),
            schedule: self.best_schedule,
            total_tardiness: self.best_cost,
            iterations: self.iteration,
            termination,
        }
    }

    /// Whether exchanging positions `i` and `j` keeps every precedence strict.
    ///
    /// Only the two exchanged jobs change position, so only precedences
    /// touching them are checked, against the post-swap positions.
    fn is_valid_swap(&self, positions: &[usize], i: usize, j: usize) -> bool {
        let job_a = self.current_schedule[i];
        let job_b = self.current_schedule[j];
        let position_after = |job: usize| {
            if job == job_a {
                j
            } else if job == job_b {
                i
            } else {
                positions[job]
            }
        };

        [job_a, job_b].into_iter().all(|job| {
            let position = position_after(job);

            self.dag
                .predecessors(job)
                .all(|predecessor| position_after(predecessor) < position)
                && self
                    .dag
                    .successors(job)
                    .all(|successor| position < position_after(successor))
        })
    }

    fn emit<O>(&self, observer: &mut O, kind: EventKind)
    where
        O: SearchObserver + ?Sized,
    {
        let (schedule, cost) = match kind {
            EventKind::NewBest => (&self.best_schedule, self.best_cost),
            _ => (&self.current_schedule, self.current_cost),
        };

        observer.on_event(&SearchEvent {
            iteration: self.iteration,
            kind,
            schedule,
            cost,
        });
    }
}

/// Run tabu search from `initial_schedule`, or from a topological order when
/// none is given.
pub fn run_tabu_search(
    dag: &PrecedenceGraph,
    initial_schedule: Option<&[usize]>,
    config: &TabuConfig,
) -> Result<TabuOutcome> {
    tabu_search_with(dag, initial_schedule, config, &mut NoopObserver)
}

pub fn tabu_search_with<O>(
    dag: &PrecedenceGraph,
    initial_schedule: Option<&[usize]>,
    config: &TabuConfig,
    observer: &mut O,
) -> Result<TabuOutcome>
where
    O: SearchObserver + ?Sized,
{
    let initial_schedule = match initial_schedule {
        Some(schedule) => schedule.to_vec(),
        None => dag.generate_initial_schedule()?,
    };

    Ok(TabuSearch::new(dag, initial_schedule, config.clone())?.run(observer))
}

/// Evaluate several configurations in parallel. Results keep the order of `configs`.
pub fn sweep(
    dag: &PrecedenceGraph,
    initial_schedule: Option<&[usize]>,
    configs: &[TabuConfig],
) -> Vec<Result<TabuOutcome>> {
    configs
        .par_iter()
        .map(|config| run_tabu_search(dag, initial_schedule, config))
        .collect()
}
