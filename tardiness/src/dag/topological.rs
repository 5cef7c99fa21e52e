use std::collections::VecDeque;

use log::debug;

use super::PrecedenceGraph;
use crate::error::{Result, SchedulingError};

impl PrecedenceGraph {
    /// Any one order of all jobs consistent with the precedences (Kahn's algorithm).
    ///
    /// Zero in-degree jobs are queued in ascending index order, successors are
    /// released in ascending index order, so the result is deterministic.
    pub fn generate_initial_schedule(&self) -> Result<Vec<usize>> {
        let mut in_degree: Vec<usize> = (0..self.num_jobs())
            .map(|job| self.in_degree(job))
            .collect();

        // Start with jobs that have no predecessors
        let mut queue: VecDeque<usize> = (0..self.num_jobs())
            .filter(|&job| in_degree[job] == 0)
            .collect();

        let mut schedule = Vec::with_capacity(self.num_jobs());
        while let Some(current_job) = queue.pop_front() {
            schedule.push(current_job);

            for successor in self.successors(current_job) {
                in_degree[successor] -= 1;
                if in_degree[successor] == 0 {
                    queue.push_back(successor);
                }
            }
        }

        if schedule.len() != self.num_jobs() {
            return Err(SchedulingError::CyclicGraph {
                placed: schedule.len(),
                jobs: self.num_jobs(),
            });
        }

        assert!(
            self.respects_precedences(&schedule),
            "topological order {schedule:?} violates a precedence"
        );
        debug!("initial schedule: {schedule:?}");

        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use crate::{dag::PrecedenceGraph, error::SchedulingError};

    #[test]
    fn orders_jobs_after_their_predecessors() {
        let graph = PrecedenceGraph::build(
            &[1, 1, 1, 1, 1],
            &[0; 5],
            None,
            &[(3, 0), (0, 4), (2, 4), (1, 3)],
        )
        .unwrap();

        let schedule = graph.generate_initial_schedule().unwrap();

        // queue starts with 1, 2; 1 releases 3, 3 releases 0, 0 releases 4
        assert_eq!(schedule, vec![1, 2, 3, 0, 4]);
        assert_eq!(graph.validate_schedule(&schedule), Ok(()));
    }

    #[test]
    fn without_precedences_keeps_index_order() {
        let graph = PrecedenceGraph::build(&[5, 1, 2], &[0; 3], None, &[]).unwrap();

        assert_eq!(graph.generate_initial_schedule().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn two_cycle_is_rejected() {
        let graph = PrecedenceGraph::build(&[1, 1], &[0, 0], None, &[(0, 1), (1, 0)]).unwrap();

        let error = graph.generate_initial_schedule().unwrap_err();

        assert_eq!(error, SchedulingError::CyclicGraph { placed: 0, jobs: 2 });
        assert!(!error.is_configuration());
    }

    #[test]
    fn partial_cycle_is_rejected() {
        // 0 is free, 1 <-> 2 form a cycle behind it
        let graph = PrecedenceGraph::build(
            &[1, 1, 1],
            &[0; 3],
            None,
            &[(0, 1), (1, 2), (2, 1)],
        )
        .unwrap();

        assert_eq!(
            graph.generate_initial_schedule(),
            Err(SchedulingError::CyclicGraph { placed: 1, jobs: 3 })
        );
    }
}
