//! Hook for following a scheduling run from the outside.
//!
//! Engines report progress as [`SearchEvent`]s. Whether anything listens has
//! no influence on the run itself.

use log::{debug, info, trace};

use crate::job::Cost;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// LCL placed one more job at the back of the schedule.
    Placed,
    /// Tabu search accepted an exchange.
    Moved,
    /// Tabu search improved on its best schedule.
    NewBest,
    /// Tabu search found no feasible, acceptable exchange and stops early.
    NoMove,
    /// The run is over, `schedule` and `cost` are the final result.
    Terminated,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchEvent<'a> {
    /// 1-based iteration (LCL step or tabu iteration) the event belongs to.
    pub iteration: usize,
    pub kind: EventKind,
    pub schedule: &'a [usize],
    pub cost: Cost,
}

impl SearchEvent<'_> {
    /// Job placed by a [`EventKind::Placed`] event, the front of the partial schedule.
    pub fn placed_job(&self) -> Option<usize> {
        match self.kind {
            EventKind::Placed => self.schedule.first().copied(),
            _ => None,
        }
    }
}

pub trait SearchObserver {
    fn on_event(&mut self, event: &SearchEvent<'_>);
}

impl<F> SearchObserver for F
where
    F: FnMut(&SearchEvent<'_>),
{
    fn on_event(&mut self, event: &SearchEvent<'_>) {
        self(event)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_event(&mut self, _event: &SearchEvent<'_>) {}
}

/// Renders events through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl SearchObserver for LogObserver {
    fn on_event(&mut self, event: &SearchEvent<'_>) {
        let SearchEvent {
            iteration,
            kind,
            schedule,
            cost,
        } = *event;

        match kind {
            EventKind::Placed => {
                if let Some(job) = event.placed_job() {
                    debug!("iteration {iteration}: placed job {job} with tardiness {cost}");
                }
                trace!("intermediate schedule: {schedule:?}");
            }
            EventKind::Moved => {
                trace!("iteration {iteration}: moved to {schedule:?} with cost {cost}")
            }
            EventKind::NewBest => {
                debug!(
                    "iteration {iteration}: new best tardiness {cost} with schedule {schedule:?}"
                )
            }
            EventKind::NoMove => info!("iteration {iteration}: no interchange found, terminating"),
            EventKind::Terminated => {
                info!("finished after {iteration} iterations: {schedule:?} with cost {cost}")
            }
        }
    }
}
