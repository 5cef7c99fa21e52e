pub mod fifo_tabu_list;

pub use fifo_tabu_list::FifoTabuList;

/// Unordered pair of job indices, stored smaller index first.
///
/// Keys name the two jobs that were exchanged, not their positions, so the
/// same exchange is recognised wherever it happens in the schedule.
pub type SwapKey = (usize, usize);

pub fn swap_key(job_a: usize, job_b: usize) -> SwapKey {
    (job_a.min(job_b), job_a.max(job_b))
}

pub trait TabuList {
    /// Check if exchanging the two jobs is currently forbidden.
    fn contains(&self, key: SwapKey) -> bool;
    /// Forbid the exchange, evicting the oldest entry once the list is full.
    fn push(&mut self, key: SwapKey);
    /// Number of forbidden exchanges currently held.
    fn len(&self) -> usize;
    /// Maximum number of forbidden exchanges held at once.
    fn capacity(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
