/// Objective values (tardiness sums and maxima) are exact integers.
pub type Cost = i64;

/// A job to be sequenced on the single machine.
///
/// Jobs are immutable once the graph is built. Completion times live with the
/// schedule that produced them, never on the job itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    /// Position in the instance arrays, which is also the job identity.
    pub index: usize,
    pub processing_time: u32,
    pub due_date: i64,
    pub weight: u32,
}

impl Job {
    pub fn new(index: usize, processing_time: u32, due_date: i64, weight: u32) -> Self {
        Self {
            index,
            processing_time,
            due_date,
            weight,
        }
    }

    pub fn tardiness(&self, completion_time: i64) -> Cost {
        (completion_time - self.due_date).max(0)
    }

    pub fn weighted_tardiness(&self, completion_time: i64) -> Cost {
        Cost::from(self.weight) * self.tardiness(completion_time)
    }
}

#[cfg(test)]
mod tests {
    use super::Job;

    #[test]
    fn early_and_on_time_jobs_are_not_tardy() {
        let job = Job::new(0, 3, 10, 4);

        assert_eq!(job.tardiness(7), 0);
        assert_eq!(job.tardiness(10), 0);
        assert_eq!(job.weighted_tardiness(10), 0);
    }

    #[test]
    fn late_jobs_scale_with_weight() {
        let job = Job::new(2, 3, -2, 4);

        assert_eq!(job.tardiness(5), 7);
        assert_eq!(job.weighted_tardiness(5), 28);
    }
}
