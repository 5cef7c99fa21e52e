use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    #[error("expected {expected} {field}, got {actual}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("precedence ({predecessor}, {successor}) references a job outside 0..{jobs}")]
    PrecedenceOutOfRange {
        predecessor: usize,
        successor: usize,
        jobs: usize,
    },
    #[error("job {job} has a processing time of zero")]
    ZeroProcessingTime { job: usize },
    #[error("job {job} has a weight of zero")]
    ZeroWeight { job: usize },
    #[error("at most {max} jobs are supported, got {actual}")]
    TooManyJobs { max: usize, actual: usize },
    #[error("schedule is not a permutation of jobs 0..{jobs}")]
    NotAPermutation { jobs: usize },
    #[error("schedule places job {successor} before its predecessor {predecessor}")]
    PrecedenceViolated { predecessor: usize, successor: usize },
    #[error("tardiness of job {job} can exceed the supported cost range")]
    CostOutOfRange { job: usize },
    #[error("invalid {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
    #[error("precedences are cyclic, only {placed} of {jobs} jobs could be ordered")]
    CyclicGraph { placed: usize, jobs: usize },
}

impl SchedulingError {
    /// Whether the error stems from malformed input rather than from the
    /// precedence structure itself.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, SchedulingError::CyclicGraph { .. })
    }
}

pub type Result<T, E = SchedulingError> = std::result::Result<T, E>;
