use std::fmt;

use serde::{Deserialize, Serialize};

/// A single-machine tardiness problem as read from an instance file.
///
/// Job identity is the position in the parallel arrays, starting at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub jobs: usize,
    pub processing_times: Vec<u32>,
    pub due_dates: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<u32>>,
    // (predecessor, successor)
    #[serde(default)]
    pub precedences: Vec<(usize, usize)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_schedule: Option<Vec<usize>>,
}

fn write_numbers<T: fmt::Display>(f: &mut fmt::Formatter<'_>, values: &[T]) -> fmt::Result {
    for value in values {
        write!(f, " {value}")?;
    }
    writeln!(f)
}

/// Renders the instance in the text format understood by [`crate::parse_instance`].
impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "jobs: {}", self.jobs)?;

        write!(f, "processing times:")?;
        write_numbers(f, &self.processing_times)?;

        write!(f, "due dates:")?;
        write_numbers(f, &self.due_dates)?;

        if let Some(weights) = &self.weights {
            write!(f, "weights:")?;
            write_numbers(f, weights)?;
        }

        write!(f, "precedences:")?;
        for (index, (predecessor, successor)) in self.precedences.iter().enumerate() {
            if index > 0 && index % 10 == 0 {
                writeln!(f)?;
            }
            write!(f, " ({predecessor}, {successor})")?;
        }
        writeln!(f)?;

        if let Some(initial_schedule) = &self.initial_schedule {
            write!(f, "initial schedule:")?;
            write_numbers(f, initial_schedule)?;
        }

        Ok(())
    }
}
