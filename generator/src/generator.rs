use instance_parser::structs::Instance;
use rand::{rngs::StdRng, Rng, SeedableRng};

pub(crate) struct GeneratorOptions {
    pub jobs: usize,
    pub seed: u64,
    pub edge_probability: f64,
    pub weighted: bool,
}

/// Generates a random instance. Precedences only run from a lower to a higher
/// job index, so the result is always acyclic.
pub(crate) fn generate_instance(options: &GeneratorOptions) -> Instance {
    let mut rng = StdRng::seed_from_u64(options.seed);

    let processing_times: Vec<u32> = (0..options.jobs).map(|_| rng.gen_range(1..=20)).collect();
    let total: i64 = processing_times.iter().map(|&p| i64::from(p)).sum();

    // Due dates fall somewhere in the first three quarters of the horizon
    let due_dates = processing_times
        .iter()
        .map(|&p| rng.gen_range(i64::from(p)..=(total * 3 / 4).max(i64::from(p))))
        .collect();

    let weights = options
        .weighted
        .then(|| (0..options.jobs).map(|_| rng.gen_range(1..=5)).collect());

    let mut precedences = vec![];
    for predecessor in 0..options.jobs {
        for successor in (predecessor + 1)..options.jobs {
            if rng.gen_bool(options.edge_probability) {
                precedences.push((predecessor, successor));
            }
        }
    }

    Instance {
        jobs: options.jobs,
        processing_times,
        due_dates,
        weights,
        precedences,
        initial_schedule: None,
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_instance, GeneratorOptions};

    fn options(seed: u64) -> GeneratorOptions {
        GeneratorOptions {
            jobs: 12,
            seed,
            edge_probability: 0.3,
            weighted: true,
        }
    }

    #[test]
    fn same_seed_same_instance() {
        assert_eq!(generate_instance(&options(7)), generate_instance(&options(7)));
    }

    #[test]
    fn generated_instances_are_well_formed() {
        let instance = generate_instance(&options(42));

        assert_eq!(instance.processing_times.len(), 12);
        assert_eq!(instance.due_dates.len(), 12);
        assert_eq!(instance.weights.as_ref().map(Vec::len), Some(12));
        assert!(instance.processing_times.iter().all(|&p| p > 0));
        assert!(instance
            .precedences
            .iter()
            .all(|&(predecessor, successor)| predecessor < successor));
    }

    #[test]
    fn zero_probability_has_no_precedences() {
        let instance = generate_instance(&GeneratorOptions {
            edge_probability: 0.0,
            ..options(1)
        });

        assert!(instance.precedences.is_empty());
    }
}
