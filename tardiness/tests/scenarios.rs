use instance_parser::parse_instance;
use tardiness::{
    observer::{EventKind, SearchEvent},
    schedulers::{
        lcl::run_lcl,
        tabu::{run_tabu_search, tabu_search_with, sweep, TabuConfig, Termination},
    },
    PrecedenceGraph, SchedulingError,
};

static COURSEWORK: &str = include_str!("../../instances/coursework.txt");

fn coursework() -> (PrecedenceGraph, Vec<usize>) {
    let instance = parse_instance(COURSEWORK).unwrap();
    let dag = PrecedenceGraph::from_instance(&instance).unwrap();

    (dag, instance.initial_schedule.unwrap())
}

#[test]
fn tardy_jobs_are_moved_to_the_front() {
    let dag = PrecedenceGraph::build(&[2, 2, 2, 2], &[2, 4, 100, 100], None, &[]).unwrap();
    let config = TabuConfig::default()
        .with_list_length(5)
        .with_max_iterations(50)
        .with_tolerance(0);

    let outcome = run_tabu_search(&dag, Some(&[2, 3, 0, 1]), &config).unwrap();

    let position = |job| outcome.schedule.iter().position(|&j| j == job).unwrap();
    assert!(position(0) < position(2) && position(0) < position(3));
    assert!(position(1) < position(2) && position(1) < position(3));
    assert_eq!(outcome.total_tardiness, 0);
    assert_eq!(outcome.completion_times, vec![2, 4, 6, 8]);
}

#[test]
fn single_job_is_trivial_for_both_engines() {
    let dag = PrecedenceGraph::build(&[5], &[2], None, &[]).unwrap();

    let lcl = run_lcl(&dag).unwrap();
    assert_eq!(lcl.schedule, vec![0]);
    assert_eq!(lcl.max_tardiness, 3);

    let tabu = run_tabu_search(&dag, None, &TabuConfig::default()).unwrap();
    assert_eq!(tabu.schedule, vec![0]);
    assert_eq!(tabu.total_tardiness, 3);
    assert_eq!(tabu.termination, Termination::NoMove);
}

#[test]
fn cyclic_precedences_are_rejected() {
    let dag = PrecedenceGraph::build(&[1, 1], &[0, 0], None, &[(0, 1), (1, 0)]).unwrap();

    assert_eq!(
        dag.generate_initial_schedule(),
        Err(SchedulingError::CyclicGraph { placed: 0, jobs: 2 })
    );
    assert_eq!(
        run_tabu_search(&dag, None, &TabuConfig::default()),
        Err(SchedulingError::CyclicGraph { placed: 0, jobs: 2 })
    );
    assert!(run_lcl(&dag).is_err());
}

#[test]
fn coursework_lcl() {
    let (dag, _) = coursework();

    let outcome = run_lcl(&dag).unwrap();

    assert_eq!(
        outcome.schedule,
        vec![
            29, 3, 2, 22, 21, 20, 19, 18, 17, 9, 8, 7, 6, 5, 16, 15, 13, 28, 27, 26, 25, 24, 23,
            12, 11, 4, 1, 14, 10, 0, 30
        ]
    );
    assert_eq!(outcome.max_tardiness, 65);
    assert_eq!(outcome.total_weighted_tardiness, 165);

    // every placement happened at the job's final completion time
    let recomputed = dag
        .jobs()
        .iter()
        .map(|job| job.tardiness(outcome.completion_times[job.index]))
        .max();
    assert_eq!(recomputed, Some(outcome.max_tardiness));
    assert_eq!(outcome.completion_times, dag.completion_times(&outcome.schedule));
}

#[test]
fn coursework_tabu_search() {
    let (dag, initial_schedule) = coursework();
    assert_eq!(dag.total_weighted_tardiness(&initial_schedule), 341);

    let config = TabuConfig::default()
        .with_list_length(200)
        .with_max_iterations(100_000)
        .with_tolerance(100);
    let mut best_costs = vec![];

    let outcome = tabu_search_with(
        &dag,
        Some(&initial_schedule),
        &config,
        &mut |event: &SearchEvent<'_>| {
            if event.kind == EventKind::NewBest {
                best_costs.push(event.cost);
            }
        },
    )
    .unwrap();

    assert_eq!(outcome.total_tardiness, 184);
    assert_eq!(outcome.iterations, 109);
    assert_eq!(outcome.termination, Termination::NoMove);
    assert_eq!(dag.validate_schedule(&outcome.schedule), Ok(()));
    assert_eq!(
        dag.total_weighted_tardiness(&outcome.schedule),
        outcome.total_tardiness
    );
    assert!(best_costs.windows(2).all(|pair| pair[1] < pair[0]));
    assert_eq!(best_costs.last(), Some(&184));
}

#[test]
fn sweep_keeps_configuration_order() {
    let (dag, initial_schedule) = coursework();
    let configs = vec![
        TabuConfig::default(),
        TabuConfig::default()
            .with_list_length(200)
            .with_max_iterations(100_000)
            .with_tolerance(100),
        TabuConfig::default().with_list_length(0),
    ];

    let results = sweep(&dag, Some(&initial_schedule), &configs);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().total_tardiness, 196);
    assert_eq!(results[1].as_ref().unwrap().total_tardiness, 184);
    assert!(results[2].as_ref().unwrap_err().is_configuration());
}
