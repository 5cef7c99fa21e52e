use std::{fmt::Display, fs, path::Path, str::FromStr};

use chumsky::{prelude::*, Parser};
use structs::Instance;
use thiserror::Error;

pub mod structs;

#[derive(Debug, Error)]
pub enum InstanceParseError {
    #[error("ParseError occurred: {}", format_errors(.0))]
    Syntax(Vec<Simple<char>>),
    #[error("invalid JSON instance: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not read instance file: {0}")]
    Io(#[from] std::io::Error),
    #[error("instance declares {declared} jobs but lists {actual} processing times")]
    JobCountMismatch { declared: usize, actual: usize },
}

fn format_errors(errors: &[Simple<char>]) -> String {
    errors
        .iter()
        .map(|error| format!("{error} at {:?}", error.span()))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse an instance written in the text format.
pub fn parse_instance(content: &str) -> Result<Instance, InstanceParseError> {
    let instance = instance_parser()
        .parse(content)
        .map_err(InstanceParseError::Syntax)?;

    check_job_count(instance)
}

/// Parse an instance serialized as JSON.
pub fn parse_instance_json(content: &str) -> Result<Instance, InstanceParseError> {
    let instance: Instance = serde_json::from_str(content)?;

    check_job_count(instance)
}

/// Load an instance from disk, picking the format by file extension.
///
/// `.json` files are read with serde, everything else with the text parser.
pub fn load_instance(path: &Path) -> Result<Instance, InstanceParseError> {
    let contents = fs::read_to_string(path)?;

    match path.extension().and_then(|extension| extension.to_str()) {
        Some("json") => parse_instance_json(&contents),
        _ => parse_instance(&contents),
    }
}

fn check_job_count(instance: Instance) -> Result<Instance, InstanceParseError> {
    if instance.jobs != instance.processing_times.len() {
        return Err(InstanceParseError::JobCountMismatch {
            declared: instance.jobs,
            actual: instance.processing_times.len(),
        });
    }

    Ok(instance)
}

pub(crate) fn number<T>() -> impl Parser<char, T, Error = Simple<char>> + Clone
where
    T: FromStr,
    T::Err: Display,
{
    just('-')
        .or_not()
        .chain::<char, _, _>(text::int(10))
        .collect::<String>()
        .try_map(|digits, span| {
            digits
                .parse::<T>()
                .map_err(|err| Simple::custom(span, format!("{digits}: {err}")))
        })
        .labelled("number")
}

pub(crate) fn number_list<T>() -> impl Parser<char, Vec<T>, Error = Simple<char>> + Clone
where
    T: FromStr,
    T::Err: Display,
{
    number::<T>().padded().repeated()
}

pub(crate) fn precedence_parser() -> impl Parser<char, (usize, usize), Error = Simple<char>> + Clone
{
    number::<usize>()
        .padded()
        .then_ignore(just(','))
        .then(number::<usize>().padded())
        .delimited_by(just('('), just(')'))
        .labelled("precedence")
}

fn field<O, P>(label: &'static str, value: P) -> impl Parser<char, O, Error = Simple<char>> + Clone
where
    P: Parser<char, O, Error = Simple<char>> + Clone,
{
    just(label)
        .padded()
        .then_ignore(just(':'))
        .ignore_then(value)
        .labelled(label)
}

pub(crate) fn instance_parser() -> impl Parser<char, Instance, Error = Simple<char>> {
    let jobs = field("jobs", number::<usize>().padded());
    let processing_times = field("processing times", number_list::<u32>());
    let due_dates = field("due dates", number_list::<i64>());
    let weights = field("weights", number_list::<u32>());
    let precedences = field("precedences", precedence_parser().padded().repeated());
    let initial_schedule = field("initial schedule", number_list::<usize>());

    jobs.then(processing_times)
        .then(due_dates)
        .then(weights.or_not())
        .then(precedences.or_not())
        .then(initial_schedule.or_not())
        .padded()
        .then_ignore(end())
        .map(
            |(((((jobs, processing_times), due_dates), weights), precedences), initial_schedule)| {
                Instance {
                    jobs,
                    processing_times,
                    due_dates,
                    weights,
                    precedences: precedences.unwrap_or_default(),
                    initial_schedule,
                }
            },
        )
}

#[cfg(test)]
mod tests {
    use chumsky::Parser;

    use std::fs;

    use crate::{load_instance, parse_instance, parse_instance_json, InstanceParseError};

    static TEST_FILE: &str = include_str!("../../instances/coursework.txt");
    static TEST_JSON: &str = include_str!("../../instances/tardy_pair.json");

    #[test]
    fn number_parsing() {
        assert_eq!(crate::number::<i64>().parse("-17").ok(), Some(-17));
        assert_eq!(crate::number::<u32>().parse("42").ok(), Some(42));
        assert!(crate::number::<u32>().parse("-3").is_err());
        assert!(crate::number::<u32>().parse("99999999999").is_err());
    }

    #[test]
    fn precedence_parsing() {
        let parsed = crate::precedence_parser().parse("( 3 ,12)");
        assert_eq!(parsed.ok(), Some((3, 12)));
    }

    #[test]
    fn parse_coursework_instance() {
        let instance = parse_instance(TEST_FILE).unwrap();

        assert_eq!(instance.jobs, 31);
        assert_eq!(instance.processing_times.len(), 31);
        assert_eq!(instance.due_dates[0], 172);
        assert_eq!(instance.due_dates[30], 269);
        assert_eq!(instance.weights, None);
        assert_eq!(instance.precedences.len(), 37);
        assert_eq!(instance.precedences[0], (0, 30));
        assert_eq!(instance.precedences[36], (29, 28));

        let initial_schedule = instance.initial_schedule.unwrap();
        assert_eq!(initial_schedule.len(), 31);
        assert_eq!(initial_schedule[0], 29);
        assert_eq!(initial_schedule[30], 30);
    }

    #[test]
    fn optional_sections_and_negative_due_dates() {
        let content = "jobs: 2\nprocessing times: 1 4\ndue dates: -3 10\nweights: 2 1\n";

        let instance = parse_instance(content).unwrap();

        assert_eq!(instance.due_dates, vec![-3, 10]);
        assert_eq!(instance.weights, Some(vec![2, 1]));
        assert!(instance.precedences.is_empty());
        assert_eq!(instance.initial_schedule, None);
    }

    #[test]
    fn display_round_trips_through_parser() {
        let instance = parse_instance(TEST_FILE).unwrap();

        let rendered = instance.to_string();

        assert_eq!(parse_instance(&rendered).unwrap(), instance);
    }

    #[test]
    fn parse_json_instance() {
        let instance = parse_instance_json(TEST_JSON).unwrap();

        assert_eq!(instance.jobs, 4);
        assert_eq!(instance.due_dates, vec![2, 4, 100, 100]);
        assert_eq!(instance.initial_schedule, Some(vec![2, 3, 0, 1]));
    }

    #[test]
    fn load_picks_reader_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("tardy_pair.json");
        let text_path = dir.path().join("tardy_pair.txt");
        fs::write(&json_path, TEST_JSON).unwrap();
        fs::write(&text_path, parse_instance_json(TEST_JSON).unwrap().to_string()).unwrap();

        let from_json = load_instance(&json_path).unwrap();
        let from_text = load_instance(&text_path).unwrap();

        assert_eq!(from_json, from_text);
        assert_eq!(from_json.initial_schedule, Some(vec![2, 3, 0, 1]));

        // JSON content behind a non-JSON extension goes to the text parser
        let misnamed = dir.path().join("tardy_pair.dat");
        fs::write(&misnamed, TEST_JSON).unwrap();
        assert!(matches!(
            load_instance(&misnamed),
            Err(InstanceParseError::Syntax(_))
        ));

        assert!(matches!(
            load_instance(&dir.path().join("missing.json")),
            Err(InstanceParseError::Io(_))
        ));
    }

    #[test]
    fn job_count_mismatch() {
        let content = "jobs: 3\nprocessing times: 1 4\ndue dates: 3 10\n";

        let output = parse_instance(content);

        assert!(matches!(
            output,
            Err(InstanceParseError::JobCountMismatch {
                declared: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn garbage_parsing_fail() {
        let content = "asd";

        let output = parse_instance(content);

        assert!(matches!(output, Err(InstanceParseError::Syntax(_))));
    }
}
