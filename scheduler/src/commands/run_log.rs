use std::{fs, path::Path};

use anyhow::Result;
use tardiness::observer::{EventKind, LogObserver, SearchEvent, SearchObserver};

/// Collects a human-readable trace of one engine run while still forwarding
/// every event to the logger.
#[derive(Debug, Default)]
pub struct RunLog {
    lines: Vec<String>,
}

impl RunLog {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn write_all(path: &Path, logs: &[RunLog]) -> Result<()> {
        let contents: Vec<&str> = logs
            .iter()
            .flat_map(|log| {
                log.lines
                    .iter()
                    .map(String::as_str)
                    .chain(std::iter::once(""))
            })
            .collect();

        fs::write(path, contents.join("\n"))?;

        Ok(())
    }
}

impl SearchObserver for RunLog {
    fn on_event(&mut self, event: &SearchEvent<'_>) {
        LogObserver.on_event(event);

        let SearchEvent {
            iteration,
            kind,
            schedule,
            cost,
        } = *event;

        let line = match kind {
            EventKind::Placed => match event.placed_job() {
                Some(job) => format!(
                    "Iteration {iteration}: Job {job} with tardiness {cost}\n\
                     Intermediate schedule: {schedule:?}"
                ),
                None => return,
            },
            EventKind::Moved => return,
            EventKind::NewBest => format!(
                "Iteration {iteration}: New best tardiness: {cost} with schedule: {schedule:?}"
            ),
            EventKind::NoMove => {
                format!("Iteration {iteration}: No interchange found, terminating")
            }
            EventKind::Terminated => format!("Final schedule: {schedule:?}\nObjective: {cost}"),
        };

        self.lines.push(line);
    }
}
