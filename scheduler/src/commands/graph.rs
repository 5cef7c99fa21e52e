use anyhow::Result;
use instance_parser::load_instance;
use log::{debug, info, trace};
use std::{borrow::Cow, path::PathBuf};
use tardiness::{Job, PrecedenceGraph};

pub fn graph(input_path: PathBuf, output_path: PathBuf) -> Result<()> {
    let instance = load_instance(&input_path)?;
    trace!("parsed instance: {instance:#?}");

    let dag = PrecedenceGraph::from_instance(&instance)?;

    let name = input_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    debug!("Creating graph for instance: {name}");

    let edges = Edges(graph_id(&name), dag.jobs().to_vec(), dag.precedences().to_vec());

    let mut output_file = std::fs::File::create(&output_path)?;
    dot::render(&edges, &mut output_file)?;

    info!("Wrote graphviz dot file to: {:?}", output_path);

    Ok(())
}

/// Turns a file stem into a valid dot identifier.
fn graph_id(name: &str) -> String {
    let id: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    match id.chars().next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => id,
        _ => format!("G{id}"),
    }
}

type Nd = usize;
type Ed = (usize, usize);
struct Edges(String, Vec<Job>, Vec<Ed>);

impl<'a> dot::Labeller<'a, Nd, Ed> for Edges {
    fn graph_id(&'a self) -> dot::Id<'a> {
        dot::Id::new(self.0.clone()).expect("Failed to get graph id")
    }

    fn node_id(&'a self, n: &Nd) -> dot::Id<'a> {
        let id = format!("N{}", *n);
        dot::Id::new(id).expect("Failed to label graph node")
    }

    fn node_label(&'a self, n: &Nd) -> dot::LabelText<'a> {
        let job = &self.1[*n];
        dot::LabelText::label(format!(
            "{} (p={}, d={})",
            job.index, job.processing_time, job.due_date
        ))
    }
}

impl<'a> dot::GraphWalk<'a, Nd, Ed> for Edges {
    fn nodes(&self) -> dot::Nodes<'a, Nd> {
        // Jobs without precedences still show up as isolated nodes
        Cow::Owned((0..self.1.len()).collect())
    }

    fn edges(&'a self) -> dot::Edges<'a, Ed> {
        Cow::Borrowed(&self.2[..])
    }

    fn source(&self, e: &Ed) -> Nd {
        e.0
    }

    fn target(&self, e: &Ed) -> Nd {
        e.1
    }
}
