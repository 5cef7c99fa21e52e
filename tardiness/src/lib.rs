#![forbid(unsafe_code)]
//! Single-machine scheduling with precedence constraints, minimising
//! (weighted) tardiness.
//!
//! Build a [`dag::PrecedenceGraph`] once, then hand it to either engine:
//! [`schedulers::lcl`] for the backward Least Cost Last construction or
//! [`schedulers::tabu`] for tabu search improvement of a feasible order.

pub mod dag;
pub mod error;
pub mod job;
pub mod observer;
pub mod schedulers;
pub mod tabu_list;

pub use dag::PrecedenceGraph;
pub use error::{Result, SchedulingError};
pub use job::{Cost, Job};
