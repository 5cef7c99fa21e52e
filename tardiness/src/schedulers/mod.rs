//! The two scheduling engines. Both only read the [`crate::dag::PrecedenceGraph`],
//! so they can run side by side on the same instance.

pub mod lcl;
pub mod tabu;

pub use lcl::{lcl_with, run_lcl, LclConfig, LclCriterion, LclOutcome};
pub use tabu::{
    run_tabu_search, sweep, tabu_search_with, Neighborhood, StepOutcome, TabuConfig, TabuOutcome,
    TabuSearch, Termination,
};
