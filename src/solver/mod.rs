//! The two solving engines and everything they share: domains, the constraint
//! graph, heuristic options, and the trace they both record into.

pub mod ac3;
pub mod backtracking;
pub mod domain;
pub mod graph;
pub mod options;
pub mod stats;
pub mod trace;
pub mod work_list;
