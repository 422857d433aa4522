//! Depth-first backtracking search with pluggable heuristics, recording every
//! decision point so a run can be replayed step by step.

use std::cmp::Reverse;

use im::OrdSet;
use tracing::debug;

use crate::{
    board::SudokuBoard,
    solver::{
        domain::{Assignment, DomainSet, Value, VariableId},
        graph::ConstraintGraph,
        options::{Inference, SearchOptions, TieBreak, ValueOrdering, VariableSelection},
        trace::{StepKind, TerminalStatus, Trace, TraceRecorder},
    },
};

/// Runs backtracking search on the puzzle and returns the trace of the run.
///
/// Options are normalized first, so the caller can pass any combination and
/// get the implied heuristics (see [`SearchOptions::normalized`]).
pub fn run_backtracking(board: &SudokuBoard, options: SearchOptions) -> Trace {
    let graph = ConstraintGraph::build(board);
    let search = BacktrackingSearch {
        graph: &graph,
        options: options.normalized(),
    };
    search.run(board)
}

/// Domains and the partial assignment, mutated in place as the search moves
/// and rewound exactly on backtrack.
struct SearchState {
    domains: DomainSet,
    assignment: Assignment,
}

/// Domains saved before forward checking pruned them, so one failed branch can
/// be unwound precisely.
#[derive(Default)]
struct UndoFrame {
    saved: Vec<(VariableId, OrdSet<Value>)>,
}

impl UndoFrame {
    fn undo(self, domains: &mut DomainSet) {
        for (variable, domain) in self.saved.into_iter().rev() {
            domains.restore(variable, domain);
        }
    }
}

struct BacktrackingSearch<'a> {
    graph: &'a ConstraintGraph,
    options: SearchOptions,
}

impl<'a> BacktrackingSearch<'a> {
    fn run(&self, board: &SudokuBoard) -> Trace {
        let mut state = SearchState {
            domains: board.initial_domains(),
            assignment: board.fixed_assignment(),
        };
        let mut recorder = TraceRecorder::new();
        debug!(options = ?self.options, "starting search");

        if self.search(&mut state, &mut recorder) {
            debug!(steps = recorder.len(), "solution found");
            recorder.seal(TerminalStatus::Solved)
        } else {
            debug!(steps = recorder.len(), "search space exhausted");
            recorder.record(
                StepKind::Failure { variable: None },
                &state.domains,
                &state.assignment,
            );
            recorder.seal(TerminalStatus::Failed)
        }
    }

    fn search(&self, state: &mut SearchState, recorder: &mut TraceRecorder) -> bool {
        let Some(variable) = self.select_variable(state) else {
            recorder.record(StepKind::SolutionFound, &state.domains, &state.assignment);
            return true;
        };
        recorder.record(
            StepKind::VariableSelected { variable },
            &state.domains,
            &state.assignment,
        );

        let values = self.order_values(state, variable);
        recorder.record(
            StepKind::ValuesOrdered {
                variable,
                values: values.clone(),
            },
            &state.domains,
            &state.assignment,
        );

        for value in values {
            recorder.record(
                StepKind::ValueTried { variable, value },
                &state.domains,
                &state.assignment,
            );
            if !self.consistent(state, variable, value) {
                continue;
            }

            state.assignment.insert(variable, value);
            recorder.record(
                StepKind::Assigned { variable, value },
                &state.domains,
                &state.assignment,
            );

            let mut frame = UndoFrame::default();
            let viable = self.infer(state, variable, value, &mut frame, recorder);
            if viable && self.search(state, recorder) {
                return true;
            }

            frame.undo(&mut state.domains);
            state.assignment.remove(&variable);
            recorder.record(
                StepKind::Unassigned { variable, value },
                &state.domains,
                &state.assignment,
            );
        }
        false
    }

    /// Picks the next unassigned variable, or `None` when the assignment is
    /// complete. The fallback policy is first-in-row-major-order; MRV takes
    /// the smallest current domain, with variable id as the final tie-break
    /// so selection is deterministic.
    fn select_variable(&self, state: &SearchState) -> Option<VariableId> {
        let mut unassigned = (0..self.graph.variable_count())
            .filter(|v| !state.assignment.contains_key(v));
        match self.options.variable_selection {
            VariableSelection::Default => unassigned.next(),
            VariableSelection::Mrv => match self.options.tie_break {
                TieBreak::None => unassigned.min_by_key(|&v| (state.domains.get(v).len(), v)),
                TieBreak::Degree => unassigned.min_by_key(|&v| {
                    (
                        state.domains.get(v).len(),
                        Reverse(self.unassigned_degree(state, v)),
                        v,
                    )
                }),
            },
        }
    }

    fn unassigned_degree(&self, state: &SearchState, variable: VariableId) -> usize {
        self.graph
            .neighbors(variable)
            .iter()
            .filter(|&&n| !state.assignment.contains_key(&n))
            .count()
    }

    /// The candidate values for `variable`, ascending by default. LCV sorts
    /// stably by how many neighbour candidates each value would eliminate, so
    /// equally constraining values stay in ascending order.
    fn order_values(&self, state: &SearchState, variable: VariableId) -> Vec<Value> {
        let mut values: Vec<Value> = state.domains.get(variable).iter().copied().collect();
        if self.options.value_ordering == ValueOrdering::Lcv {
            values.sort_by_key(|&value| self.elimination_count(state, variable, value));
        }
        values
    }

    fn elimination_count(&self, state: &SearchState, variable: VariableId, value: Value) -> usize {
        self.graph
            .neighbors(variable)
            .iter()
            .copied()
            .filter(|&n| !state.assignment.contains_key(&n) && state.domains.contains(n, value))
            .count()
    }

    /// A candidate is consistent when no already-assigned neighbour holds it.
    fn consistent(&self, state: &SearchState, variable: VariableId, value: Value) -> bool {
        self.graph
            .neighbors(variable)
            .iter()
            .all(|n| state.assignment.get(n) != Some(&value))
    }

    /// Runs the configured inference after an assignment. Returns `false` if
    /// it proved the branch dead, in which case the pruning is recorded and
    /// the caller unwinds via `frame`.
    fn infer(
        &self,
        state: &mut SearchState,
        variable: VariableId,
        value: Value,
        frame: &mut UndoFrame,
        recorder: &mut TraceRecorder,
    ) -> bool {
        match self.options.effective_inference() {
            Inference::None => true,
            Inference::ForwardChecking => self.forward_check(state, variable, value, frame, recorder),
        }
    }

    /// Removes the assigned value from every unassigned neighbour's domain.
    /// Each pruned domain is saved in `frame` first; an emptied domain ends
    /// the branch immediately.
    fn forward_check(
        &self,
        state: &mut SearchState,
        variable: VariableId,
        value: Value,
        frame: &mut UndoFrame,
        recorder: &mut TraceRecorder,
    ) -> bool {
        for &n in self.graph.neighbors(variable) {
            if state.assignment.contains_key(&n) || !state.domains.contains(n, value) {
                continue;
            }
            frame.saved.push((n, state.domains.get(n).clone()));
            state.domains.remove(n, value);
            recorder.record(
                StepKind::DomainRevised {
                    variable: n,
                    domain: state.domains.get(n).clone(),
                },
                &state.domains,
                &state.assignment,
            );
            if state.domains.get(n).is_empty() {
                debug!(variable = n, "forward checking wiped out a domain");
                recorder.record(
                    StepKind::Failure { variable: Some(n) },
                    &state.domains,
                    &state.assignment,
                );
                return false;
            }
        }
        true
    }
}
