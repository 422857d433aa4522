//! Arc-consistency propagation (AC-3) over the constraint graph, recording
//! every arc examination and domain revision as trace steps.

use tracing::debug;

use crate::{
    board::SudokuBoard,
    solver::{
        domain::{Assignment, DomainSet, Value, VariableId},
        graph::ConstraintGraph,
        trace::{StepKind, TerminalStatus, Trace, TraceRecorder},
        work_list::WorkList,
    },
};

/// Runs AC-3 on the puzzle and returns the trace of the propagation.
///
/// Arc consistency alone does not guarantee a full solution: the trace ends
/// `Solved` only when every domain is a singleton, `Partial` when some
/// domains still hold alternatives, and `Failed` when a domain emptied.
pub fn run_ac3(board: &SudokuBoard) -> Trace {
    let graph = ConstraintGraph::build(board);
    let mut domains = board.initial_domains();
    Ac3::new(&graph).run(&mut domains)
}

/// The propagation loop, reusable over any starting domain set.
pub(crate) struct Ac3<'a> {
    graph: &'a ConstraintGraph,
}

impl<'a> Ac3<'a> {
    pub(crate) fn new(graph: &'a ConstraintGraph) -> Self {
        Self { graph }
    }

    pub(crate) fn run(&self, domains: &mut DomainSet) -> Trace {
        // AC-3 never assigns; steps carry an empty assignment snapshot.
        let assignment = Assignment::new();
        let mut recorder = TraceRecorder::new();
        let mut queue = WorkList::new();
        for &arc in self.graph.arcs() {
            queue.push_back(arc);
        }
        debug!(arcs = queue.len(), "starting propagation");

        while let Some((xi, xj)) = queue.pop_front() {
            recorder.record(
                StepKind::ArcExamined {
                    arc: (xi, xj),
                    queue: queue.snapshot(),
                },
                domains,
                &assignment,
            );
            if !revise(domains, xi, xj) {
                continue;
            }
            recorder.record(
                StepKind::DomainRevised {
                    variable: xi,
                    domain: domains.get(xi).clone(),
                },
                domains,
                &assignment,
            );
            if domains.get(xi).is_empty() {
                debug!(variable = xi, "domain wiped out");
                recorder.record(StepKind::Failure { variable: Some(xi) }, domains, &assignment);
                return recorder.seal(TerminalStatus::Failed);
            }
            for &xk in self.graph.neighbors(xi) {
                if xk != xj {
                    queue.push_back((xk, xi));
                }
            }
        }

        let status = if domains.all_singletons() {
            TerminalStatus::Solved
        } else {
            TerminalStatus::Partial
        };
        debug!(?status, steps = recorder.len(), "propagation finished");
        recorder.seal(status)
    }
}

/// Removes every value of `dom(Xi)` that has no supporting value in
/// `dom(Xj)`; values are tested in ascending order. Returns whether the
/// domain changed.
fn revise(domains: &mut DomainSet, xi: VariableId, xj: VariableId) -> bool {
    let candidates: Vec<Value> = domains.get(xi).iter().copied().collect();
    let mut revised = false;
    for v in candidates {
        let supported = domains.get(xj).iter().any(|&w| w != v);
        if !supported {
            domains.remove(xi, v);
            revised = true;
        }
    }
    revised
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn revised_count(trace: &Trace) -> usize {
        trace
            .steps()
            .iter()
            .filter(|step| matches!(step.kind, StepKind::DomainRevised { .. }))
            .count()
    }

    #[test]
    fn empty_4x4_board_stays_partial_with_nothing_to_prune() {
        let _ = tracing_subscriber::fmt::try_init();
        let board = SudokuBoard::new(4).unwrap();
        let trace = run_ac3(&board);

        assert_eq!(trace.status(), TerminalStatus::Partial);
        assert_eq!(revised_count(&trace), 0);
        // One ArcExamined per arc, nothing requeued.
        assert_eq!(trace.step_count(), 112);
        let last = trace.step_at(trace.step_count() - 1).unwrap();
        assert!(last.domains.iter().all(|domain| domain.len() == 4));
    }

    #[test]
    fn fully_given_board_is_solved_without_revisions() {
        let _ = tracing_subscriber::fmt::try_init();
        let board = SudokuBoard::parse(
            "534678912672195348198342567859761423426853791713924856961537284287419635345286179",
        )
        .unwrap();
        let trace = run_ac3(&board);

        assert_eq!(trace.status(), TerminalStatus::Solved);
        assert_eq!(revised_count(&trace), 0);
        assert_eq!(trace.step_count(), 1620);
        assert_eq!(trace.solution_digits(), Some(board.to_digits()));
    }

    #[test]
    fn single_blank_cell_is_filled_in() {
        let _ = tracing_subscriber::fmt::try_init();
        let board = SudokuBoard::parse(
            "034678912672195348198342567859761423426853791713924856961537284287419635345286179",
        )
        .unwrap();
        let trace = run_ac3(&board);

        assert_eq!(trace.status(), TerminalStatus::Solved);
        let digits = trace.solution_digits().unwrap();
        assert_eq!(digits[0], 5);
    }

    #[test]
    fn doomed_board_fails_with_the_emptied_variable_on_record() {
        let _ = tracing_subscriber::fmt::try_init();
        // Cell (1,0) is blocked by its row givens {1,2} and column givens
        // {3,4}, but no two givens conflict directly.
        let board = SudokuBoard::parse("0034001230004000").unwrap();
        let trace = run_ac3(&board);

        assert_eq!(trace.status(), TerminalStatus::Failed);
        let last = trace.step_at(trace.step_count() - 1).unwrap();
        assert!(matches!(
            last.kind,
            StepKind::Failure { variable: Some(_) }
        ));
    }

    #[test]
    fn givens_keep_their_singleton_domains() {
        let _ = tracing_subscriber::fmt::try_init();
        let board = SudokuBoard::parse(
            "530070000600195000098000060800060003400803001700020006060000280000419005000080079",
        )
        .unwrap();
        let trace = run_ac3(&board);

        assert_ne!(trace.status(), TerminalStatus::Failed);
        assert!(revised_count(&trace) > 0);
        // Givens keep their singleton domains throughout.
        let last = trace.step_at(trace.step_count() - 1).unwrap();
        for (v, digit) in board.to_digits().iter().enumerate() {
            if *digit != 0 {
                assert_eq!(last.domains.singleton(v), Some(*digit));
            }
        }
    }

    #[test]
    fn rerunning_on_arc_consistent_domains_revises_nothing() {
        let _ = tracing_subscriber::fmt::try_init();
        let board = SudokuBoard::parse(
            "530070000600195000098000060800060003400803001700020006060000280000419005000080079",
        )
        .unwrap();
        let graph = ConstraintGraph::build(&board);
        let mut domains = board.initial_domains();

        let first = Ac3::new(&graph).run(&mut domains);
        assert!(revised_count(&first) > 0);

        let second = Ac3::new(&graph).run(&mut domains);
        assert_eq!(revised_count(&second), 0);
    }

    #[test]
    fn repeated_runs_produce_identical_traces() {
        let _ = tracing_subscriber::fmt::try_init();
        let board = SudokuBoard::parse(
            "530070000600195000098000060800060003400803001700020006060000280000419005000080079",
        )
        .unwrap();
        let a = run_ac3(&board);
        let b = run_ac3(&board);
        assert_eq!(a, b);
    }
}
