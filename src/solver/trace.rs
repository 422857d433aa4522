//! The replayable record of a solve: an append-only sequence of immutable
//! steps plus a terminal status, consumed read-only by a presentation layer.

use std::ops::Index;

use im::OrdSet;
use serde::{Deserialize, Serialize};

use crate::solver::{
    domain::{Assignment, DomainSet, Value, VariableId},
    graph::Arc,
};

/// What happened at one point of an engine's run, with the event payload
/// needed to render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepKind {
    /// Propagation popped `arc` off the queue; `queue` is what remains.
    ArcExamined { arc: Arc, queue: Vec<Arc> },
    /// A domain shrank; `domain` is its new contents.
    DomainRevised {
        variable: VariableId,
        domain: OrdSet<Value>,
    },
    /// Search picked the next variable to branch on.
    VariableSelected { variable: VariableId },
    /// Search fixed the order in which candidate values will be tried.
    ValuesOrdered {
        variable: VariableId,
        values: Vec<Value>,
    },
    /// A candidate value is under consideration.
    ValueTried { variable: VariableId, value: Value },
    /// The candidate was consistent and has been assigned.
    Assigned { variable: VariableId, value: Value },
    /// A dead end forced the assignment to be undone.
    Unassigned { variable: VariableId, value: Value },
    /// A domain emptied (`variable` set), or the root ran out of candidates.
    Failure { variable: Option<VariableId> },
    /// A complete consistent assignment was reached.
    SolutionFound,
}

/// One immutable record of engine progress.
///
/// Besides the event itself, every step carries full domain and assignment
/// snapshots, so any moment of the run can be rendered without replaying the
/// steps before it. The snapshots are persistent-structure clones and cost
/// almost nothing to take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    pub domains: DomainSet,
    pub assignment: Assignment,
}

/// How a solve ended. `Partial` is a legitimate outcome, not a failure: arc
/// consistency alone does not guarantee a full Sudoku solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalStatus {
    Solved,
    Partial,
    Failed,
}

/// Append-only log written by an engine while it runs.
///
/// Sealing consumes the recorder, so no step can be recorded after the trace
/// is handed out.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    steps: Vec<Step>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: StepKind, domains: &DomainSet, assignment: &Assignment) {
        self.steps.push(Step {
            kind,
            domains: domains.clone(),
            assignment: assignment.clone(),
        });
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn seal(self, status: TerminalStatus) -> Trace {
        Trace {
            steps: self.steps,
            status,
        }
    }
}

/// The complete ordered step sequence of one solve invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    steps: Vec<Step>,
    status: TerminalStatus,
}

impl Trace {
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Random access for playback, 0-indexed and stable.
    pub fn step_at(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn status(&self) -> TerminalStatus {
        self.status
    }

    /// For a solved trace, the final grid as row-major digits.
    ///
    /// Prefers the final assignment (complete after backtracking) and falls
    /// back to singleton domains (how AC-3 expresses a solution).
    pub fn solution_digits(&self) -> Option<Vec<Value>> {
        if self.status != TerminalStatus::Solved {
            return None;
        }
        let last = self.steps.last()?;
        let n = last.domains.variable_count();
        if last.assignment.len() == n {
            return Some(last.assignment.values().copied().collect());
        }
        (0..n).map(|v| last.domains.singleton(v)).collect()
    }
}

impl Index<usize> for Trace {
    type Output = Step;

    fn index(&self, index: usize) -> &Step {
        &self.steps[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use im::{ordmap, ordset};
    use pretty_assertions::assert_eq;

    fn tiny_domains() -> DomainSet {
        DomainSet::new(vec![ordset![1, 2], ordset![2]])
    }

    #[test]
    fn sealed_trace_preserves_order_and_status() {
        let domains = tiny_domains();
        let assignment = Assignment::new();
        let mut recorder = TraceRecorder::new();
        recorder.record(
            StepKind::ArcExamined {
                arc: (0, 1),
                queue: vec![(1, 0)],
            },
            &domains,
            &assignment,
        );
        recorder.record(
            StepKind::DomainRevised {
                variable: 0,
                domain: ordset![1],
            },
            &domains,
            &assignment,
        );

        let trace = recorder.seal(TerminalStatus::Partial);
        assert_eq!(trace.step_count(), 2);
        assert_eq!(trace.status(), TerminalStatus::Partial);
        assert!(matches!(trace[0].kind, StepKind::ArcExamined { .. }));
        assert!(matches!(
            trace.step_at(1).unwrap().kind,
            StepKind::DomainRevised { variable: 0, .. }
        ));
        assert_eq!(trace.step_at(2), None);
    }

    #[test]
    fn steps_snapshot_the_state_at_recording_time() {
        let mut domains = tiny_domains();
        let assignment = ordmap! {1_usize => 2_u8};
        let mut recorder = TraceRecorder::new();
        recorder.record(StepKind::SolutionFound, &domains, &assignment);

        // Mutating the live state afterwards must not affect the step.
        domains.remove(0, 1);
        let trace = recorder.seal(TerminalStatus::Solved);
        assert_eq!(trace[0].domains, tiny_domains());
        assert_eq!(trace[0].assignment, assignment);
    }

    #[test]
    fn solution_digits_come_from_a_complete_assignment() {
        let domains = tiny_domains();
        let assignment = ordmap! {0_usize => 1_u8, 1_usize => 2_u8};
        let mut recorder = TraceRecorder::new();
        recorder.record(StepKind::SolutionFound, &domains, &assignment);
        let trace = recorder.seal(TerminalStatus::Solved);
        assert_eq!(trace.solution_digits(), Some(vec![1, 2]));
    }

    #[test]
    fn solution_digits_fall_back_to_singleton_domains() {
        let domains = DomainSet::new(vec![ordset![1], ordset![2]]);
        let mut recorder = TraceRecorder::new();
        recorder.record(
            StepKind::ArcExamined {
                arc: (0, 1),
                queue: vec![],
            },
            &domains,
            &Assignment::new(),
        );
        let trace = recorder.seal(TerminalStatus::Solved);
        assert_eq!(trace.solution_digits(), Some(vec![1, 2]));
    }

    #[test]
    fn unsolved_traces_have_no_solution_digits() {
        let recorder = TraceRecorder::new();
        let trace = recorder.seal(TerminalStatus::Failed);
        assert_eq!(trace.solution_digits(), None);
    }

    #[test]
    fn traces_serialize_and_deserialize() {
        let domains = tiny_domains();
        let mut recorder = TraceRecorder::new();
        recorder.record(
            StepKind::ValueTried {
                variable: 0,
                value: 1,
            },
            &domains,
            &Assignment::new(),
        );
        let trace = recorder.seal(TerminalStatus::Solved);

        let json = serde_json::to_string(&trace).unwrap();
        let back: Trace = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trace);
    }
}
