//! Per-kind step counts over a finished trace, and a table renderer for them.

use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};

use crate::solver::trace::{StepKind, Trace};

/// How much of each kind of work a solve did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceSummary {
    pub arcs_examined: usize,
    pub domains_revised: usize,
    pub variables_selected: usize,
    pub values_ordered: usize,
    pub values_tried: usize,
    pub assignments: usize,
    pub backtracks: usize,
    pub failures: usize,
}

impl TraceSummary {
    pub fn of(trace: &Trace) -> Self {
        let mut summary = Self::default();
        for step in trace.steps() {
            match step.kind {
                StepKind::ArcExamined { .. } => summary.arcs_examined += 1,
                StepKind::DomainRevised { .. } => summary.domains_revised += 1,
                StepKind::VariableSelected { .. } => summary.variables_selected += 1,
                StepKind::ValuesOrdered { .. } => summary.values_ordered += 1,
                StepKind::ValueTried { .. } => summary.values_tried += 1,
                StepKind::Assigned { .. } => summary.assignments += 1,
                StepKind::Unassigned { .. } => summary.backtracks += 1,
                StepKind::Failure { .. } => summary.failures += 1,
                StepKind::SolutionFound => {}
            }
        }
        summary
    }
}

pub fn render_summary_table(trace: &Trace) -> String {
    let summary = TraceSummary::of(trace);
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Event"), Cell::new("Count")]));

    let rows = [
        ("Arcs examined", summary.arcs_examined),
        ("Domains revised", summary.domains_revised),
        ("Variables selected", summary.variables_selected),
        ("Value orderings", summary.values_ordered),
        ("Values tried", summary.values_tried),
        ("Assignments", summary.assignments),
        ("Backtracks", summary.backtracks),
        ("Failures", summary.failures),
        ("Total steps", trace.step_count()),
    ];
    for (label, count) in rows {
        table.add_row(Row::new(vec![
            Cell::new(label),
            Cell::new(&count.to_string()),
        ]));
    }

    table.to_string()
}
