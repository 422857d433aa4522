//! The constraint graph: binary "different value" arcs between every pair of
//! variables sharing a row, column, or block.

use crate::{board::SudokuBoard, solver::domain::VariableId};

/// A directed arc `(Xi, Xj)`, read as "Xi's value must differ from Xj's".
///
/// Arcs are symmetric in meaning but directional in the propagation queue:
/// both directions exist for every neighbouring pair.
pub type Arc = (VariableId, VariableId);

/// Derived once from the puzzle model and never changed during solving.
///
/// Neighbour lists are sorted ascending and `arcs()` is ordered row-major by
/// `Xi` then `Xj`; that ordering is what makes repeated runs on the same
/// puzzle produce identical traces.
#[derive(Debug, Clone)]
pub struct ConstraintGraph {
    neighbors: Vec<Vec<VariableId>>,
    arcs: Vec<Arc>,
}

impl ConstraintGraph {
    pub fn build(board: &SudokuBoard) -> Self {
        let variables = board.variables();
        let neighbors: Vec<Vec<VariableId>> = variables
            .iter()
            .enumerate()
            .map(|(xi, a)| {
                variables
                    .iter()
                    .enumerate()
                    .filter(|&(xj, b)| {
                        xi != xj && (a.row == b.row || a.col == b.col || a.block == b.block)
                    })
                    .map(|(xj, _)| xj)
                    .collect()
            })
            .collect();

        let arcs = neighbors
            .iter()
            .enumerate()
            .flat_map(|(xi, ns)| ns.iter().map(move |&xj| (xi, xj)))
            .collect();

        Self { neighbors, arcs }
    }

    pub fn variable_count(&self) -> usize {
        self.neighbors.len()
    }

    /// The variables sharing a row, column, or block with `variable`, in
    /// ascending order.
    pub fn neighbors(&self, variable: VariableId) -> &[VariableId] {
        &self.neighbors[variable]
    }

    /// Every directed arc, ordered row-major by `Xi` then `Xj`.
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }
}
