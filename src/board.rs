//! The puzzle model: board sizes, cell-to-variable mapping, row/column/block
//! grouping, and the fixed values given in the initial puzzle.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    solver::domain::{Assignment, DomainSet, Value, VariableId},
};

/// Board side lengths this crate understands.
pub const BOARD_SIZES: [usize; 2] = [4, 9];

/// The identity of one Sudoku cell, immutable for the lifetime of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable {
    pub row: usize,
    pub col: usize,
    /// Index of the `√N × √N` block the cell belongs to, row-major.
    pub block: usize,
    /// `true` if the cell's value was given in the initial puzzle.
    pub fixed: bool,
}

/// A validated Sudoku puzzle of side length 4 or 9.
///
/// Construction rejects malformed input ([`Error::InvalidPuzzle`]) and givens
/// that already violate a row/column/block constraint
/// ([`Error::InconsistentPuzzle`]), so the solver engines only ever see boards
/// worth solving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SudokuBoard {
    size: usize,
    block_size: usize,
    cells: Vec<Value>,
    variables: Vec<Variable>,
}

impl SudokuBoard {
    /// Creates an empty board of the given side length.
    pub fn new(size: usize) -> Result<Self> {
        Self::from_cells(size, &vec![0; size * size])
    }

    /// Parses a row-major puzzle string of `N²` digits, `'0'` meaning empty.
    /// The board size is inferred from the string length.
    pub fn parse(text: &str) -> Result<Self> {
        let size = match text.len() {
            16 => 4,
            81 => 9,
            n => {
                return Err(Error::InvalidPuzzle {
                    reason: format!("puzzle string must be 16 or 81 characters, got {n}"),
                })
            }
        };
        let mut cells = Vec::with_capacity(text.len());
        for (i, ch) in text.chars().enumerate() {
            let digit = ch.to_digit(10).ok_or_else(|| Error::InvalidPuzzle {
                reason: format!("character {ch:?} at position {i} is not a digit"),
            })? as Value;
            cells.push(digit);
        }
        Self::from_cells(size, &cells)
    }

    /// Builds a board from already-parsed digits, validating shape, digit
    /// range, and consistency of the givens.
    pub fn from_cells(size: usize, cells: &[Value]) -> Result<Self> {
        let block_size = match size {
            4 => 2,
            9 => 3,
            _ => {
                return Err(Error::InvalidPuzzle {
                    reason: format!("board size must be one of {BOARD_SIZES:?}, got {size}"),
                })
            }
        };
        if cells.len() != size * size {
            return Err(Error::InvalidPuzzle {
                reason: format!(
                    "a {size}x{size} board needs {} cells, got {}",
                    size * size,
                    cells.len()
                ),
            });
        }
        if let Some((i, &digit)) = cells
            .iter()
            .enumerate()
            .find(|(_, &digit)| digit as usize > size)
        {
            return Err(Error::InvalidPuzzle {
                reason: format!("digit {digit} at position {i} is out of range for a {size}x{size} board"),
            });
        }

        let variables = (0..size * size)
            .map(|i| {
                let row = i / size;
                let col = i % size;
                Variable {
                    row,
                    col,
                    block: (row / block_size) * block_size + col / block_size,
                    fixed: cells[i] != 0,
                }
            })
            .collect();

        let board = Self {
            size,
            block_size,
            cells: cells.to_vec(),
            variables,
        };
        board.check_givens()?;
        Ok(board)
    }

    /// Rejects boards whose givens already conflict. Cheap to do up front, and
    /// it keeps mid-propagation discovery of doomed puzzles out of the traces.
    fn check_givens(&self) -> Result<()> {
        for a in 0..self.variables.len() {
            if self.cells[a] == 0 {
                continue;
            }
            let va = self.variables[a];
            for b in (a + 1)..self.variables.len() {
                if self.cells[b] != self.cells[a] {
                    continue;
                }
                let vb = self.variables[b];
                if va.row == vb.row || va.col == vb.col || va.block == vb.block {
                    return Err(Error::InconsistentPuzzle {
                        row_a: va.row,
                        col_a: va.col,
                        row_b: vb.row,
                        col_b: vb.col,
                        value: self.cells[a],
                    });
                }
            }
        }
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable_id(&self, row: usize, col: usize) -> VariableId {
        row * self.size + col
    }

    /// The given value of a cell, or `None` if the cell is empty.
    pub fn cell(&self, row: usize, col: usize) -> Option<Value> {
        match self.cells[self.variable_id(row, col)] {
            0 => None,
            digit => Some(digit),
        }
    }

    /// The board as a row-major digit list, `0` meaning empty.
    pub fn to_digits(&self) -> Vec<Value> {
        self.cells.clone()
    }

    /// The initial domains: a singleton for each fixed cell, `1..=N` for each
    /// open cell.
    pub fn initial_domains(&self) -> DomainSet {
        let full: OrdSet<Value> = (1..=self.size as Value).collect();
        let domains = self
            .cells
            .iter()
            .map(|&digit| {
                if digit == 0 {
                    full.clone()
                } else {
                    OrdSet::unit(digit)
                }
            })
            .collect();
        DomainSet::new(domains)
    }

    /// The fixed cells as a ready-made partial assignment. Backtracking seeds
    /// its search with this, so givens are never re-derived by search steps.
    pub fn fixed_assignment(&self) -> Assignment {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &digit)| digit != 0)
            .map(|(i, &digit)| (i, digit))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_board_has_no_fixed_cells() {
        let board = SudokuBoard::new(9).unwrap();
        assert_eq!(board.size(), 9);
        assert_eq!(board.block_size(), 3);
        assert!(board.variables().iter().all(|v| !v.fixed));
        assert!(board.fixed_assignment().is_empty());
        assert!(board.initial_domains().iter().all(|d| d.len() == 9));
    }

    #[test]
    fn parse_infers_board_size_from_length() {
        let board = SudokuBoard::parse("1234341200000000").unwrap();
        assert_eq!(board.size(), 4);
        assert_eq!(board.cell(0, 0), Some(1));
        assert_eq!(board.cell(2, 0), None);
    }

    #[test]
    fn parse_rejects_bad_lengths() {
        let err = SudokuBoard::parse("123").unwrap_err();
        assert!(matches!(err, Error::InvalidPuzzle { .. }));
    }

    #[test]
    fn parse_rejects_non_digit_characters() {
        let err = SudokuBoard::parse("12343412000000x0").unwrap_err();
        assert!(matches!(err, Error::InvalidPuzzle { .. }));
    }

    #[test]
    fn parse_rejects_digits_beyond_board_size() {
        // '5' cannot appear on a 4x4 board.
        let err = SudokuBoard::parse("1234341250000000").unwrap_err();
        assert!(matches!(err, Error::InvalidPuzzle { .. }));
    }

    #[test]
    fn duplicate_givens_in_a_row_are_rejected() {
        let err = SudokuBoard::parse("1100000000000000").unwrap_err();
        assert_eq!(
            err,
            Error::InconsistentPuzzle {
                row_a: 0,
                col_a: 0,
                row_b: 0,
                col_b: 1,
                value: 1,
            }
        );
    }

    #[test]
    fn duplicate_givens_in_a_column_are_rejected() {
        let err = SudokuBoard::parse("2000000020000000").unwrap_err();
        assert!(matches!(err, Error::InconsistentPuzzle { value: 2, .. }));
    }

    #[test]
    fn duplicate_givens_on_a_9x9_board_are_rejected() {
        // Two 5s in the top row.
        let mut digits = "0".repeat(81);
        digits.replace_range(0..1, "5");
        digits.replace_range(6..7, "5");
        let err = SudokuBoard::parse(&digits).unwrap_err();
        assert!(matches!(err, Error::InconsistentPuzzle { value: 5, .. }));
    }

    #[test]
    fn block_indices_are_row_major() {
        let board = SudokuBoard::new(4).unwrap();
        let blocks: Vec<usize> = board.variables().iter().map(|v| v.block).collect();
        assert_eq!(
            blocks,
            vec![0, 0, 1, 1, 0, 0, 1, 1, 2, 2, 3, 3, 2, 2, 3, 3]
        );
    }

    #[test]
    fn fixed_cells_get_singleton_domains() {
        let board = SudokuBoard::parse("1234341200000000").unwrap();
        let domains = board.initial_domains();
        assert_eq!(domains.singleton(0), Some(1));
        assert_eq!(domains.singleton(7), Some(2));
        assert_eq!(domains.get(8).len(), 4);
        assert_eq!(board.fixed_assignment().len(), 8);
    }

    #[test]
    fn to_digits_round_trips() {
        let text = "1234341221434321";
        let board = SudokuBoard::parse(text).unwrap();
        let digits: String = board.to_digits().iter().map(|d| d.to_string()).collect();
        assert_eq!(digits, text);
    }
}
