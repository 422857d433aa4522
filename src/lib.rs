//! An observable Sudoku constraint-satisfaction engine.
//!
//! Two classic CSP algorithms, arc consistency (AC-3) and depth-first
//! backtracking search, solve 4×4 and 9×9 Sudoku puzzles while recording
//! every algorithmic event they perform. The output of a solve is not just a
//! grid but a [`Trace`]: an ordered sequence of steps, each carrying a full
//! snapshot of the domains and the partial assignment at that moment, so a
//! run can be replayed, inspected, or rendered step by step.
//!
//! # Core Concepts
//!
//! - **[`SudokuBoard`]**: a validated puzzle. Construction rejects malformed
//!   input and givens that already conflict, so the engines never fail.
//! - **[`run_ac3`]**: propagates arc consistency over the binary not-equal
//!   constraint graph. It may finish with domains still open; that is the
//!   `Partial` outcome, not an error.
//! - **[`run_backtracking`]**: depth-first search with optional heuristics
//!   (MRV, degree tie-break, LCV, forward checking) chosen via
//!   [`SearchOptions`].
//! - **[`Trace`]**: the sealed, serializable record of one run.
//!
//! # Example
//!
//! ```
//! use sudoku_csp::board::SudokuBoard;
//! use sudoku_csp::solver::backtracking::run_backtracking;
//! use sudoku_csp::solver::options::SearchOptions;
//! use sudoku_csp::solver::trace::TerminalStatus;
//!
//! let board = SudokuBoard::parse("1234341200000000")?;
//! let trace = run_backtracking(&board, SearchOptions::default());
//!
//! assert_eq!(trace.status(), TerminalStatus::Solved);
//! let digits = trace.solution_digits().unwrap();
//! assert_eq!(digits.len(), 16);
//! # Ok::<(), sudoku_csp::error::Error>(())
//! ```
//!
//! [`Trace`]: solver::trace::Trace
//! [`SudokuBoard`]: board::SudokuBoard
//! [`run_ac3`]: solver::ac3::run_ac3
//! [`run_backtracking`]: solver::backtracking::run_backtracking
//! [`SearchOptions`]: solver::options::SearchOptions

pub mod board;
pub mod error;
pub mod solver;
