pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors surfaced to the caller before any solving starts.
///
/// A puzzle that merely has no solution is not an error: the engines report
/// that through the terminal status of an otherwise complete
/// [`Trace`](crate::solver::trace::Trace).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The puzzle text is malformed: wrong length, a non-digit character, or
    /// a digit out of range for the board size.
    #[error("invalid puzzle: {reason}")]
    InvalidPuzzle { reason: String },

    /// Two given cells sharing a row, column, or block hold the same value.
    #[error(
        "inconsistent puzzle: cells ({row_a},{col_a}) and ({row_b},{col_b}) \
         share a unit and both hold {value}"
    )]
    InconsistentPuzzle {
        row_a: usize,
        col_a: usize,
        row_b: usize,
        col_b: usize,
        value: u8,
    },
}
