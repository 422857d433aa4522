use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use sudoku_csp::{
    board::SudokuBoard,
    solver::{
        ac3::run_ac3,
        backtracking::run_backtracking,
        domain::Value,
        options::{Inference, SearchOptions, TieBreak, ValueOrdering, VariableSelection},
        stats::render_summary_table,
        trace::TerminalStatus,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// Arc-consistency propagation only.
    Ac3,
    /// Depth-first backtracking search.
    Backtracking,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Row-major puzzle digits, '0' for an empty cell. Omit for an empty
    /// board of `--size`.
    puzzle: Option<String>,

    #[arg(long, default_value_t = 9)]
    size: usize,

    #[arg(long, value_enum, default_value_t = Algorithm::Backtracking)]
    algorithm: Algorithm,

    /// Select the variable with the fewest remaining values.
    #[arg(long)]
    mrv: bool,

    /// Break MRV ties by the number of unassigned neighbours.
    #[arg(long)]
    degree: bool,

    /// Try the least constraining value first.
    #[arg(long)]
    lcv: bool,

    /// Prune assigned values from neighbour domains.
    #[arg(long)]
    forward_checking: bool,

    /// Emit the full trace as JSON instead of the summary.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn search_options(&self) -> SearchOptions {
        SearchOptions {
            variable_selection: if self.mrv {
                VariableSelection::Mrv
            } else {
                VariableSelection::Default
            },
            tie_break: if self.degree {
                TieBreak::Degree
            } else {
                TieBreak::None
            },
            value_ordering: if self.lcv {
                ValueOrdering::Lcv
            } else {
                ValueOrdering::Default
            },
            inference: self.forward_checking.then_some(Inference::ForwardChecking),
        }
    }
}

fn print_grid(board: &SudokuBoard, digits: &[Value]) {
    let n = board.size();
    let b = board.block_size();
    let separator = vec!["- ".repeat(b).trim_end().to_string(); b].join(" + ");
    for r in 0..n {
        if r % b == 0 && r != 0 {
            println!("{separator}");
        }
        for c in 0..n {
            if c % b == 0 && c != 0 {
                print!("| ");
            }
            print!("{} ", digits[r * n + c]);
        }
        println!();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let board = match &args.puzzle {
        Some(text) => SudokuBoard::parse(text)?,
        None => SudokuBoard::new(args.size)?,
    };

    let trace = match args.algorithm {
        Algorithm::Ac3 => run_ac3(&board),
        Algorithm::Backtracking => run_backtracking(&board, args.search_options()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
        return Ok(());
    }

    match trace.status() {
        TerminalStatus::Solved => println!("Solved in {} steps.", trace.step_count()),
        TerminalStatus::Partial => println!(
            "Propagation finished after {} steps with open domains remaining.",
            trace.step_count()
        ),
        TerminalStatus::Failed => println!("No solution exists ({} steps).", trace.step_count()),
    }
    if let Some(digits) = trace.solution_digits() {
        println!();
        print_grid(&board, &digits);
    }
    println!();
    println!("{}", render_summary_table(&trace));
    Ok(())
}
