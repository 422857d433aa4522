//! Heuristic configuration for backtracking search.
//!
//! Each knob is a small closed enum picked once per solve; the search loop
//! itself carries no option-specific branching beyond dispatching on these.

use serde::{Deserialize, Serialize};

/// How SELECT-VARIABLE picks the next unassigned variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableSelection {
    /// First unassigned variable in row-major order.
    #[default]
    Default,
    /// Minimum remaining values: smallest current domain first.
    Mrv,
}

/// Tie-break applied between equally constrained MRV candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    #[default]
    None,
    /// Prefer the variable with the most unassigned neighbours.
    Degree,
}

/// How ORDER-VALUES sequences the candidate values of the chosen variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueOrdering {
    /// Ascending numeric order.
    #[default]
    Default,
    /// Least constraining value: fewest eliminations in neighbours first.
    Lcv,
}

/// Inference run after each assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Inference {
    #[default]
    None,
    /// Remove the assigned value from every unassigned neighbour's domain.
    ForwardChecking,
}

/// Configuration for one backtracking run.
///
/// `inference` is optional so that "the caller never said" can be told apart
/// from an explicit [`Inference::None`]; normalization resolves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchOptions {
    pub variable_selection: VariableSelection,
    pub tie_break: TieBreak,
    pub value_ordering: ValueOrdering,
    pub inference: Option<Inference>,
}

impl SearchOptions {
    /// Applies the implication rules once, before the run starts:
    /// the degree tie-break only makes sense under MRV, so it enables it; and
    /// MRV without bounded domains explores blindly, so it enables forward
    /// checking unless the caller explicitly chose an inference.
    pub fn normalized(self) -> Self {
        let mut options = self;
        if options.tie_break == TieBreak::Degree {
            options.variable_selection = VariableSelection::Mrv;
        }
        if options.variable_selection == VariableSelection::Mrv && options.inference.is_none() {
            options.inference = Some(Inference::ForwardChecking);
        }
        if options.inference.is_none() {
            options.inference = Some(Inference::None);
        }
        options
    }

    /// The inference a normalized configuration will run.
    pub fn effective_inference(&self) -> Inference {
        self.inference.unwrap_or_default()
    }
}
