//! Mutable-but-restorable solver state: per-variable domains and the partial
//! assignment built up during search.

use im::{OrdMap, OrdSet};
use serde::{Deserialize, Serialize};

/// Row-major index of a cell variable.
pub type VariableId = usize;

/// A candidate digit, `1..=N` for a board of side length `N`.
pub type Value = u8;

/// A partial mapping from variables to their chosen values.
pub type Assignment = OrdMap<VariableId, Value>;

/// The current domain of every variable on the board.
///
/// Each domain is a persistent ordered set, so iteration is always in
/// ascending value order and a full snapshot of the board state is a cheap
/// structural-sharing clone. Both properties are load-bearing: the first for
/// reproducible traces, the second because every recorded step carries one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSet {
    domains: Vec<OrdSet<Value>>,
}

impl DomainSet {
    pub fn new(domains: Vec<OrdSet<Value>>) -> Self {
        Self { domains }
    }

    pub fn variable_count(&self) -> usize {
        self.domains.len()
    }

    pub fn get(&self, variable: VariableId) -> &OrdSet<Value> {
        &self.domains[variable]
    }

    pub fn contains(&self, variable: VariableId, value: Value) -> bool {
        self.domains[variable].contains(&value)
    }

    /// Removes `value` from the domain of `variable`. Returns `true` if the
    /// value was present.
    pub fn remove(&mut self, variable: VariableId, value: Value) -> bool {
        self.domains[variable].remove(&value).is_some()
    }

    /// Reinstates a previously saved domain, exactly as it was.
    pub fn restore(&mut self, variable: VariableId, domain: OrdSet<Value>) {
        // Undo must only ever grow a domain back to its saved state.
        debug_assert!(self.domains[variable].iter().all(|v| domain.contains(v)));
        self.domains[variable] = domain;
    }

    pub fn is_singleton(&self, variable: VariableId) -> bool {
        self.domains[variable].len() == 1
    }

    /// If the domain of `variable` holds exactly one value, returns it.
    pub fn singleton(&self, variable: VariableId) -> Option<Value> {
        if self.is_singleton(variable) {
            self.domains[variable].get_min().copied()
        } else {
            None
        }
    }

    pub fn all_singletons(&self) -> bool {
        self.domains.iter().all(|domain| domain.len() == 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrdSet<Value>> {
        self.domains.iter()
    }
}
