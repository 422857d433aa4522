use std::collections::{HashSet, VecDeque};

use crate::solver::graph::Arc;

/// FIFO queue of directed arcs awaiting revision.
///
/// Re-queuing an arc that is already pending is a no-op, so the queue never
/// holds duplicates; pop order is strictly first-in first-out so that traces
/// of the propagation loop are reproducible.
pub struct WorkList {
    queue: VecDeque<Arc>,
    queue_members: HashSet<Arc>,
}

impl WorkList {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            queue_members: HashSet::new(),
        }
    }

    pub fn push_back(&mut self, arc: Arc) {
        if self.queue_members.insert(arc) {
            self.queue.push_back(arc);
        }
    }

    pub fn pop_front(&mut self) -> Option<Arc> {
        let arc = self.queue.pop_front()?;
        self.queue_members.remove(&arc);
        Some(arc)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// The queue contents in pop order, for recording in a trace step.
    pub fn snapshot(&self) -> Vec<Arc> {
        self.queue.iter().copied().collect()
    }
}

impl Default for WorkList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pops_in_fifo_order() {
        let mut list = WorkList::new();
        list.push_back((0, 1));
        list.push_back((1, 0));
        list.push_back((2, 3));
        assert_eq!(list.pop_front(), Some((0, 1)));
        assert_eq!(list.pop_front(), Some((1, 0)));
        assert_eq!(list.pop_front(), Some((2, 3)));
        assert_eq!(list.pop_front(), None);
    }

    #[test]
    fn duplicate_pushes_are_ignored_while_pending() {
        let mut list = WorkList::new();
        list.push_back((0, 1));
        list.push_back((0, 1));
        assert_eq!(list.len(), 1);

        // Once popped, the arc may be queued again.
        assert_eq!(list.pop_front(), Some((0, 1)));
        list.push_back((0, 1));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn snapshot_reflects_pop_order() {
        let mut list = WorkList::new();
        list.push_back((4, 2));
        list.push_back((0, 1));
        assert_eq!(list.snapshot(), vec![(4, 2), (0, 1)]);
    }
}
