//! The A* open set.
//!
//! Entries are ordered by the composite key `(f, vertex)` and identified by
//! the vertex alone. The two live in separate structures, so distinct
//! vertices with an equal cost can never collapse into one slot.

use crate::graph::{Cost, VertexId};
use crate::route::node::Slot;

use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrontierError {
    #[error("vertex {0} is already in the frontier")]
    Duplicate(VertexId),

    #[error("vertex {0} is not in the frontier")]
    Missing(VertexId),

    #[error("cost {new} for vertex {vertex} does not improve on {current}")]
    NotImproved {
        vertex: VertexId,
        current: Cost,
        new: Cost,
    },
}

/// A vertex eligible for expansion, with its total cost `f` and the arena
/// slot holding its search node.
#[derive(Clone, Copy, Debug)]
pub struct FrontierEntry {
    pub cost: Cost,
    pub vertex: VertexId,
    pub slot: Slot,
}

impl FrontierEntry {
    pub const fn new(cost: Cost, vertex: VertexId, slot: Slot) -> Self {
        Self { cost, vertex, slot }
    }
}

impl PartialEq for FrontierEntry {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

#[derive(Debug, Default)]
pub struct Frontier {
    ordered: BTreeSet<FrontierEntry>,
    members: FxHashMap<VertexId, FrontierEntry>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.members.contains_key(&vertex)
    }

    /// Adds a vertex which is not yet present.
    pub fn insert(&mut self, entry: FrontierEntry) -> Result<(), FrontierError> {
        if self.members.contains_key(&entry.vertex) {
            return Err(FrontierError::Duplicate(entry.vertex));
        }

        self.members.insert(entry.vertex, entry);
        self.ordered.insert(entry);
        Ok(())
    }

    /// Removes the entry with the lowest cost, the smaller vertex id
    /// winning between equal costs.
    pub fn extract_min(&mut self) -> Option<FrontierEntry> {
        let entry = self.ordered.pop_first()?;
        self.members.remove(&entry.vertex);
        Some(entry)
    }

    /// The entry [`Frontier::extract_min`] would return, without removing it.
    pub fn peek(&self) -> Option<&FrontierEntry> {
        self.ordered.first()
    }

    /// Replaces the entry of `vertex` with a strictly cheaper one.
    pub fn decrease_key(
        &mut self,
        vertex: VertexId,
        entry: FrontierEntry,
    ) -> Result<(), FrontierError> {
        debug_assert_eq!(vertex, entry.vertex, "entry must belong to the re-keyed vertex");

        let current = *self
            .members
            .get(&vertex)
            .ok_or(FrontierError::Missing(vertex))?;

        if entry.cost.total_cmp(&current.cost) != Ordering::Less {
            return Err(FrontierError::NotImproved {
                vertex,
                current: current.cost,
                new: entry.cost,
            });
        }

        self.ordered.remove(&current);
        self.ordered.insert(entry);
        self.members.insert(vertex, entry);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn entry(cost: Cost, vertex: u32) -> FrontierEntry {
        FrontierEntry::new(cost, VertexId(vertex), vertex as Slot)
    }

    #[test]
    fn extracts_in_cost_order() {
        let mut frontier = Frontier::new();
        for (cost, vertex) in [(5.0, 1), (1.0, 2), (3.0, 3)] {
            frontier.insert(entry(cost, vertex)).expect("distinct vertices");
        }

        let order = std::iter::from_fn(|| frontier.extract_min())
            .map(|e| e.vertex.0)
            .collect::<Vec<_>>();

        assert_eq!(order, vec![2, 3, 1]);
        assert!(frontier.is_empty());
    }

    #[test]
    fn equal_costs_keep_both_vertices() {
        let mut frontier = Frontier::new();
        frontier.insert(entry(2.0, 9)).unwrap();
        frontier.insert(entry(2.0, 4)).unwrap();
        frontier.insert(entry(2.0, 7)).unwrap();

        assert_eq!(frontier.len(), 3);
        assert_eq!(frontier.extract_min().map(|e| e.vertex), Some(VertexId(4)));
        assert_eq!(frontier.extract_min().map(|e| e.vertex), Some(VertexId(7)));
        assert_eq!(frontier.extract_min().map(|e| e.vertex), Some(VertexId(9)));
        assert_eq!(frontier.extract_min(), None);
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut frontier = Frontier::new();
        frontier.insert(entry(2.0, 1)).unwrap();

        assert_eq!(
            frontier.insert(entry(1.0, 1)),
            Err(FrontierError::Duplicate(VertexId(1)))
        );
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn decrease_key_reorders() {
        let mut frontier = Frontier::new();
        frontier.insert(entry(1.0, 1)).unwrap();
        frontier.insert(entry(10.0, 2)).unwrap();

        frontier
            .decrease_key(VertexId(2), entry(0.5, 2))
            .expect("cheaper entry");

        assert!(frontier.contains(VertexId(2)));
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.peek().map(|e| e.vertex), Some(VertexId(2)));
        assert_eq!(frontier.extract_min().map(|e| e.cost), Some(0.5));
        assert_eq!(frontier.extract_min().map(|e| e.vertex), Some(VertexId(1)));
    }

    #[test]
    fn decrease_key_requires_improvement() {
        let mut frontier = Frontier::new();
        frontier.insert(entry(3.0, 1)).unwrap();

        assert!(matches!(
            frontier.decrease_key(VertexId(1), entry(3.0, 1)),
            Err(FrontierError::NotImproved { .. })
        ));
        assert_eq!(
            frontier.decrease_key(VertexId(5), entry(1.0, 5)),
            Err(FrontierError::Missing(VertexId(5)))
        );
    }

    #[test]
    fn contains_tracks_membership() {
        let mut frontier = Frontier::new();
        assert!(!frontier.contains(VertexId(1)));

        frontier.insert(entry(1.0, 1)).unwrap();
        assert!(frontier.contains(VertexId(1)));

        frontier.extract_min();
        assert!(!frontier.contains(VertexId(1)));
    }
}
