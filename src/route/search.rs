//! The A* search engine.
//!
//! Every vertex is in one of three states, implied by set membership:
//! *unseen* (in neither set), *open* (in the [`Frontier`]) or *closed*
//! (expanded, its cost final). Search nodes live in an arena indexed by
//! [`Slot`], and each open node keeps the slot of its best known parent.
//!
//! The engine runs in bounded slices through [`AStar::step`] so that a host
//! can regain control between slices. [`AStar::run`] drives it to completion
//! on the calling thread, [`AStar::run_async`] yields to the tokio scheduler
//! at every checkpoint.

use crate::geo::{haversine, Coordinate};
use crate::graph::{GraphStore, VertexId};
use crate::route::cancel::Cancellation;
use crate::route::error::RouteError;
use crate::route::frontier::{Frontier, FrontierEntry};
use crate::route::node::{RouteNode, SearchNode, Slot};
use crate::route::path::reconstruct;

use log::{trace, warn};
use rustc_hash::{FxHashMap, FxHashSet};

/// The state of a search after a slice of work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// The slice ran out of budget, the search can be resumed.
    Suspended,
    /// The goal was extracted from the frontier, its node sits in the slot.
    Found(Slot),
    /// The frontier emptied without reaching the goal.
    Exhausted,
}

/// How a driven search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    Found(Slot),
    Exhausted,
    Cancelled,
}

pub struct AStar<'g, G>
where
    G: GraphStore + ?Sized,
{
    store: &'g G,

    goal: VertexId,
    goal_coordinate: Coordinate,

    arena: Vec<SearchNode>,
    slots: FxHashMap<VertexId, Slot>,
    frontier: Frontier,
    closed: FxHashSet<VertexId>,

    explored: usize,
    found: Option<Slot>,
}

impl<'g, G> AStar<'g, G>
where
    G: GraphStore + ?Sized,
{
    /// Prepares a search from `start` to `goal`, seeding the frontier with
    /// the start vertex.
    pub fn new(store: &'g G, start: VertexId, goal: VertexId) -> Result<Self, RouteError> {
        let start_coordinate = store
            .coordinate(start)?
            .ok_or(RouteError::MalformedGraph(start))?;
        let goal_coordinate = store
            .coordinate(goal)?
            .ok_or(RouteError::MalformedGraph(goal))?;

        let mut search = AStar {
            store,
            goal,
            goal_coordinate,
            arena: Vec::with_capacity(256),
            slots: FxHashMap::default(),
            frontier: Frontier::new(),
            closed: FxHashSet::default(),
            explored: 0,
            found: None,
        };

        search.open(start, start_coordinate, 0.0, None)?;
        Ok(search)
    }

    /// Number of vertices expanded (closed) so far.
    pub fn nodes_explored(&self) -> usize {
        self.explored
    }

    pub fn arena(&self) -> &[SearchNode] {
        &self.arena
    }

    pub fn goal(&self) -> VertexId {
        self.goal
    }

    /// The reconstructed route ending in `slot`.
    pub fn route(&self, slot: Slot) -> Vec<RouteNode> {
        reconstruct(&self.arena, slot)
    }

    /// Creates the search node of an unseen vertex and opens it.
    fn open(
        &mut self,
        vertex: VertexId,
        coordinate: Coordinate,
        g: f64,
        parent: Option<Slot>,
    ) -> Result<Slot, RouteError> {
        let slot = self.arena.len();
        let node = SearchNode {
            vertex,
            coordinate,
            g,
            h: haversine(coordinate, self.goal_coordinate),
            parent,
        };

        self.frontier
            .insert(FrontierEntry::new(node.f(), vertex, slot))?;
        self.arena.push(node);
        self.slots.insert(vertex, slot);

        Ok(slot)
    }

    /// Expands up to `budget` vertices.
    ///
    /// Once the goal has been found every further call reports it again.
    pub fn step(&mut self, budget: usize) -> Result<Progress, RouteError> {
        if let Some(slot) = self.found {
            return Ok(Progress::Found(slot));
        }

        let budget = budget.max(1);
        let mut expanded = 0;

        while let Some(current) = self.frontier.extract_min() {
            if current.vertex == self.goal {
                self.found = Some(current.slot);
                return Ok(Progress::Found(current.slot));
            }

            self.closed.insert(current.vertex);
            self.explored += 1;
            self.relax(current.slot)?;

            expanded += 1;
            if expanded >= budget && !self.frontier.is_empty() {
                return Ok(Progress::Suspended);
            }
        }

        Ok(Progress::Exhausted)
    }

    /// Relaxes every outgoing edge of the node in `slot` whose target
    /// is not closed.
    fn relax(&mut self, slot: Slot) -> Result<(), RouteError> {
        let SearchNode { vertex, g, .. } = self.arena[slot];

        for edge in self.store.outgoing_edges(vertex)? {
            if self.closed.contains(&edge.target) {
                continue;
            }

            if !(edge.weight >= 0.0 && edge.weight.is_finite()) {
                warn!(
                    "Skipping edge {vertex} -> {} with invalid weight {}",
                    edge.target, edge.weight
                );
                continue;
            }

            let tentative = g + edge.weight;

            match self.slots.get(&edge.target).copied() {
                // Open, since every seen vertex that is not closed is in the frontier.
                Some(existing) => {
                    let node = &mut self.arena[existing];
                    if tentative < node.g {
                        node.g = tentative;
                        node.parent = Some(slot);

                        let entry = FrontierEntry::new(node.f(), edge.target, existing);
                        self.frontier.decrease_key(edge.target, entry)?;
                    }
                }
                None => {
                    let Some(coordinate) = self.store.coordinate(edge.target)? else {
                        warn!(
                            "Skipping edge {vertex} -> {}, target has no coordinate",
                            edge.target
                        );
                        continue;
                    };

                    self.open(edge.target, coordinate, tentative, Some(slot))?;
                }
            }
        }

        Ok(())
    }

    /// Drives the search to completion on the calling thread, checking for
    /// cancellation every `yield_interval` expansions.
    pub fn run(
        &mut self,
        yield_interval: usize,
        cancellation: &Cancellation,
    ) -> Result<Termination, RouteError> {
        loop {
            if cancellation.is_cancelled() {
                trace!("Search cancelled after {} expansions", self.explored);
                return Ok(Termination::Cancelled);
            }

            match self.step(yield_interval)? {
                Progress::Suspended => {
                    trace!("Checkpoint at {} expansions", self.explored);
                }
                Progress::Found(slot) => return Ok(Termination::Found(slot)),
                Progress::Exhausted => return Ok(Termination::Exhausted),
            }
        }
    }

    /// As [`AStar::run`], yielding to the tokio scheduler at every checkpoint.
    ///
    /// Yielding only changes how the search interleaves with other tasks,
    /// never its result.
    #[cfg(feature = "runtime")]
    pub async fn run_async(
        &mut self,
        yield_interval: usize,
        cancellation: &Cancellation,
    ) -> Result<Termination, RouteError> {
        loop {
            if cancellation.is_cancelled() {
                trace!("Search cancelled after {} expansions", self.explored);
                return Ok(Termination::Cancelled);
            }

            match self.step(yield_interval)? {
                Progress::Suspended => {
                    trace!("Yielding at {} expansions", self.explored);
                    tokio::task::yield_now().await;
                }
                Progress::Found(slot) => return Ok(Termination::Found(slot)),
                Progress::Exhausted => return Ok(Termination::Exhausted),
            }
        }
    }
}

/// Runs a complete search between two vertices, returning the route and
/// the number of expanded vertices. The route is empty when no path exists.
pub fn search<G>(
    store: &G,
    start: VertexId,
    goal: VertexId,
) -> Result<(Vec<RouteNode>, usize), RouteError>
where
    G: GraphStore + ?Sized,
{
    let mut astar = AStar::new(store, start, goal)?;

    let route = match astar.run(usize::MAX, &Cancellation::default())? {
        Termination::Found(slot) => astar.route(slot),
        Termination::Exhausted | Termination::Cancelled => Vec::new(),
    };

    Ok((route, astar.nodes_explored()))
}
