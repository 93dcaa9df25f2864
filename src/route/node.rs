use crate::geo::Coordinate;
use crate::graph::{Cost, VertexId};

use serde::{Deserialize, Serialize};

/// Index of a [`SearchNode`] within the arena of a single search.
pub type Slot = usize;

/// The state of one vertex during a single search.
///
/// Nodes live in an arena owned by the search, and refer to their
/// predecessor on the best known path by its [`Slot`]. The total cost
/// is always derived as `g + h`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchNode {
    pub vertex: VertexId,
    pub coordinate: Coordinate,

    /// Accumulated edge weight from the start vertex.
    pub g: Cost,
    /// Great-circle estimate of the remaining distance to the goal.
    pub h: Cost,

    pub parent: Option<Slot>,
}

impl SearchNode {
    #[inline]
    pub fn f(&self) -> Cost {
        self.g + self.h
    }
}

/// A snapshot of a [`SearchNode`] on a finished route.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteNode {
    pub vertex: VertexId,
    pub coordinate: Coordinate,
    pub g: Cost,
    pub h: Cost,
}

impl RouteNode {
    #[inline]
    pub fn f(&self) -> Cost {
        self.g + self.h
    }
}

impl From<&SearchNode> for RouteNode {
    fn from(node: &SearchNode) -> Self {
        RouteNode {
            vertex: node.vertex,
            coordinate: node.coordinate,
            g: node.g,
            h: node.h,
        }
    }
}
