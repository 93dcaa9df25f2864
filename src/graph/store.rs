use crate::config::Profile;
use crate::geo::Coordinate;
use crate::graph::GraphError;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Path cost, in meters.
pub type Cost = f64;

/// Opaque identifier of a vertex, stable for the lifetime of a loaded graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u32);

/// Identifier of a single directed edge within a store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

impl Display for VertexId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl Display for EdgeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// An outgoing, directed arc as seen from its source vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub target: VertexId,
    pub weight: Cost,
}

impl Edge {
    pub const fn new(target: VertexId, weight: Cost) -> Self {
        Self { target, weight }
    }
}

/// The answer of a nearest-point query against a store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResolvedPoint {
    /// The query resolved onto a vertex directly.
    Vertex(VertexId),

    /// The query resolved onto the edge `from -> to`, at the fractional
    /// `offset` along it. `0` lies on `from` and `1` lies on `to`.
    Edge {
        id: EdgeId,
        from: VertexId,
        to: VertexId,
        offset: f32,
    },
}

/// A read-only road network.
///
/// Implementations are shared between concurrently running searches and
/// must therefore tolerate concurrent reads. No search ever mutates a store.
pub trait GraphStore: Send + Sync {
    /// Whether the store holds a loaded graph. A store which is not loaded
    /// cannot answer any query.
    fn is_loaded(&self) -> bool {
        true
    }

    /// The position of the vertex, `None` if the store does not know it.
    fn coordinate(&self, vertex: VertexId) -> Result<Option<Coordinate>, GraphError>;

    /// Every directed edge leaving `vertex`.
    fn outgoing_edges(&self, vertex: VertexId) -> Result<Vec<Edge>, GraphError>;

    /// Finds the closest point of the network to `coordinate`, no further
    /// than `max_distance` meters away, for the given routing profile.
    fn resolve_nearest(
        &self,
        coordinate: Coordinate,
        max_distance: f64,
        profile: Profile,
    ) -> Result<Option<ResolvedPoint>, GraphError>;
}
