use crate::graph::{GraphError, VertexId};
use crate::route::frontier::FrontierError;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("routing service has no loaded graph")]
    ServiceNotReady,

    #[error("no vertex within the search radius of ({latitude}, {longitude})")]
    CoordinateUnresolvable { latitude: f32, longitude: f32 },

    /// Never raised by the search itself, which reports an exhausted
    /// frontier as [`Termination::Exhausted`](crate::route::Termination).
    /// Available to callers that want to treat a missing route as an error.
    #[error("no path exists between the requested points")]
    NoPathExists,

    #[error("graph store returned no coordinate for vertex {0}")]
    MalformedGraph(VertexId),

    #[error("graph store failed: {0}")]
    Graph(GraphError),

    #[error("frontier invariant violated: {0}")]
    Frontier(#[from] FrontierError),
}

impl From<GraphError> for RouteError {
    fn from(value: GraphError) -> Self {
        match value {
            GraphError::NotLoaded => RouteError::ServiceNotReady,
            other => RouteError::Graph(other),
        }
    }
}
