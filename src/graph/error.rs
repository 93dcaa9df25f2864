use crate::graph::{Cost, VertexId};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("no graph has been loaded into the store")]
    NotLoaded,

    #[error("vertex {0} does not exist in the graph")]
    UnknownVertex(VertexId),

    #[error("edge {from} -> {to} has an invalid weight of {weight}")]
    InvalidWeight {
        from: VertexId,
        to: VertexId,
        weight: Cost,
    },

    #[error("graph store is unavailable: {0}")]
    Unavailable(String),
}
