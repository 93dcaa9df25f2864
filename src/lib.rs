#![doc = include_str!("../README.md")]

#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;
#[cfg_attr(feature = "mimalloc", global_allocator)]
#[cfg(feature = "mimalloc")]
static GLOBAL: MiMalloc = MiMalloc;

pub mod config;
pub mod geo;
pub mod graph;
pub mod route;

#[doc(inline)]
pub use crate::config::{Profile, RouteConfig};
#[doc(inline)]
pub use crate::geo::{haversine, Coordinate};
#[doc(inline)]
pub use crate::graph::{Cost, Edge, EdgeId, GraphStore, Network, ResolvedPoint, VertexId};
#[doc(inline)]
pub use crate::route::{Cancellation, Outcome, RouteError, RouteNode, RouteResult, RoutingService};
