//! Point-to-point A* routing.
//!
//! A query flows through the modules in order: [`resolve`] snaps both
//! coordinates onto vertices, [`search::AStar`] expands the network from the
//! start using the [`frontier::Frontier`], [`path::reconstruct`] walks the
//! parent slots back from the goal, and [`metrics`] summarises the route.
//! [`RoutingService`] ties these together behind `find_route`.

#[doc(hidden)]
pub mod cancel;
#[doc(hidden)]
pub mod error;
pub mod frontier;
pub mod metrics;
#[doc(hidden)]
pub mod node;
pub mod path;
#[doc(hidden)]
pub mod resolve;
pub mod search;
#[doc(hidden)]
pub mod service;

#[doc(inline)]
pub use cancel::Cancellation;
#[doc(inline)]
pub use error::RouteError;
#[doc(inline)]
pub use metrics::{Outcome, RouteResult};
#[doc(inline)]
pub use node::{RouteNode, SearchNode, Slot};
#[doc(inline)]
pub use resolve::resolve;
#[doc(inline)]
pub use search::{search, AStar, Progress, Termination};
#[doc(inline)]
pub use service::RoutingService;
