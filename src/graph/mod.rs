//! The read-only road network consumed by the routing core.
//!
//! The core only ever talks to a network through [`GraphStore`], the
//! [`Network`] type is an in-memory implementation backed by petgraph and
//! an r-tree spatial index.

#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod network;
#[doc(hidden)]
pub mod store;

#[doc(inline)]
pub use error::GraphError;
#[doc(inline)]
pub use network::{Network, NetworkBuilder};
#[doc(inline)]
pub use store::*;
