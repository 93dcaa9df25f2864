//! Geographic primitives: the [`Coordinate`] pair and great-circle distance.

/// Earth radius used by the haversine distance, in meters.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

#[doc(hidden)]
pub mod coordinate;
#[doc(hidden)]
pub mod distance;
#[doc(hidden)]
pub mod error;

#[doc(inline)]
pub use coordinate::Coordinate;
#[doc(inline)]
pub use distance::haversine;
#[doc(inline)]
pub use error::GeoError;
