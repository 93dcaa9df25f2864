use crate::geo::error::GeoError;

use geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

pub type Degree = f32;

/// The latitude, longitude pair which geotags a vertex or a query.
///
/// The routing core never validates a coordinate itself, callers which accept
/// untrusted input should construct it through [`Coordinate::try_new`].
///
/// ```rust
/// use waypath::Coordinate;
///
/// let coordinate = Coordinate::new(50.87289, -2.95953);
/// assert!(Coordinate::try_new(91.0, 0.0).is_err());
/// ```
#[derive(Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: Degree,
    pub lng: Degree,
}

impl Coordinate {
    pub const fn new(lat: Degree, lng: Degree) -> Self {
        Self { lat, lng }
    }

    pub fn try_new(lat: Degree, lng: Degree) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(GeoError::InvalidCoordinate(format!(
                "Latitude must be within [-90, 90]. Given: {lat}"
            )));
        }

        if !(-180.0..=180.0).contains(&lng) {
            return Err(GeoError::InvalidCoordinate(format!(
                "Longitude must be within [-180, 180]. Given: {lng}"
            )));
        }

        Ok(Self::new(lat, lng))
    }

    /// The coordinate as an `(x: lng, y: lat)` [`Point`], as used by the spatial index.
    #[inline]
    pub fn point(&self) -> Point {
        Point::new(self.lng as f64, self.lat as f64)
    }
}

impl From<Point> for Coordinate {
    fn from(point: Point) -> Self {
        Coordinate::new(point.y() as Degree, point.x() as Degree)
    }
}

impl Debug for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "POINT({} {})", self.lng, self.lat)
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}
