use crate::geo::haversine;
use crate::graph::Cost;
use crate::route::error::RouteError;
use crate::route::node::RouteNode;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum::{AsRefStr, Display};

/// Why a route query ended the way it did. Only [`Outcome::Found`] carries
/// a path, every other outcome reports `path_found = false`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Found,
    /// The reachable component of the start was exhausted.
    NoPath,
    Cancelled,
    /// A coordinate had no vertex within the search radius.
    Unresolvable,
    /// No graph was available to search.
    NotReady,
    /// The graph store or the search itself failed.
    Failed,
}

impl From<&RouteError> for Outcome {
    fn from(value: &RouteError) -> Self {
        match value {
            RouteError::ServiceNotReady => Outcome::NotReady,
            RouteError::CoordinateUnresolvable { .. } => Outcome::Unresolvable,
            RouteError::NoPathExists => Outcome::NoPath,
            RouteError::MalformedGraph(_) | RouteError::Graph(_) | RouteError::Frontier(_) => {
                Outcome::Failed
            }
        }
    }
}

/// The result of a single route query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Route in start to goal order, empty unless a path was found.
    pub path: Vec<RouteNode>,

    /// Sum of the great-circle distances between consecutive route points, in meters.
    pub total_distance: f64,
    /// Sum of the traversed edge weights.
    pub total_weight: Cost,
    pub estimated_travel_time: Duration,

    pub nodes_explored: usize,
    pub calculation_time: Duration,

    pub path_found: bool,
    pub outcome: Outcome,
}

impl RouteResult {
    pub fn found(
        path: Vec<RouteNode>,
        nodes_explored: usize,
        average_speed_kmh: f64,
        calculation_time: Duration,
    ) -> Self {
        // An empty reconstruction means the parent chain was unusable.
        if path.is_empty() {
            return Self::not_found(Outcome::Failed, nodes_explored, calculation_time);
        }

        let total_distance = total_distance(&path);
        let total_weight = path.last().map_or(0.0, |node| node.g);

        RouteResult {
            path,
            total_distance,
            total_weight,
            estimated_travel_time: travel_time(total_distance, average_speed_kmh),
            nodes_explored,
            calculation_time,
            path_found: true,
            outcome: Outcome::Found,
        }
    }

    pub fn not_found(outcome: Outcome, nodes_explored: usize, calculation_time: Duration) -> Self {
        RouteResult {
            path: Vec::new(),
            total_distance: 0.0,
            total_weight: 0.0,
            estimated_travel_time: Duration::ZERO,
            nodes_explored,
            calculation_time,
            path_found: false,
            outcome,
        }
    }

    /// A failed query, with every metric but the elapsed time zeroed.
    pub fn failed(error: &RouteError, calculation_time: Duration) -> Self {
        Self::not_found(Outcome::from(error), 0, calculation_time)
    }
}

/// Sum of the great-circle distances between consecutive route points.
pub fn total_distance(route: &[RouteNode]) -> f64 {
    route
        .iter()
        .tuple_windows()
        .map(|(a, b)| haversine(a.coordinate, b.coordinate))
        .sum()
}

/// The time needed to cover `distance` meters at `average_speed_kmh`.
pub fn travel_time(distance: f64, average_speed_kmh: f64) -> Duration {
    if !(distance > 0.0 && average_speed_kmh > 0.0) {
        return Duration::ZERO;
    }

    let meters_per_second = average_speed_kmh / 3.6;
    Duration::try_from_secs_f64(distance / meters_per_second).unwrap_or(Duration::MAX)
}
