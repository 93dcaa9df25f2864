use crate::config::Profile;
use crate::geo::{haversine, Coordinate};
use crate::graph::{GraphStore, ResolvedPoint, VertexId};
use crate::route::error::RouteError;

use log::debug;
#[cfg(feature = "tracing")]
use tracing::Level;

/// Maps an arbitrary coordinate onto the closest usable vertex.
///
/// A point which the store places strictly inside an edge is snapped to
/// whichever endpoint is geodesically closer to `coordinate`. An exact tie
/// keeps the `from` endpoint.
#[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(store)))]
pub fn resolve<G>(
    store: &G,
    coordinate: Coordinate,
    max_search_distance: f64,
    profile: Profile,
) -> Result<VertexId, RouteError>
where
    G: GraphStore + ?Sized,
{
    if !store.is_loaded() {
        return Err(RouteError::ServiceNotReady);
    }

    let unresolvable = || RouteError::CoordinateUnresolvable {
        latitude: coordinate.lat,
        longitude: coordinate.lng,
    };

    let resolved = store
        .resolve_nearest(coordinate, max_search_distance, profile)?
        .ok_or_else(unresolvable)?;

    let vertex = match resolved {
        ResolvedPoint::Vertex(vertex) => vertex,
        ResolvedPoint::Edge { from, offset, .. } if offset <= 0.0 => from,
        ResolvedPoint::Edge { to, offset, .. } if offset >= 1.0 => to,
        ResolvedPoint::Edge { from, to, id, .. } => {
            let from_position = store
                .coordinate(from)?
                .ok_or(RouteError::MalformedGraph(from))?;
            let to_position = store
                .coordinate(to)?
                .ok_or(RouteError::MalformedGraph(to))?;

            let to_from = haversine(coordinate, from_position);
            let to_to = haversine(coordinate, to_position);

            debug!("Snapping {coordinate} on {id}: {to_from:.1}m to {from}, {to_to:.1}m to {to}");
            if to_to < to_from {
                to
            } else {
                from
            }
        }
    };

    Ok(vertex)
}
