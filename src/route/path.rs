use crate::route::node::{RouteNode, SearchNode, Slot};

use log::warn;

/// Follows the parent chain of `terminal` back to the root of the search,
/// returning the route in start to goal order.
///
/// A chain which leaves the arena or revisits a slot cannot come from a
/// well-formed search; it yields an empty route, which callers read as
/// "no route".
pub fn reconstruct(arena: &[SearchNode], terminal: Slot) -> Vec<RouteNode> {
    let mut route = Vec::new();
    let mut cursor = Some(terminal);

    while let Some(slot) = cursor {
        let Some(node) = arena.get(slot) else {
            warn!("Parent chain references slot {slot} outside of an arena of {}", arena.len());
            return Vec::new();
        };

        // Any chain longer than the arena must contain a cycle.
        if route.len() == arena.len() {
            warn!("Parent chain from slot {terminal} does not terminate");
            return Vec::new();
        }

        route.push(RouteNode::from(node));
        cursor = node.parent;
    }

    route.reverse();
    route
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geo::Coordinate;
    use crate::graph::VertexId;

    fn node(vertex: u32, g: f64, parent: Option<Slot>) -> SearchNode {
        SearchNode {
            vertex: VertexId(vertex),
            coordinate: Coordinate::new(0.0, vertex as f32 * 0.001),
            g,
            h: 0.0,
            parent,
        }
    }

    #[test]
    fn walks_back_to_the_root() {
        let arena = vec![
            node(1, 0.0, None),
            node(2, 4.0, Some(0)),
            node(3, 1.0, Some(0)),
            node(4, 6.0, Some(2)),
        ];

        let route = reconstruct(&arena, 3);
        let vertices = route.iter().map(|n| n.vertex.0).collect::<Vec<_>>();

        assert_eq!(vertices, vec![1, 3, 4]);
        assert_eq!(route.last().map(|n| n.g), Some(6.0));
    }

    #[test]
    fn root_alone_is_a_single_node_route() {
        let arena = vec![node(7, 0.0, None)];
        assert_eq!(reconstruct(&arena, 0).len(), 1);
    }

    #[test]
    fn malformed_chains_yield_no_route() {
        let dangling = vec![node(1, 0.0, Some(5))];
        assert!(reconstruct(&dangling, 0).is_empty());

        let cyclic = vec![node(1, 0.0, Some(1)), node(2, 1.0, Some(0))];
        assert!(reconstruct(&cyclic, 1).is_empty());

        assert!(reconstruct(&[], 0).is_empty());
    }
}
