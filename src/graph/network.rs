use crate::config::Profile;
use crate::geo::{haversine, Coordinate, EARTH_RADIUS};
use crate::graph::{Cost, Edge, EdgeId, GraphError, GraphStore, ResolvedPoint, VertexId};

use geo::{Distance, Euclidean, Haversine, InterpolatableLine, Line, LineLocatePoint, Point};
use log::{debug, info, trace};
use petgraph::prelude::DiGraphMap;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rstar::{Envelope, RTree, AABB};
use rustc_hash::{FxHashMap, FxHasher};

use std::fmt::{Debug, Formatter};
use std::hash::BuildHasherDefault;
use std::time::Instant;
#[cfg(feature = "tracing")]
use tracing::Level;

pub type GraphStructure = DiGraphMap<VertexId, (Cost, EdgeId), BuildHasherDefault<FxHasher>>;

/// A vertex along with its position, as stored in the spatial index.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Node {
    pub id: VertexId,
    pub position: Point,
}

impl Node {
    pub fn new(id: VertexId, position: Point) -> Self {
        Self { id, position }
    }
}

impl rstar::RTreeObject for Node {
    type Envelope = AABB<Point>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl rstar::PointDistance for Node {
    fn distance_2(
        &self,
        point: &<Self::Envelope as Envelope>::Point,
    ) -> <<Self::Envelope as Envelope>::Point as rstar::Point>::Scalar {
        Euclidean.distance(self.position, *point).powi(2)
    }
}

/// An edge which carries both of its endpoints inline, so that it can be
/// placed in the edge index without indirection through the vertex map.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FatEdge {
    pub id: EdgeId,
    pub source: Node,
    pub target: Node,
}

impl rstar::RTreeObject for FatEdge {
    type Envelope = AABB<Point>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.source.position, self.target.position)
    }
}

/// In-memory road network.
///
/// Built once through a [`NetworkBuilder`] and read-only afterwards, so a
/// single network can be shared by any number of concurrent searches.
pub struct Network {
    pub(crate) graph: GraphStructure,
    pub(crate) hash: FxHashMap<VertexId, Node>,

    pub(crate) index: RTree<Node>,
    pub(crate) index_edge: RTree<FatEdge>,

    loaded: bool,
}

impl Debug for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Network with Nodes: {}, Edges: {}",
            self.hash.len(),
            self.graph.edge_count()
        )
    }
}

impl Network {
    pub fn builder() -> NetworkBuilder {
        NetworkBuilder::default()
    }

    /// A store without any graph behind it. Every query against it fails
    /// with [`GraphError::NotLoaded`].
    pub fn empty() -> Self {
        Self {
            graph: GraphStructure::new(),
            hash: FxHashMap::default(),
            index: RTree::new(),
            index_edge: RTree::new(),
            loaded: false,
        }
    }

    pub fn size(&self) -> usize {
        self.hash.len()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[inline]
    pub fn get_position(&self, vertex: &VertexId) -> Option<Point> {
        self.hash.get(vertex).map(|node| node.position)
    }

    /// The axis-aligned box enclosing every point within `distance` meters
    /// of `point`, on the same sphere as [`haversine`].
    ///
    /// The longitude half-width is the widest extent of the spherical cap,
    /// which grows with latitude. Near the poles the box spans every longitude.
    pub(crate) fn bounding(point: &Point, distance: f64) -> AABB<Point> {
        let angular = distance / EARTH_RADIUS;

        let d_lat = angular.to_degrees().min(180.0);
        let d_lng = match angular.sin() / point.y().to_radians().cos() {
            ratio if angular < std::f64::consts::FRAC_PI_2 && (0.0..1.0).contains(&ratio) => {
                ratio.asin().to_degrees()
            }
            _ => 180.0,
        };

        AABB::from_corners(
            Point::new(point.x() - d_lng, (point.y() - d_lat).max(-90.0)),
            Point::new(point.x() + d_lng, (point.y() + d_lat).min(90.0)),
        )
    }

    /// Unsorted iterator over the vertices within the bounding box of a
    /// `distance` radius around `point`.
    ///
    /// ### Note
    /// The box covers its corners too, so a scan may select vertices further
    /// than `distance` away. Callers that need an exact radius must filter.
    #[inline]
    pub fn scan_nodes<'a>(&'a self, point: &Point, distance: f64) -> impl Iterator<Item = &'a Node> {
        self.index
            .locate_in_envelope(&Self::bounding(point, distance))
    }

    /// Unsorted iterator over the edges whose bounding box intersects the
    /// square radius of `point`.
    #[inline]
    pub fn scan_edges<'a>(
        &'a self,
        point: &Point,
        distance: f64,
    ) -> impl Iterator<Item = &'a FatEdge> {
        self.index_edge
            .locate_in_envelope_intersecting(&Self::bounding(point, distance))
    }

    /// Projects `point` onto every edge within the square radius, yielding
    /// the projected position and its fractional offset along the edge.
    pub fn scan_edges_projected<'a>(
        &'a self,
        point: &'a Point,
        distance: f64,
    ) -> impl Iterator<Item = (Point, f64, &'a FatEdge)> + 'a {
        self.scan_edges(point, distance).filter_map(move |edge| {
            let line = Line::new(edge.source.position, edge.target.position);

            // Locate the fraction along the line closest to the point,
            // then interpolate that fraction back onto the line.
            line.line_locate_point(point).map(|frac| {
                let projected = line.point_at_ratio_from_start(&Haversine, frac);
                (projected, frac, edge)
            })
        })
    }
}

impl GraphStore for Network {
    fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[inline]
    fn coordinate(&self, vertex: VertexId) -> Result<Option<Coordinate>, GraphError> {
        if !self.loaded {
            return Err(GraphError::NotLoaded);
        }

        Ok(self.get_position(&vertex).map(Coordinate::from))
    }

    #[inline]
    fn outgoing_edges(&self, vertex: VertexId) -> Result<Vec<Edge>, GraphError> {
        if !self.loaded {
            return Err(GraphError::NotLoaded);
        }

        if !self.graph.contains_node(vertex) {
            return Ok(Vec::new());
        }

        Ok(self
            .graph
            .edges_directed(vertex, Direction::Outgoing)
            .map(|edge| Edge::new(edge.target(), edge.weight().0))
            .collect())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(self)))]
    fn resolve_nearest(
        &self,
        coordinate: Coordinate,
        max_distance: f64,
        profile: Profile,
    ) -> Result<Option<ResolvedPoint>, GraphError> {
        if !self.loaded {
            return Err(GraphError::NotLoaded);
        }

        // Every edge carries a physical length only, so both profiles
        // resolve against the same set of edges.
        trace!("Resolving {coordinate} within {max_distance}m for the {profile} profile");

        let point = coordinate.point();
        let nearest = self
            .scan_edges_projected(&point, max_distance)
            .map(|(projected, frac, edge)| {
                (haversine(coordinate, Coordinate::from(projected)), frac, edge)
            })
            .filter(|(distance, _, _)| *distance <= max_distance)
            .min_by(|(a, _, a_edge), (b, _, b_edge)| {
                a.total_cmp(b).then_with(|| a_edge.id.cmp(&b_edge.id))
            });

        if let Some((distance, frac, edge)) = nearest {
            debug!("Resolved {coordinate} onto {} at {frac:.3} ({distance:.1}m)", edge.id);

            let resolved = if frac <= 0.0 {
                ResolvedPoint::Vertex(edge.source.id)
            } else if frac >= 1.0 {
                ResolvedPoint::Vertex(edge.target.id)
            } else {
                ResolvedPoint::Edge {
                    id: edge.id,
                    from: edge.source.id,
                    to: edge.target.id,
                    offset: frac as f32,
                }
            };

            return Ok(Some(resolved));
        }

        // Edges in range take priority over any vertex. Vertices without an
        // edge are never found through the edge index, so fall back to them.
        let nearest = self
            .scan_nodes(&point, max_distance)
            .map(|node| (haversine(coordinate, Coordinate::from(node.position)), node))
            .filter(|(distance, _)| *distance <= max_distance)
            .min_by(|(a, a_node), (b, b_node)| {
                a.total_cmp(b).then_with(|| a_node.id.cmp(&b_node.id))
            });

        Ok(nearest.map(|(distance, node)| {
            debug!("Resolved {coordinate} onto isolated vertex {} ({distance:.1}m)", node.id);
            ResolvedPoint::Vertex(node.id)
        }))
    }
}

/// Incrementally assembles a [`Network`].
///
/// ```rust
/// use waypath::{Coordinate, Network, VertexId};
///
/// let mut builder = Network::builder();
/// builder
///     .add_vertex(VertexId(1), Coordinate::new(50.0, 8.0))
///     .add_vertex(VertexId(2), Coordinate::new(50.0, 8.001));
/// builder.add_road(VertexId(1), VertexId(2)).unwrap();
///
/// let network = builder.build();
/// assert_eq!(network.edge_count(), 2);
/// ```
pub struct NetworkBuilder {
    graph: GraphStructure,
    hash: FxHashMap<VertexId, Node>,
    next_edge: u32,
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self {
            graph: GraphStructure::new(),
            hash: FxHashMap::default(),
            next_edge: 0,
        }
    }
}

impl NetworkBuilder {
    /// Adds, or moves, a vertex.
    pub fn add_vertex(&mut self, id: VertexId, coordinate: Coordinate) -> &mut Self {
        self.hash.insert(id, Node::new(id, coordinate.point()));
        self.graph.add_node(id);
        self
    }

    /// Adds the directed edge `from -> to`. Both vertices must already exist
    /// and the weight must be a finite, non-negative number of meters.
    ///
    /// Adding the same pair twice replaces the earlier weight.
    pub fn add_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        weight: Cost,
    ) -> Result<&mut Self, GraphError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight { from, to, weight });
        }

        for vertex in [from, to] {
            if !self.hash.contains_key(&vertex) {
                return Err(GraphError::UnknownVertex(vertex));
            }
        }

        let id = EdgeId(self.next_edge);
        self.next_edge += 1;

        if let Some((previous, _)) = self.graph.add_edge(from, to, (weight, id)) {
            debug!("Edge {from} -> {to} re-weighted from {previous} to {weight}");
        }

        Ok(self)
    }

    /// Adds a bidirectional road between `a` and `b`, weighted by its
    /// great-circle length.
    pub fn add_road(&mut self, a: VertexId, b: VertexId) -> Result<&mut Self, GraphError> {
        let length = self.length(a, b)?;

        self.add_edge(a, b, length)?;
        self.add_edge(b, a, length)
    }

    fn length(&self, a: VertexId, b: VertexId) -> Result<Cost, GraphError> {
        let position = |vertex: VertexId| {
            self.hash
                .get(&vertex)
                .map(|node| Coordinate::from(node.position))
                .ok_or(GraphError::UnknownVertex(vertex))
        };

        Ok(haversine(position(a)?, position(b)?))
    }

    pub fn build(self) -> Network {
        let start_time = Instant::now();
        let NetworkBuilder { graph, hash, .. } = self;

        let edges = graph
            .all_edges()
            .filter_map(|(source, target, (_, id))| {
                Some(FatEdge {
                    id: *id,
                    source: *hash.get(&source)?,
                    target: *hash.get(&target)?,
                })
            })
            .collect::<Vec<_>>();

        let index = RTree::bulk_load(hash.values().copied().collect());
        let index_edge = RTree::bulk_load(edges);

        info!(
            "Finished. Indexed {} vertices and {} edges in {}ms",
            index.size(),
            index_edge.size(),
            start_time.elapsed().as_millis()
        );

        Network {
            graph,
            hash,
            index,
            index_edge,
            loaded: true,
        }
    }
}
