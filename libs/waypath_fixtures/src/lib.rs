//! Synthetic road networks shared by the unit tests, integration tests and benches.
//!
//! Fixtures are plain data so that they can be loaded into any graph store.
//! Vertices are `(id, latitude, longitude)`, weighted edges are directed
//! `(from, to, meters)` arcs and roads are bidirectional `(a, b)` pairs whose
//! weight is their measured great-circle length.

pub struct Fixture {
    pub name: &'static str,
    pub vertices: &'static [(u32, f32, f32)],
    pub edges: &'static [(u32, u32, f64)],
    pub roads: &'static [(u32, u32)],
}

/// Four coincident vertices, so the great-circle heuristic is zero everywhere.
///
/// ```text
///        10
///   A ------> B ---5--> D
///   |         ^
///   1         1
///   +---> C --+
/// ```
///
/// The cheapest `A -> D` path is `A, C, B, D` with weight 7.
pub const DIAMOND: Fixture = Fixture {
    name: "diamond",
    vertices: &[
        (1, 51.5007, -0.1246),
        (2, 51.5007, -0.1246),
        (3, 51.5007, -0.1246),
        (4, 51.5007, -0.1246),
    ],
    edges: &[(1, 2, 10.0), (1, 3, 1.0), (3, 2, 1.0), (2, 4, 5.0)],
    roads: &[],
};

pub const DIAMOND_A: u32 = 1;
pub const DIAMOND_B: u32 = 2;
pub const DIAMOND_C: u32 = 3;
pub const DIAMOND_D: u32 = 4;

/// Two components which share no edge. The first is a four vertex chain,
/// the second a three vertex chain, all edges bidirectional.
pub const SPLIT: Fixture = Fixture {
    name: "split",
    vertices: &[
        (1, 50.0, 8.0),
        (2, 50.0, 8.001),
        (3, 50.0, 8.002),
        (4, 50.0, 8.003),
        (10, 50.1, 8.0),
        (11, 50.1, 8.001),
        (12, 50.1, 8.002),
    ],
    edges: &[],
    roads: &[(1, 2), (2, 3), (3, 4), (10, 11), (11, 12)],
};

/// A 4x4 lattice with a spacing of 0.001 degrees, plus a detached two-vertex
/// island roughly five kilometers to the north.
///
/// Vertex `r * 4 + c + 1` sits at row `r` and column `c`. Every road is
/// weighted by its measured length, so the heuristic is admissible.
pub const CITY_GRID: Fixture = Fixture {
    name: "city_grid",
    vertices: &[
        (1, 38.900, -77.030),
        (2, 38.900, -77.029),
        (3, 38.900, -77.028),
        (4, 38.900, -77.027),
        (5, 38.901, -77.030),
        (6, 38.901, -77.029),
        (7, 38.901, -77.028),
        (8, 38.901, -77.027),
        (9, 38.902, -77.030),
        (10, 38.902, -77.029),
        (11, 38.902, -77.028),
        (12, 38.902, -77.027),
        (13, 38.903, -77.030),
        (14, 38.903, -77.029),
        (15, 38.903, -77.028),
        (16, 38.903, -77.027),
        (20, 38.950, -77.030),
        (21, 38.950, -77.029),
    ],
    edges: &[],
    roads: &[
        // Rows
        (1, 2),
        (2, 3),
        (3, 4),
        (5, 6),
        (6, 7),
        (7, 8),
        (9, 10),
        (10, 11),
        (11, 12),
        (13, 14),
        (14, 15),
        (15, 16),
        // Columns
        (1, 5),
        (5, 9),
        (9, 13),
        (2, 6),
        (6, 10),
        (10, 14),
        (3, 7),
        (7, 11),
        (11, 15),
        (4, 8),
        (8, 12),
        (12, 16),
        // Island
        (20, 21),
    ],
};

/// Number of vertices in the lattice component of [`CITY_GRID`].
pub const CITY_GRID_LATTICE: usize = 16;

/// Generates a `rows` by `cols` lattice with the given spacing in degrees,
/// anchored at `(lat, lng)`. Used by the benches to build larger networks.
pub fn lattice(
    rows: u32,
    cols: u32,
    origin: (f32, f32),
    spacing: f32,
) -> (Vec<(u32, f32, f32)>, Vec<(u32, u32)>) {
    let id = |r: u32, c: u32| r * cols + c + 1;

    let vertices = (0..rows)
        .flat_map(|r| (0..cols).map(move |c| (r, c)))
        .map(|(r, c)| {
            (
                id(r, c),
                origin.0 + r as f32 * spacing,
                origin.1 + c as f32 * spacing,
            )
        })
        .collect();

    let mut roads = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            if c + 1 < cols {
                roads.push((id(r, c), id(r, c + 1)));
            }
            if r + 1 < rows {
                roads.push((id(r, c), id(r + 1, c)));
            }
        }
    }

    (vertices, roads)
}
