//! Deduplicated vertex and edge sets extracted from a triangle soup.
//!
//! STL stores every triangle with its own copy of each corner. [`Mesh`]
//! merges equal corners into shared vertices and collects each undirected
//! edge once, which is all a wireframe needs.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::path::Path;

use tracing::info;

use crate::error::{LoadError, LoadResult};
use crate::math::vec3::Vec3;
use crate::stl;
use crate::triangle::Triangle;

/// Decides when two positions count as the same vertex.
///
/// Edge extraction only sees the keys, so a tolerant policy can replace the
/// exact one without touching the algorithm.
pub trait VertexKey {
    type Key: Hash + Eq;

    fn key(&self, position: Vec3) -> Self::Key;
}

/// Exact component equality.
///
/// `-0.0` and `0.0` share a key, as do all NaN payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactKey;

impl VertexKey for ExactKey {
    type Key = [u32; 3];

    fn key(&self, position: Vec3) -> Self::Key {
        [
            canonical_bits(position.x),
            canonical_bits(position.y),
            canonical_bits(position.z),
        ]
    }
}

fn canonical_bits(value: f32) -> u32 {
    if value == 0.0 {
        0
    } else if value.is_nan() {
        f32::NAN.to_bits()
    } else {
        value.to_bits()
    }
}

/// Snaps positions to a grid of the given cell size before comparing.
#[derive(Debug, Clone, Copy)]
pub struct QuantizedKey {
    pub step: f32,
}

impl QuantizedKey {
    pub fn new(step: f32) -> Self {
        Self { step }
    }
}

impl VertexKey for QuantizedKey {
    type Key = [i64; 3];

    fn key(&self, position: Vec3) -> Self::Key {
        let snap = |v: f32| (f64::from(v) / f64::from(self.step)).round() as i64;
        [snap(position.x), snap(position.y), snap(position.z)]
    }
}

/// An undirected edge between two vertex indices.
///
/// Always stored with the smaller index first, so `Edge::new(a, b)` and
/// `Edge::new(b, a)` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge(u32, u32);

impl Edge {
    pub fn new(a: u32, b: u32) -> Self {
        Self(a.min(b), a.max(b))
    }

    pub fn a(&self) -> u32 {
        self.0
    }

    pub fn b(&self) -> u32 {
        self.1
    }
}

/// Shared vertices plus the unique edges connecting them.
///
/// Vertices keep first-seen order. Edges keep the order in which they were
/// first encountered, so loading the same file twice is bit-identical.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    edges: Vec<Edge>,
}

impl Mesh {
    /// Load an STL file (binary or ASCII) and extract its edges.
    pub fn load<P: AsRef<Path>>(path: P) -> LoadResult<Self> {
        let triangles = stl::read_triangles(path)?;
        let mesh = Self::from_triangles(&triangles)?;
        info!(
            vertices = mesh.vertex_count(),
            edges = mesh.edge_count(),
            "Built wireframe mesh"
        );
        Ok(mesh)
    }

    /// Build from triangles using exact vertex equality.
    pub fn from_triangles(triangles: &[Triangle]) -> LoadResult<Self> {
        Self::from_triangles_with(triangles, &ExactKey)
    }

    /// Build from triangles using a custom vertex equality policy.
    ///
    /// The first position seen for a key becomes the stored vertex.
    /// Degenerate triangles whose corners collapse onto one vertex add no
    /// self-edges.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::TooManyVertices`] if the distinct vertices do
    /// not fit in `u32` indices.
    pub fn from_triangles_with<K: VertexKey>(
        triangles: &[Triangle],
        policy: &K,
    ) -> LoadResult<Self> {
        let mut index_of: HashMap<K::Key, u32> = HashMap::new();
        let mut vertices = Vec::new();
        let mut seen = HashSet::new();
        let mut edges = Vec::new();

        let mut get_or_add = |position: Vec3| -> LoadResult<u32> {
            match index_of.entry(policy.key(position)) {
                Entry::Occupied(entry) => Ok(*entry.get()),
                Entry::Vacant(entry) => {
                    let index = vertex_index(vertices.len())?;
                    vertices.push(position);
                    Ok(*entry.insert(index))
                }
            }
        };

        for triangle in triangles {
            let [p0, p1, p2] = triangle.vertices;
            let a = get_or_add(p0)?;
            let b = get_or_add(p1)?;
            let c = get_or_add(p2)?;

            for (i, j) in [(a, b), (b, c), (a, c)] {
                if i == j {
                    continue;
                }
                let edge = Edge::new(i, j);
                if seen.insert(edge) {
                    edges.push(edge);
                }
            }
        }

        Ok(Self { vertices, edges })
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Index for the next vertex, given how many are already stored.
fn vertex_index(count: usize) -> LoadResult<u32> {
    u32::try_from(count).map_err(|_| LoadError::TooManyVertices { count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadErrorKind;
    use std::collections::BTreeSet;
    use std::fs::File;

    fn tri(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Triangle {
        Triangle::new(
            Vec3::ZERO,
            [
                Vec3::new(a[0], a[1], a[2]),
                Vec3::new(b[0], b[1], b[2]),
                Vec3::new(c[0], c[1], c[2]),
            ],
        )
    }

    /// Closed unit cube: 12 triangles, 8 corners, 18 edges (12 sides + 6 diagonals).
    fn cube_triangles() -> Vec<Triangle> {
        let p = |x: f32, y: f32, z: f32| [x, y, z];
        let quads = [
            [p(0., 0., 0.), p(1., 0., 0.), p(1., 1., 0.), p(0., 1., 0.)],
            [p(0., 0., 1.), p(1., 0., 1.), p(1., 1., 1.), p(0., 1., 1.)],
            [p(0., 0., 0.), p(1., 0., 0.), p(1., 0., 1.), p(0., 0., 1.)],
            [p(0., 1., 0.), p(1., 1., 0.), p(1., 1., 1.), p(0., 1., 1.)],
            [p(0., 0., 0.), p(0., 1., 0.), p(0., 1., 1.), p(0., 0., 1.)],
            [p(1., 0., 0.), p(1., 1., 0.), p(1., 1., 1.), p(1., 0., 1.)],
        ];
        quads
            .iter()
            .flat_map(|[a, b, c, d]| [tri(*a, *b, *c), tri(*a, *c, *d)])
            .collect()
    }

    fn edge_positions(mesh: &Mesh) -> BTreeSet<[u32; 6]> {
        let key = |v: Vec3| ExactKey.key(v);
        mesh.edges()
            .iter()
            .map(|e| {
                let mut ends = [
                    key(mesh.vertices()[e.a() as usize]),
                    key(mesh.vertices()[e.b() as usize]),
                ];
                ends.sort();
                let [a, b] = ends;
                [a[0], a[1], a[2], b[0], b[1], b[2]]
            })
            .collect()
    }

    #[test]
    fn single_triangle_edges() {
        let mesh =
            Mesh::from_triangles(&[tri([0., 0., 0.], [1., 0., 0.], [0., 1., 0.])]).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        let edges: BTreeSet<_> = mesh.edges().iter().map(|e| (e.a(), e.b())).collect();
        assert_eq!(edges, BTreeSet::from([(0, 1), (0, 2), (1, 2)]));
    }

    #[test]
    fn shared_edges_are_stored_once() {
        let mesh = Mesh::from_triangles(&cube_triangles()).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.edge_count(), 18);
    }

    #[test]
    fn edge_indices_are_ordered_and_in_range() {
        let mesh = Mesh::from_triangles(&cube_triangles()).unwrap();
        for edge in mesh.edges() {
            assert!(edge.a() < edge.b());
            assert!((edge.b() as usize) < mesh.vertex_count());
        }
    }

    #[test]
    fn vertices_keep_first_seen_order() {
        let mesh = Mesh::from_triangles(&[
            tri([5., 0., 0.], [0., 5., 0.], [0., 0., 5.]),
            tri([0., 0., 5.], [9., 9., 9.], [5., 0., 0.]),
        ])
        .unwrap();
        assert_eq!(mesh.vertices()[0], Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(mesh.vertices()[3], Vec3::new(9.0, 9.0, 9.0));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn vertex_index_overflow_is_format_error() {
        assert_eq!(vertex_index(u32::MAX as usize).unwrap(), u32::MAX);

        let err = vertex_index(u32::MAX as usize + 1).unwrap_err();
        assert!(matches!(err, LoadError::TooManyVertices { count } if count == 1 << 32));
        assert_eq!(err.kind(), LoadErrorKind::Format);
    }

    #[test]
    fn edge_is_undirected() {
        assert_eq!(Edge::new(4, 1), Edge::new(1, 4));
        assert_eq!(Edge::new(4, 1).a(), 1);
    }

    #[test]
    fn negative_zero_matches_zero() {
        let mesh = Mesh::from_triangles(&[
            tri([0., 0., 0.], [1., 0., 0.], [0., 1., 0.]),
            tri([-0., 0., 0.], [0., 1., 0.], [0., 0., 1.]),
        ])
        .unwrap();
        assert_eq!(mesh.vertex_count(), 4);
    }

    #[test]
    fn exact_key_separates_near_duplicates() {
        let noisy = tri([1e-7, 0., 0.], [1., 0., 0.], [0., 1., 0.]);
        let clean = tri([0., 0., 0.], [1., 0., 0.], [0., 1., 0.]);
        assert_eq!(Mesh::from_triangles(&[clean, noisy]).unwrap().vertex_count(), 4);

        let merged =
            Mesh::from_triangles_with(&[clean, noisy], &QuantizedKey::new(1e-4)).unwrap();
        assert_eq!(merged.vertex_count(), 3);
        assert_eq!(merged.edge_count(), 3);
    }

    #[test]
    fn degenerate_triangle_adds_no_self_edge() {
        let mesh =
            Mesh::from_triangles(&[tri([0., 0., 0.], [0., 0., 0.], [1., 0., 0.])]).unwrap();
        assert_eq!(mesh.vertex_count(), 2);
        assert_eq!(mesh.edges(), &[Edge::new(0, 1)]);
    }

    #[test]
    fn binary_and_ascii_files_agree() {
        let triangles = cube_triangles();
        let dir = tempfile::tempdir().unwrap();
        let binary_path = dir.path().join("cube_bin.stl");
        let ascii_path = dir.path().join("cube_ascii.stl");
        stl::write_binary(File::create(&binary_path).unwrap(), &triangles).unwrap();
        stl::write_ascii(File::create(&ascii_path).unwrap(), "cube", &triangles).unwrap();

        let binary = Mesh::load(&binary_path).unwrap();
        let ascii = Mesh::load(&ascii_path).unwrap();

        assert_eq!(binary.vertex_count(), ascii.vertex_count());
        assert_eq!(binary.edge_count(), ascii.edge_count());
        assert_eq!(edge_positions(&binary), edge_positions(&ascii));
    }

    #[test]
    fn loading_twice_is_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.stl");
        stl::write_binary(File::create(&path).unwrap(), &cube_triangles()).unwrap();

        let first = Mesh::load(&path).unwrap();
        let second = Mesh::load(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn ascii_single_triangle_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.stl");
        std::fs::write(
            &path,
            "solid one\n facet normal 0 0 1\n  outer loop\n   vertex 0 0 0\n   vertex 1 0 0\n   vertex 0 1 0\n  endloop\n endfacet\nendsolid one\n",
        )
        .unwrap();

        let mesh = Mesh::load(&path).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        let edges: BTreeSet<_> = mesh.edges().iter().map(|e| (e.a(), e.b())).collect();
        assert_eq!(edges, BTreeSet::from([(0, 1), (0, 2), (1, 2)]));
    }

    #[test]
    fn garbage_file_fails_without_mesh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.stl");
        std::fs::write(&path, "solid bad\n facet normal a b c\n").unwrap();

        let err = Mesh::load(&path).unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::Format);
    }
}
