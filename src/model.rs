//! Render-ready wireframe model.
//!
//! A [`WireframeModel`] is built once from a [`Mesh`] (or one of the
//! built-in shapes) and stays immutable while rendering. Each frame
//! transforms a copy of its vertices, never the model itself.

use crate::math::vec3::Vec3;
use crate::mesh::Mesh;

/// Model-space vertices plus a flat list of index pairs to connect.
///
/// `connections` always has even length: entries `2k` and `2k + 1` are the
/// two ends of line `k`.
#[derive(Debug, Clone, PartialEq)]
pub struct WireframeModel {
    vertices: Vec<Vec3>,
    connections: Vec<u32>,
}

impl WireframeModel {
    /// Create a model from vertices and a flat connection list.
    ///
    /// # Panics
    /// Panics if `connections` has odd length or references a vertex that
    /// does not exist.
    pub fn new(vertices: Vec<Vec3>, connections: Vec<u32>) -> Self {
        assert!(
            connections.len() % 2 == 0,
            "connections must come in pairs, got {} entries",
            connections.len()
        );
        assert!(
            connections.iter().all(|&i| (i as usize) < vertices.len()),
            "connection index out of range for {} vertices",
            vertices.len()
        );
        Self {
            vertices,
            connections,
        }
    }

    /// Axis-aligned cube centred on the origin, drawn with its 12 sides.
    pub fn cube(half_extent: f32) -> Self {
        let h = half_extent;
        let vertices = vec![
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ];
        #[rustfmt::skip]
        let connections = vec![
            // Back face
            0, 1, 1, 2, 2, 3, 3, 0,
            // Front face
            4, 5, 5, 6, 6, 7, 7, 4,
            // Sides
            0, 4, 1, 5, 2, 6, 3, 7,
        ];
        Self::new(vertices, connections)
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn connections(&self) -> &[u32] {
        &self.connections
    }

    /// Iterate over connected index pairs.
    pub fn lines(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.connections
            .chunks_exact(2)
            .map(|pair| (pair[0] as usize, pair[1] as usize))
    }

    pub fn line_count(&self) -> usize {
        self.connections.len() / 2
    }

    /// Largest distance from the origin to any vertex; 0 for an empty model.
    pub fn bounding_radius(&self) -> f32 {
        self.vertices
            .iter()
            .map(Vec3::magnitude)
            .fold(0.0, f32::max)
    }
}

impl From<&Mesh> for WireframeModel {
    fn from(mesh: &Mesh) -> Self {
        let connections = mesh
            .edges()
            .iter()
            .flat_map(|edge| [edge.a(), edge.b()])
            .collect();
        Self {
            vertices: mesh.vertices().to_vec(),
            connections,
        }
    }
}

impl From<Mesh> for WireframeModel {
    fn from(mesh: Mesh) -> Self {
        Self::from(&mesh)
    }
}
