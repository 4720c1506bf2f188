use crate::math::vec3::Vec3;

// A facet as stored in an STL file: the declared normal followed by
// three corner positions. The normal is carried through but never
// recomputed or used for rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub normal: Vec3,
    pub vertices: [Vec3; 3],
}

impl Triangle {
    pub fn new(normal: Vec3, vertices: [Vec3; 3]) -> Self {
        Self { normal, vertices }
    }
}
